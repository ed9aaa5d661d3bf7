//! In-process implementation of the libchatsdk C surface.
//!
//! Behaves like the native SDK as far as the bindings can observe: the
//! constructor keeps the two callbacks and the user data pointer, sending
//! forwards to the store callback, and getting copies the callback's string
//! into a fresh allocation and frees the original with `free()`. Useful for
//! tests and for running without the native library installed.

use std::os::raw::{c_char, c_int, c_void};
use std::ptr;

use log::debug;

use super::handles::ChatSDK;
use super::raw::{
    GetMessageFn, GetMessageProc, StoreMessageFn, StoreMessageProc, CHATSDK_ERR, CHATSDK_OK,
};
use super::string::{copy_lossy, free_c_string};

struct LoopbackSdk {
    store_proc: StoreMessageFn,
    get_proc: GetMessageFn,
    user_data: *mut c_void,
}

/// `newChatSDKC`: NULL unless both callbacks are present.
pub unsafe extern "C" fn new_sdk(
    store_proc: StoreMessageProc,
    get_proc: GetMessageProc,
    user_data: *mut c_void,
) -> *mut ChatSDK {
    let (Some(store_proc), Some(get_proc)) = (store_proc, get_proc) else {
        return ptr::null_mut();
    };

    Box::into_raw(Box::new(LoopbackSdk {
        store_proc,
        get_proc,
        user_data,
    }))
    .cast()
}

/// `freeChatSDKC`
pub unsafe extern "C" fn free_sdk(sdk: *mut ChatSDK) {
    if !sdk.is_null() {
        drop(Box::from_raw(sdk.cast::<LoopbackSdk>()));
    }
}

/// `sendMessageCString`
pub unsafe extern "C" fn send_standalone(message: *const c_char) -> c_int {
    if message.is_null() {
        return CHATSDK_ERR;
    }
    debug!("loopback: sent standalone message: {}", copy_lossy(message));
    CHATSDK_OK
}

/// `sendMessageSDKC`: delivers the message to the store callback and
/// reports its status.
pub unsafe extern "C" fn send(
    sdk: *mut ChatSDK,
    id: *const c_char,
    message: *const c_char,
) -> c_int {
    if sdk.is_null() || id.is_null() || message.is_null() {
        return CHATSDK_ERR;
    }
    let sdk = &*sdk.cast::<LoopbackSdk>();
    (sdk.store_proc)(id, message, sdk.user_data)
}

/// `getMessageSDKC`: the result must be released with [`free_string`].
pub unsafe extern "C" fn get(sdk: *mut ChatSDK, id: *const c_char) -> *const c_char {
    if sdk.is_null() || id.is_null() {
        return ptr::null();
    }
    let sdk = &*sdk.cast::<LoopbackSdk>();

    let found = (sdk.get_proc)(id, sdk.user_data);
    if found.is_null() {
        return ptr::null();
    }

    // The callback's allocation is ours now; hand back our own copy.
    let copy = libc::strdup(found);
    free_c_string(found);
    copy
}

/// `freeCString`
pub unsafe extern "C" fn free_string(s: *const c_char) {
    free_c_string(s);
}
