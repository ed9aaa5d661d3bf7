//! Raw C declarations for libchatsdk.
//!
//! This module contains the direct FFI bindings to the C API declared in
//! `chatsdk.h`. Users should prefer the safe Rust wrappers in the parent
//! modules.

use std::os::raw::{c_char, c_int, c_void};

#[cfg(chatsdk_linked)]
use super::handles::ChatSDK;

/// Status code returned by C functions and by the store callback.
pub type ChatSdkStatus = c_int;

// Status codes
pub const CHATSDK_OK: ChatSdkStatus = 0;
pub const CHATSDK_ERR: ChatSdkStatus = 1;

/// Callback the native side invokes to persist a message.
///
/// Returns [`CHATSDK_OK`] on success, nonzero on error.
pub type StoreMessageFn = unsafe extern "C" fn(
    id: *const c_char,
    message: *const c_char,
    user_data: *mut c_void,
) -> c_int;

/// Callback the native side invokes to look a message up.
///
/// Returns a `malloc`-allocated string the native side must `free()`, or
/// NULL if the message does not exist.
pub type GetMessageFn =
    unsafe extern "C" fn(id: *const c_char, user_data: *mut c_void) -> *const c_char;

/// Nullable `StoreMessageProc`, as it appears in C signatures.
pub type StoreMessageProc = Option<StoreMessageFn>;

/// Nullable `GetMessageProc`, as it appears in C signatures.
pub type GetMessageProc = Option<GetMessageFn>;

// External C functions, present when build.rs found and linked libchatsdk
#[cfg(chatsdk_linked)]
extern "C" {
    // Standalone
    pub fn sendMessageCString(message: *const c_char) -> c_int;

    // SDK instance lifecycle
    pub fn newChatSDKC(
        store_proc: StoreMessageProc,
        get_proc: GetMessageProc,
        user_data: *mut c_void,
    ) -> *mut ChatSDK;
    pub fn freeChatSDKC(sdk: *mut ChatSDK);

    // SDK instance operations
    pub fn sendMessageSDKC(sdk: *mut ChatSDK, id: *const c_char, message: *const c_char) -> c_int;
    pub fn getMessageSDKC(sdk: *mut ChatSDK, id: *const c_char) -> *const c_char;

    // Memory management
    pub fn freeCString(s: *const c_char);
}
