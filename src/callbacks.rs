//! Callbacks handed to the native SDK.
//!
//! The native library calls these with primitive arguments only: C strings
//! and the user data pointer carrying a registry [`Token`]. Each call resolves
//! the token through [`StoreRegistry::global`] and forwards to the registered
//! [`MessageStore`]. Nothing unwinds across the boundary: a panic in store
//! code is reported as the failure return value.
//!
//! [`MessageStore`]: crate::MessageStore

use std::any::Any;
use std::os::raw::{c_char, c_int, c_void};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::ptr;

use log::{error, trace, warn};

use crate::ffi::string::{copy_lossy, malloc_c_string};
use crate::ffi::{CHATSDK_ERR, CHATSDK_OK};
use crate::registry::{StoreRegistry, Token};

/// `StoreMessageProc` implementation.
///
/// Returns 0 if the store accepted the message, 1 on null arguments, an
/// unknown token, a rejected message, or a panic.
///
/// # Safety
///
/// `id` and `message` must be null or point to NUL-terminated strings.
pub unsafe extern "C" fn store_message_trampoline(
    id: *const c_char,
    message: *const c_char,
    user_data: *mut c_void,
) -> c_int {
    store_in(StoreRegistry::global(), id, message, user_data)
}

/// `GetMessageProc` implementation.
///
/// Returns a `malloc`-allocated copy of the message, which the native side
/// owns and must `free()`, or null if the message is missing, empty, or the
/// lookup failed.
///
/// # Safety
///
/// `id` must be null or point to a NUL-terminated string.
pub unsafe extern "C" fn get_message_trampoline(
    id: *const c_char,
    user_data: *mut c_void,
) -> *const c_char {
    get_in(StoreRegistry::global(), id, user_data)
}

pub(crate) unsafe fn store_in(
    registry: &StoreRegistry,
    id: *const c_char,
    message: *const c_char,
    user_data: *mut c_void,
) -> c_int {
    if id.is_null() || message.is_null() {
        return CHATSDK_ERR;
    }

    let result = catch_unwind(AssertUnwindSafe(|| {
        let Some(store) = Token::from_user_data(user_data).and_then(|t| registry.lookup(t)) else {
            trace!("store callback: unknown token {:p}", user_data);
            return CHATSDK_ERR;
        };

        let id = copy_lossy(id);
        let message = copy_lossy(message);
        if store.store_message(&id, &message) {
            CHATSDK_OK
        } else {
            trace!("store callback: store rejected message {}", id);
            CHATSDK_ERR
        }
    }));

    result.unwrap_or_else(|panic| {
        error!("store callback panicked: {}", panic_message(panic.as_ref()));
        CHATSDK_ERR
    })
}

pub(crate) unsafe fn get_in(
    registry: &StoreRegistry,
    id: *const c_char,
    user_data: *mut c_void,
) -> *const c_char {
    if id.is_null() {
        return ptr::null();
    }

    let result = catch_unwind(AssertUnwindSafe(|| {
        let Some(store) = Token::from_user_data(user_data).and_then(|t| registry.lookup(t)) else {
            trace!("get callback: unknown token {:p}", user_data);
            return ptr::null();
        };

        let id = copy_lossy(id);
        match store.get_message(&id) {
            Some(message) if !message.is_empty() => {
                let out = malloc_c_string(&message);
                if out.is_null() {
                    warn!("get callback: message {} cannot be passed as a C string", id);
                }
                out as *const c_char
            }
            _ => ptr::null(),
        }
    }));

    result.unwrap_or_else(|panic| {
        error!("get callback panicked: {}", panic_message(panic.as_ref()));
        ptr::null()
    })
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}
