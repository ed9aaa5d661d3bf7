//! Table of native entry points.
//!
//! Every call the safe wrappers make into the native library goes through a
//! [`NativeApi`]. The table is resolved once, at construction, so an SDK
//! instance always releases its handle through the same library that created
//! it. The default is always the linked library; the loopback is only used
//! when asked for by name.

use std::os::raw::{c_char, c_int, c_void};

use super::error::check_status;
use super::handles::ChatSDK;
use super::loopback;
use super::raw::{GetMessageProc, StoreMessageProc};
use super::string::to_c_string;
use crate::error::{Error, Result};

/// `newChatSDKC`
pub type NewSdkFn = unsafe extern "C" fn(
    store_proc: StoreMessageProc,
    get_proc: GetMessageProc,
    user_data: *mut c_void,
) -> *mut ChatSDK;
/// `freeChatSDKC`
pub type FreeSdkFn = unsafe extern "C" fn(sdk: *mut ChatSDK);
/// `sendMessageCString`
pub type SendStandaloneFn = unsafe extern "C" fn(message: *const c_char) -> c_int;
/// `sendMessageSDKC`
pub type SendFn =
    unsafe extern "C" fn(sdk: *mut ChatSDK, id: *const c_char, message: *const c_char) -> c_int;
/// `getMessageSDKC`
pub type GetFn = unsafe extern "C" fn(sdk: *mut ChatSDK, id: *const c_char) -> *const c_char;
/// `freeCString`
pub type FreeStringFn = unsafe extern "C" fn(s: *const c_char);

/// The native C surface as a set of function pointers.
///
/// Fields are public so callers can assemble a table from their own symbols,
/// for example a library loaded at runtime.
#[derive(Debug, Clone, Copy)]
pub struct NativeApi {
    pub new_sdk: NewSdkFn,
    pub free_sdk: FreeSdkFn,
    pub send_standalone: SendStandaloneFn,
    pub send: SendFn,
    pub get: GetFn,
    pub free_string: FreeStringFn,
}

impl NativeApi {
    /// Entry points of the linked libchatsdk.
    ///
    /// Fails with [`Error::NativeUnavailable`] if the crate was built without
    /// the `native` feature or build.rs could not find the library.
    pub fn linked() -> Result<Self> {
        #[cfg(chatsdk_linked)]
        {
            use super::raw;

            Ok(Self {
                new_sdk: raw::newChatSDKC,
                free_sdk: raw::freeChatSDKC,
                send_standalone: raw::sendMessageCString,
                send: raw::sendMessageSDKC,
                get: raw::getMessageSDKC,
                free_string: raw::freeCString,
            })
        }
        #[cfg(not(chatsdk_linked))]
        {
            Err(Error::NativeUnavailable)
        }
    }

    /// Entry points of the in-process loopback library.
    ///
    /// Never chosen implicitly; pass it to
    /// [`ChatSdkBuilder::native_api`](crate::ChatSdkBuilder::native_api).
    pub fn loopback() -> Self {
        Self {
            new_sdk: loopback::new_sdk,
            free_sdk: loopback::free_sdk,
            send_standalone: loopback::send_standalone,
            send: loopback::send,
            get: loopback::get,
            free_string: loopback::free_string,
        }
    }

    /// Send a message without storage through this library.
    pub fn send_standalone(&self, message: &str) -> Result<()> {
        let message_c = to_c_string("message", message)?;
        let code = unsafe { (self.send_standalone)(message_c.as_ptr()) };
        check_status(code)
    }
}

/// Check if this build links libchatsdk.
pub fn is_linked() -> bool {
    cfg!(chatsdk_linked)
}
