//! Store-backed SDK instances.

use std::fmt;
use std::sync::Arc;

use log::{debug, warn};
use parking_lot::RwLock;

use crate::callbacks::{get_message_trampoline, store_message_trampoline};
use crate::error::{Error, Result};
use crate::ffi::string::{copy_lossy, to_c_string};
use crate::ffi::{check_status, GetMessageFn, NativeApi, SdkHandle, StoreMessageFn};
use crate::registry::{StoreRegistry, Token};
use crate::store::MessageStore;

/// A native SDK instance paired with the [`MessageStore`] it calls back into.
///
/// Construction registers the store under a fresh [`Token`] and hands the
/// native library the token together with the two callbacks. The instance
/// owns the native handle; closing releases it first and then removes the
/// registry entry, so the native side can never reach a store that is gone.
///
/// `ChatSdk` is `Send + Sync`: share it through an `Arc` to send and fetch
/// from several threads. Closing waits for in-flight calls to finish.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use chatsdk::{ChatSdk, MemoryStore, NativeApi};
///
/// let store = Arc::new(MemoryStore::new());
/// let sdk = ChatSdk::builder()
///     .store(store.clone())
///     .native_api(NativeApi::loopback())
///     .build()?;
///
/// sdk.send_message("m1", "hello")?;
/// assert_eq!(sdk.get_message("m1")?.as_deref(), Some("hello"));
/// assert_eq!(sdk.get_message("missing")?, None);
///
/// sdk.close()?;
/// assert!(sdk.send_message("m1", "again").unwrap_err().is_closed());
/// # Ok::<(), chatsdk::Error>(())
/// ```
pub struct ChatSdk {
    state: RwLock<SdkState>,
    token: Token,
    store: Arc<dyn MessageStore>,
    api: NativeApi,
    registry: &'static StoreRegistry,
}

struct SdkState {
    handle: SdkHandle,
    closed: bool,
}

impl ChatSdk {
    /// Create an instance backed by `store` on the linked libchatsdk.
    ///
    /// Fails with [`Error::NativeUnavailable`] if this build does not link it.
    pub fn new(store: Arc<dyn MessageStore>) -> Result<Self> {
        Self::builder().store(store).build()
    }

    /// Start configuring an instance.
    pub fn builder() -> ChatSdkBuilder {
        ChatSdkBuilder::default()
    }

    /// The registry token native callbacks carry for this instance.
    pub fn token(&self) -> Token {
        self.token
    }

    /// The store this instance calls back into.
    pub fn store(&self) -> &Arc<dyn MessageStore> {
        &self.store
    }

    /// Check if the instance has been closed.
    pub fn is_closed(&self) -> bool {
        self.state.read().closed
    }

    /// Send a message through the native SDK, which stores it under `id`.
    ///
    /// Fails with [`Error::SendFailed`] if the native library (or the store
    /// behind it) rejects the message.
    pub fn send_message(&self, id: &str, message: &str) -> Result<()> {
        let state = self.state.read();
        if state.closed {
            return Err(Error::Closed);
        }

        let id_c = to_c_string("id", id)?;
        let message_c = to_c_string("message", message)?;

        let code = unsafe {
            (self.api.send)(state.handle.as_ptr(), id_c.as_ptr(), message_c.as_ptr())
        };
        check_status(code)
    }

    /// Fetch a message by id through the native SDK.
    ///
    /// Returns `Ok(None)` if no message is stored under `id`. An empty stored
    /// message is reported the same way.
    pub fn get_message(&self, id: &str) -> Result<Option<String>> {
        let state = self.state.read();
        if state.closed {
            return Err(Error::Closed);
        }

        let id_c = to_c_string("id", id)?;

        unsafe {
            let ptr = (self.api.get)(state.handle.as_ptr(), id_c.as_ptr());
            if ptr.is_null() {
                return Ok(None);
            }
            let message = copy_lossy(ptr);
            (self.api.free_string)(ptr);
            Ok(Some(message))
        }
    }

    /// Close the instance and release resources.
    ///
    /// This is called automatically on drop. Closing an already closed
    /// instance is a no-op.
    pub fn close(&self) -> Result<()> {
        let mut state = self.state.write();
        if state.closed {
            return Ok(());
        }

        let raw = state.handle.take();
        if !raw.is_null() {
            unsafe { (self.api.free_sdk)(raw) };
        }
        self.registry.unregister(self.token);
        state.closed = true;

        debug!("closed ChatSDK instance (token {})", self.token);
        Ok(())
    }
}

impl Drop for ChatSdk {
    fn drop(&mut self) {
        if !self.state.get_mut().closed {
            warn!(
                "ChatSDK instance (token {}) dropped without close, releasing it",
                self.token
            );
            // Ignore errors on drop
            let _ = self.close();
        }
    }
}

impl fmt::Debug for ChatSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatSdk")
            .field("token", &self.token)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

// The native handle is only used under the state lock, and the store is
// itself Send + Sync.
unsafe impl Send for ChatSdk {}
unsafe impl Sync for ChatSdk {}

/// Options for creating a [`ChatSdk`].
#[derive(Default)]
pub struct ChatSdkBuilder {
    store: Option<Arc<dyn MessageStore>>,
    api: Option<NativeApi>,
}

impl ChatSdkBuilder {
    /// The store native callbacks are forwarded to. Required.
    pub fn store(mut self, store: Arc<dyn MessageStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// The native library to create the instance with.
    ///
    /// Defaults to [`NativeApi::linked()`].
    pub fn native_api(mut self, api: NativeApi) -> Self {
        self.api = Some(api);
        self
    }

    /// Register the store and create the native instance.
    ///
    /// If the native library fails to create the instance, the store is
    /// unregistered again before the error is returned.
    pub fn build(self) -> Result<ChatSdk> {
        let store = self.store.ok_or(Error::MissingStore)?;
        let api = match self.api {
            Some(api) => api,
            None => NativeApi::linked()?,
        };
        let registry = StoreRegistry::global();

        let token = registry.register(Arc::clone(&store))?;

        let raw = unsafe {
            (api.new_sdk)(
                Some(store_message_trampoline as StoreMessageFn),
                Some(get_message_trampoline as GetMessageFn),
                token.to_user_data(),
            )
        };
        let handle = SdkHandle::from_raw(raw);
        if !handle.is_valid() {
            registry.unregister(token);
            return Err(Error::CreateFailed);
        }

        debug!("created ChatSDK instance (token {})", token);

        Ok(ChatSdk {
            state: RwLock::new(SdkState {
                handle,
                closed: false,
            }),
            token,
            store,
            api,
            registry,
        })
    }
}

impl fmt::Debug for ChatSdkBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatSdkBuilder")
            .field("store", &self.store.is_some())
            .field("api", &self.api)
            .finish()
    }
}
