//! Rust bindings for the chat SDK native library.
//!
//! The native SDK sends messages and persists them through two callbacks
//! supplied at construction. This crate lets any Rust type implementing
//! [`MessageStore`] serve as that storage: stores are registered under an
//! opaque [`Token`], the token is what crosses the C boundary, and the
//! callbacks in [`callbacks`] resolve it back to the store.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use chatsdk::{ChatSdk, MemoryStore};
//!
//! fn main() -> chatsdk::Result<()> {
//!     // Standalone send, no storage involved
//!     chatsdk::send_message("Hello from Rust!")?;
//!
//!     // Store-backed instance
//!     let store = Arc::new(MemoryStore::new());
//!     let sdk = ChatSdk::new(store.clone())?;
//!
//!     sdk.send_message("msg1", "Hello from ChatSdk!")?;
//!     let message = sdk.get_message("msg1")?;
//!     println!("Retrieved: {:?}", message);
//!
//!     // Close explicitly; dropping also closes
//!     sdk.close()?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Linking
//!
//! The default `native` feature links against `libchatsdk` (see `build.rs`).
//! A build that could not find the library still compiles, but every call
//! that needs the native library fails with [`Error::NativeUnavailable`];
//! check [`is_linked`] up front. [`NativeApi::loopback()`] is an in-process
//! implementation of the same C surface for tests and demos, selected
//! explicitly through [`ChatSdkBuilder::native_api`].

pub mod callbacks;
pub mod error;
pub mod ffi;
pub mod registry;
pub mod sdk;
pub mod store;

// Re-export main types at the crate root
pub use error::{Error, Result};
pub use ffi::{is_linked, NativeApi};
pub use registry::{StoreRegistry, Token};
pub use sdk::{ChatSdk, ChatSdkBuilder};
pub use store::{MemoryStore, MessageStore};

/// Send a message through the native SDK without storing it.
///
/// Stateless: no instance, no registry entry. Uses [`NativeApi::linked()`].
pub fn send_message(message: &str) -> Result<()> {
    NativeApi::linked()?.send_standalone(message)
}
