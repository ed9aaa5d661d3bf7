//! Error types for the chatsdk crate.

use thiserror::Error;

/// Result type alias for chatsdk operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for chatsdk operations.
#[derive(Error, Debug)]
pub enum Error {
    /// No message store was supplied to the builder.
    #[error("message store is required")]
    MissingStore,

    /// Function argument is invalid.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// This build does not link libchatsdk.
    #[error("libchatsdk is not linked into this build")]
    NativeUnavailable,

    /// The native library did not create an SDK instance.
    #[error("failed to create ChatSDK instance")]
    CreateFailed,

    /// The SDK instance was already closed.
    #[error("ChatSDK instance is closed")]
    Closed,

    /// The native library reported a nonzero status.
    #[error("failed to send message (status {0})")]
    SendFailed(i32),

    /// Every store token has been issued.
    #[error("store registry tokens exhausted")]
    TokensExhausted,
}

impl Error {
    /// Check if this is a closed-instance error.
    pub fn is_closed(&self) -> bool {
        matches!(self, Error::Closed)
    }

    /// Check if the native library is missing from this build.
    pub fn is_native_unavailable(&self) -> bool {
        matches!(self, Error::NativeUnavailable)
    }

    /// Check if the native library rejected the operation.
    pub fn is_send_failed(&self) -> bool {
        matches!(self, Error::SendFailed(_))
    }
}
