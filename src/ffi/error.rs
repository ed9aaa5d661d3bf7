//! Status conversion utilities for FFI.

use super::raw::{ChatSdkStatus, CHATSDK_OK};
use crate::error::{Error, Result};

/// Check a native status code and convert to Result.
pub fn check_status(code: ChatSdkStatus) -> Result<()> {
    if code == CHATSDK_OK {
        Ok(())
    } else {
        Err(Error::SendFailed(code))
    }
}
