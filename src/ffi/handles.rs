//! Handle types for opaque references to native objects.

use std::marker::{PhantomData, PhantomPinned};
use std::ptr;

/// Opaque native SDK state (`typedef struct ChatSDK ChatSDK`).
#[repr(C)]
pub struct ChatSDK {
    _data: [u8; 0],
    _marker: PhantomData<(*mut u8, PhantomPinned)>,
}

/// Owned pointer to a native SDK instance.
///
/// Neither `Clone` nor `Copy`: exactly one owner may release the pointer,
/// and taking the pointer out for release leaves a null handle behind.
///
/// ```compile_fail
/// use chatsdk::ffi::SdkHandle;
///
/// fn duplicate(h: SdkHandle) -> (SdkHandle, SdkHandle) {
///     (h, h)
/// }
/// ```
#[repr(transparent)]
#[derive(Debug, PartialEq, Eq)]
pub struct SdkHandle {
    ptr: *mut ChatSDK,
}

impl SdkHandle {
    /// Wrap a pointer returned by the native constructor.
    #[inline]
    pub(crate) const fn from_raw(ptr: *mut ChatSDK) -> Self {
        Self { ptr }
    }

    /// Create an invalid (null) handle.
    #[inline]
    pub const fn invalid() -> Self {
        Self {
            ptr: ptr::null_mut(),
        }
    }

    /// Check if this handle is valid (non-null).
    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.ptr.is_null()
    }

    /// Borrow the pointer for a call; ownership stays with the handle.
    #[inline]
    pub const fn as_ptr(&self) -> *mut ChatSDK {
        self.ptr
    }

    /// Give up ownership of the pointer, leaving the handle invalid.
    #[inline]
    pub(crate) fn take(&mut self) -> *mut ChatSDK {
        std::mem::replace(&mut self.ptr, ptr::null_mut())
    }
}

impl Default for SdkHandle {
    fn default() -> Self {
        Self::invalid()
    }
}
