//! C string marshalling.
//!
//! Strings handed to native code for the duration of a call are `CString`s
//! owned by the caller. Strings whose ownership crosses the boundary are
//! allocated with `malloc` so the receiving side can release them with
//! `free()`.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::error::{Error, Result};

/// Build a transient C string for an outgoing call argument.
pub fn to_c_string(what: &str, value: &str) -> Result<CString> {
    CString::new(value)
        .map_err(|_| Error::InvalidArgument(format!("{} contains a null byte", what)))
}

/// Copy a borrowed C string into an owned Rust string.
///
/// # Safety
///
/// `ptr` must be non-null and point to a NUL-terminated string.
pub unsafe fn copy_lossy(ptr: *const c_char) -> String {
    CStr::from_ptr(ptr).to_string_lossy().into_owned()
}

/// Allocate a NUL-terminated copy of `value` with `malloc`.
///
/// Returns null if `value` contains an interior NUL or the allocation fails.
/// The returned pointer must be released with `free()`.
pub fn malloc_c_string(value: &str) -> *mut c_char {
    let bytes = value.as_bytes();
    if bytes.contains(&0) {
        return ptr::null_mut();
    }

    unsafe {
        let buf = libc::malloc(bytes.len() + 1).cast::<c_char>();
        if buf.is_null() {
            return ptr::null_mut();
        }
        ptr::copy_nonoverlapping(bytes.as_ptr().cast::<c_char>(), buf, bytes.len());
        *buf.add(bytes.len()) = 0;
        buf
    }
}

/// Release a string allocated by [`malloc_c_string`] (or any `malloc`).
///
/// # Safety
///
/// `ptr` must be null or a live `malloc` allocation not freed elsewhere.
pub unsafe fn free_c_string(ptr: *const c_char) {
    if !ptr.is_null() {
        libc::free(ptr as *mut libc::c_void);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malloc_c_string_copies_bytes() {
        let ptr = malloc_c_string("héllo");
        assert!(!ptr.is_null());
        unsafe {
            assert_eq!(copy_lossy(ptr), "héllo");
            free_c_string(ptr);
        }
    }

    #[test]
    fn test_malloc_c_string_rejects_interior_nul() {
        assert!(malloc_c_string("a\0b").is_null());
    }

    #[test]
    fn test_to_c_string_reports_argument() {
        let err = to_c_string("id", "x\0y").unwrap_err();
        assert!(err.to_string().contains("id"));
        assert_eq!(to_c_string("id", "m1").unwrap().as_bytes(), b"m1");
    }
}
