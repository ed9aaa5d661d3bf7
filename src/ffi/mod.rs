//! FFI bindings to libchatsdk.
//!
//! This module contains low-level C bindings. Users should prefer the
//! safe Rust wrappers in the parent modules.

pub mod api;
pub mod error;
pub mod handles;
pub mod loopback;
pub mod raw;
pub mod string;

pub use api::{is_linked, NativeApi};
pub use error::check_status;
pub use handles::*;
pub use raw::*;
