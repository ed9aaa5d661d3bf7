//! Build script for the chatsdk crate.
//!
//! With the `native` feature enabled, links against libchatsdk. The library
//! directory defaults to `../c-bindings` (next to the Go and C bindings of the
//! SDK) and can be overridden with `CHATSDK_LIB_DIR`. Set `CHATSDK_STATIC=1`
//! to link the static archive instead of the shared library.
//!
//! If the library cannot be found, the build warns and nothing is linked:
//! `NativeApi::linked()` then fails at runtime with `NativeUnavailable`
//! instead of silently substituting another implementation. Without the
//! `native` feature, nothing is linked either.

use std::env;
use std::path::{Path, PathBuf};

fn main() {
    println!("cargo:rerun-if-env-changed=CHATSDK_LIB_DIR");
    println!("cargo:rerun-if-env-changed=CHATSDK_STATIC");
    println!("cargo::rustc-check-cfg=cfg(chatsdk_linked)");

    if env::var_os("CARGO_FEATURE_NATIVE").is_none() {
        return;
    }

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let lib_dir = env::var_os("CHATSDK_LIB_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| manifest_dir.join("../c-bindings"));

    println!("cargo:rerun-if-changed={}", lib_dir.display());

    let kind = if link_static() { "static" } else { "dylib" };
    if !has_library(&lib_dir, kind) {
        println!(
            "cargo:warning=libchatsdk not found in {}; building without the native \
             library. Set CHATSDK_LIB_DIR to the directory containing libchatsdk",
            lib_dir.display()
        );
        return;
    }

    println!("cargo:rustc-link-search=native={}", lib_dir.display());
    println!("cargo:rustc-link-lib={}=chatsdk", kind);
    println!("cargo:rustc-cfg=chatsdk_linked");

    // The native library is compiled from Nim and pulls in the C runtime's
    // threading and dynamic loading support when linked statically.
    if kind == "static" {
        #[cfg(target_os = "linux")]
        {
            println!("cargo:rustc-link-lib=pthread");
            println!("cargo:rustc-link-lib=dl");
            println!("cargo:rustc-link-lib=m");
        }
    }

    emit_rerun_if_changed_lib(&lib_dir);
}

/// Whether `CHATSDK_STATIC` requests a static link.
fn link_static() -> bool {
    env::var("CHATSDK_STATIC")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Check if `dir` holds a libchatsdk artifact of the requested kind.
fn has_library(dir: &Path, kind: &str) -> bool {
    let candidates: &[&str] = if kind == "static" {
        &["libchatsdk.a", "chatsdk.lib"]
    } else {
        &["libchatsdk.so", "libchatsdk.dylib", "chatsdk.dll", "chatsdk.lib"]
    };
    candidates.iter().any(|name| dir.join(name).is_file())
}

/// Emit cargo:rerun-if-changed for every libchatsdk artifact in a directory.
fn emit_rerun_if_changed_lib(dir: &Path) {
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            let is_lib = path
                .file_name()
                .and_then(|n| n.to_str())
                .map_or(false, |n| n.starts_with("libchatsdk") || n.starts_with("chatsdk."));
            if is_lib {
                println!("cargo:rerun-if-changed={}", path.display());
            }
        }
    }
}
