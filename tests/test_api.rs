//! Standalone send and native API table tests.
//!
//! Instance tests select the loopback library explicitly and need no native
//! install. Calls on the default path must reach libchatsdk or fail loudly.

use std::os::raw::{c_char, c_int};
use std::sync::Arc;

use chatsdk::ffi::loopback;
use chatsdk::{ChatSdk, Error, MemoryStore, MessageStore, NativeApi, StoreRegistry};

/// An instance on the in-process loopback library.
fn loopback_sdk(store: Arc<dyn MessageStore>) -> ChatSdk {
    ChatSdk::builder()
        .store(store)
        .native_api(NativeApi::loopback())
        .build()
        .expect("build should succeed")
}

unsafe extern "C" fn failing_standalone(_message: *const c_char) -> c_int {
    3
}

#[test]
fn test_send_message_standalone() {
    let result = chatsdk::send_message("Hello from standalone API!");
    if chatsdk::is_linked() {
        result.expect("standalone send should succeed");
    } else {
        let err = result.unwrap_err();
        assert!(err.is_native_unavailable(), "got {:?}", err);
    }
}

#[test]
fn test_default_path_never_uses_loopback() {
    if chatsdk::is_linked() {
        println!("Skipping: libchatsdk is linked into this build");
        return;
    }

    let err = chatsdk::send_message("goes nowhere").unwrap_err();
    assert!(matches!(err, Error::NativeUnavailable), "got {:?}", err);

    let store = Arc::new(MemoryStore::new());
    let err = ChatSdk::new(store.clone()).unwrap_err();
    assert!(matches!(err, Error::NativeUnavailable), "got {:?}", err);
    assert!(store.is_empty());
    assert_eq!(Arc::strong_count(&store), 1);

    assert!(matches!(NativeApi::linked(), Err(Error::NativeUnavailable)));
}

#[test]
fn test_send_standalone_loopback() {
    NativeApi::loopback()
        .send_standalone("This message won't be stored")
        .expect("standalone send should succeed");
}

#[test]
fn test_send_standalone_nonzero_status() {
    let api = NativeApi {
        send_standalone: failing_standalone,
        ..NativeApi::loopback()
    };

    let err = api.send_standalone("hello").unwrap_err();
    assert!(err.is_send_failed(), "expected SendFailed, got {:?}", err);
    assert_eq!(err.to_string(), "failed to send message (status 3)");
}

#[test]
fn test_standalone_does_not_touch_store() {
    let store = Arc::new(MemoryStore::new());
    let sdk = loopback_sdk(store.clone());

    NativeApi::loopback()
        .send_standalone("not stored")
        .expect("standalone send should succeed");
    assert!(store.is_empty(), "standalone send must not reach any store");
    assert!(StoreRegistry::global().contains(sdk.token()));

    sdk.close().expect("close should succeed");
}

#[test]
fn test_explicit_loopback_table() {
    let api = NativeApi {
        free_string: loopback::free_string,
        ..NativeApi::loopback()
    };
    let store = Arc::new(MemoryStore::new());
    let sdk = ChatSdk::builder()
        .store(store)
        .native_api(api)
        .build()
        .expect("build should succeed");

    sdk.send_message("m1", "hello").expect("send should succeed");
    assert_eq!(sdk.get_message("m1").unwrap().as_deref(), Some("hello"));
}
