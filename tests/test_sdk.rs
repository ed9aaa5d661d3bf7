//! Store-backed ChatSdk behavior.

use std::sync::Arc;

use chatsdk::{ChatSdk, Error, MemoryStore, MessageStore, NativeApi, StoreRegistry};

/// An instance on the in-process loopback library.
fn loopback_sdk(store: Arc<dyn MessageStore>) -> ChatSdk {
    ChatSdk::builder()
        .store(store)
        .native_api(NativeApi::loopback())
        .build()
        .expect("build should succeed")
}

/// Accepts nothing, finds nothing.
struct ReadOnlyStore;

impl MessageStore for ReadOnlyStore {
    fn store_message(&self, _id: &str, _message: &str) -> bool {
        false
    }

    fn get_message(&self, _id: &str) -> Option<String> {
        None
    }
}

#[test]
fn test_send_then_get_then_close() {
    let store = Arc::new(MemoryStore::new());
    let sdk = loopback_sdk(store.clone());

    sdk.send_message("m1", "hello").expect("send should succeed");
    assert_eq!(store.get_message("m1").as_deref(), Some("hello"));
    assert_eq!(sdk.get_message("m1").unwrap().as_deref(), Some("hello"));

    sdk.close().expect("close should succeed");

    let err = sdk.send_message("m1", "x").unwrap_err();
    assert!(err.is_closed(), "send after close: {:?}", err);

    // Closed is an error, not "not found"
    let err = sdk.get_message("m1").unwrap_err();
    assert!(err.is_closed(), "get after close: {:?}", err);
}

#[test]
fn test_get_missing_is_not_an_error() {
    let sdk = loopback_sdk(Arc::new(MemoryStore::new()));
    assert_eq!(sdk.get_message("missing").expect("get should succeed"), None);
}

#[test]
fn test_round_trip_preserves_message() {
    let sdk = loopback_sdk(Arc::new(MemoryStore::new()));

    let messages = [
        ("msg1", "Hello from ChatSdk!"),
        ("msg2", "This message will be stored and can be retrieved"),
        ("msg3", "Nim ❤️ Rust with storage interface working!"),
        ("msg 4/with:odd-id", "  leading and trailing spaces  "),
    ];

    for (id, message) in messages {
        sdk.send_message(id, message).expect("send should succeed");
    }
    for (id, message) in messages {
        assert_eq!(sdk.get_message(id).unwrap().as_deref(), Some(message));
    }
}

#[test]
fn test_empty_message_reads_as_missing() {
    let store = Arc::new(MemoryStore::new());
    let sdk = loopback_sdk(store.clone());

    sdk.send_message("blank", "").expect("send should succeed");
    assert_eq!(store.get_message("blank").as_deref(), Some(""));
    assert_eq!(sdk.get_message("blank").unwrap(), None);
}

#[test]
fn test_rejecting_store_fails_send() {
    let sdk = loopback_sdk(Arc::new(ReadOnlyStore));

    // The token resolves, so the failure comes from the store itself.
    assert!(StoreRegistry::global().lookup(sdk.token()).is_some());

    let err = sdk.send_message("m1", "hello").unwrap_err();
    assert!(matches!(err, Error::SendFailed(1)), "got {:?}", err);
}

#[test]
fn test_instances_are_isolated() {
    let store_a = Arc::new(MemoryStore::new());
    let store_b = Arc::new(MemoryStore::new());
    let sdk_a = loopback_sdk(store_a.clone());
    let sdk_b = loopback_sdk(store_b.clone());
    assert_ne!(sdk_a.token(), sdk_b.token());

    sdk_a.send_message("m1", "from a").unwrap();
    sdk_b.send_message("m1", "from b").unwrap();

    assert_eq!(sdk_a.get_message("m1").unwrap().as_deref(), Some("from a"));
    assert_eq!(sdk_b.get_message("m1").unwrap().as_deref(), Some("from b"));
    assert_eq!(store_a.len(), 1);
    assert_eq!(store_b.len(), 1);

    sdk_a.close().unwrap();
    assert_eq!(sdk_b.get_message("m1").unwrap().as_deref(), Some("from b"));
}

#[test]
fn test_close_is_idempotent() {
    let sdk = loopback_sdk(Arc::new(MemoryStore::new()));
    sdk.close().expect("first close should succeed");
    sdk.close().expect("second close should succeed");
    assert!(sdk.is_closed());
}

#[test]
fn test_store_outlives_instance() {
    let store = Arc::new(MemoryStore::new());
    {
        let sdk = loopback_sdk(store.clone());
        sdk.send_message("kept", "after drop").unwrap();
        assert!(Arc::ptr_eq(
            &(store.clone() as Arc<dyn MessageStore>),
            sdk.store()
        ));
    }
    assert_eq!(Arc::strong_count(&store), 1);
    assert_eq!(store.messages(), vec![("kept".to_string(), "after drop".to_string())]);
}
