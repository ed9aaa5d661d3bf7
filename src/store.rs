//! Message storage capability.

use std::collections::HashMap;

use parking_lot::RwLock;

/// Storage the native SDK calls back into.
///
/// Implementations are invoked from native threads, possibly concurrently,
/// through the callbacks in [`crate::callbacks`].
///
/// # Example
///
/// ```
/// use chatsdk::MessageStore;
/// use std::collections::HashMap;
/// use std::sync::Mutex;
///
/// struct Journal(Mutex<HashMap<String, String>>);
///
/// impl MessageStore for Journal {
///     fn store_message(&self, id: &str, message: &str) -> bool {
///         self.0.lock().unwrap().insert(id.to_string(), message.to_string());
///         true
///     }
///
///     fn get_message(&self, id: &str) -> Option<String> {
///         self.0.lock().unwrap().get(id).cloned()
///     }
/// }
/// ```
pub trait MessageStore: Send + Sync {
    /// Persist `message` under `id`. Returns `false` to reject it.
    fn store_message(&self, id: &str, message: &str) -> bool;

    /// Look up the message stored under `id`.
    ///
    /// An empty message is indistinguishable from `None` once it crosses the
    /// native boundary.
    fn get_message(&self, id: &str) -> Option<String>;
}

/// In-memory [`MessageStore`] backed by a hash map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    messages: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored messages.
    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    /// Check if no message has been stored.
    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }

    /// Snapshot of all stored messages, sorted by id.
    pub fn messages(&self) -> Vec<(String, String)> {
        let mut all: Vec<_> = self
            .messages
            .read()
            .iter()
            .map(|(id, message)| (id.clone(), message.clone()))
            .collect();
        all.sort();
        all
    }
}

impl MessageStore for MemoryStore {
    fn store_message(&self, id: &str, message: &str) -> bool {
        self.messages
            .write()
            .insert(id.to_string(), message.to_string());
        true
    }

    fn get_message(&self, id: &str) -> Option<String> {
        self.messages.read().get(id).cloned()
    }
}
