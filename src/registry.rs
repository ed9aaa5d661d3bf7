//! Token registry for message stores.
//!
//! Native code can only carry a `void*` back into the callbacks, so stores are
//! registered here under a small integer [`Token`] and that integer travels as
//! the user data pointer. The native side never holds a reference to a Rust
//! object: a token whose entry is gone simply resolves to nothing.

use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroUsize;
use std::os::raw::c_void;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::store::MessageStore;

/// Opaque, process-unique identifier of a registered store.
///
/// Tokens are never zero, so a null user data pointer never names a store.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token(NonZeroUsize);

impl Token {
    /// The integer value of the token.
    #[inline]
    pub fn get(self) -> usize {
        self.0.get()
    }

    /// Encode the token as the user data pointer handed to native code.
    #[inline]
    pub fn to_user_data(self) -> *mut c_void {
        self.0.get() as *mut c_void
    }

    /// Decode a user data pointer; `None` for null.
    #[inline]
    pub fn from_user_data(user_data: *mut c_void) -> Option<Self> {
        NonZeroUsize::new(user_data as usize).map(Self)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct Entries {
    last: usize,
    stores: HashMap<Token, Arc<dyn MessageStore>>,
}

/// Table mapping tokens to live stores.
pub struct StoreRegistry {
    inner: RwLock<Entries>,
}

static GLOBAL: LazyLock<StoreRegistry> = LazyLock::new(StoreRegistry::new);

impl StoreRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Entries {
                last: 0,
                stores: HashMap::new(),
            }),
        }
    }

    /// The registry the native callbacks resolve tokens against.
    pub fn global() -> &'static StoreRegistry {
        &GLOBAL
    }

    /// Register a store under a fresh token.
    ///
    /// Tokens increase strictly; once the counter would overflow, registration
    /// fails instead of reusing a token.
    pub fn register(&self, store: Arc<dyn MessageStore>) -> Result<Token> {
        let mut inner = self.inner.write();
        let next = inner
            .last
            .checked_add(1)
            .and_then(NonZeroUsize::new)
            .ok_or(Error::TokensExhausted)?;
        let token = Token(next);
        inner.last = next.get();
        inner.stores.insert(token, store);
        Ok(token)
    }

    /// Resolve a token. The registry lock is not held once this returns.
    pub fn lookup(&self, token: Token) -> Option<Arc<dyn MessageStore>> {
        self.inner.read().stores.get(&token).cloned()
    }

    /// Remove a token. Removing an absent token is a no-op.
    pub fn unregister(&self, token: Token) -> Option<Arc<dyn MessageStore>> {
        self.inner.write().stores.remove(&token)
    }

    /// Check if a token currently resolves.
    pub fn contains(&self, token: Token) -> bool {
        self.inner.read().stores.contains_key(&token)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.inner.read().stores.len()
    }

    /// Check if no store is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[cfg(test)]
    fn with_last_issued(last: usize) -> Self {
        let registry = Self::new();
        registry.inner.write().last = last;
        registry
    }
}

impl Default for StoreRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StoreRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("StoreRegistry")
            .field("last", &inner.last)
            .field("entries", &inner.stores.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::collections::HashSet;
    use std::thread;

    fn memory() -> Arc<dyn MessageStore> {
        Arc::new(MemoryStore::new())
    }

    #[test]
    fn test_tokens_increase() {
        let registry = StoreRegistry::new();
        let a = registry.register(memory()).unwrap();
        let b = registry.register(memory()).unwrap();
        assert!(b > a);
        registry.unregister(b);
        let c = registry.register(memory()).unwrap();
        assert!(c > b, "tokens must not be reused after removal");
    }

    #[test]
    fn test_lookup_and_unregister() {
        let registry = StoreRegistry::new();
        let store = Arc::new(MemoryStore::new());
        store.store_message("m1", "hello");
        let token = registry.register(store).unwrap();

        let found = registry.lookup(token).expect("registered token resolves");
        assert_eq!(found.get_message("m1").as_deref(), Some("hello"));

        assert!(registry.unregister(token).is_some());
        assert!(registry.lookup(token).is_none());
        assert!(registry.unregister(token).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_user_data_round_trip() {
        let registry = StoreRegistry::new();
        let token = registry.register(memory()).unwrap();
        assert_eq!(Token::from_user_data(token.to_user_data()), Some(token));
        assert_eq!(Token::from_user_data(std::ptr::null_mut()), None);
    }

    #[test]
    fn test_exhausted_tokens() {
        let registry = StoreRegistry::with_last_issued(usize::MAX - 1);
        let last = registry.register(memory()).unwrap();
        assert_eq!(last.get(), usize::MAX);
        assert!(matches!(
            registry.register(memory()),
            Err(Error::TokensExhausted)
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_concurrent_register() {
        let registry = Arc::new(StoreRegistry::new());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    (0..32)
                        .map(|_| registry.register(memory()).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for token in handle.join().unwrap() {
                assert!(seen.insert(token), "duplicate token {}", token);
            }
        }
        assert_eq!(seen.len(), 16 * 32);
        assert_eq!(registry.len(), 16 * 32);
    }
}
