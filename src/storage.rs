//! The key-value persistence boundary.

use alloc::collections::BTreeMap;
use alloc::string::String;

/// Plain string key-value store exposed to the UI layer.
///
/// `set_item` overwrites, and removing a missing key is a no-op. Whether data
/// outlives the process, and what `clear` reaches beyond this handle, is up to
/// the implementation.
pub trait KeyValueStore {
    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str);

    /// Value stored under `key`, if any.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Remove `key`. Does nothing if it is absent.
    fn remove_item(&mut self, key: &str);

    /// Remove every key.
    fn clear(&mut self);
}

/// In-memory [`KeyValueStore`]. Nothing is persisted.
///
/// ```rust
/// use pixelwire::{KeyValueStore, MemoryStore};
///
/// let mut store = MemoryStore::new();
/// store.set_item("theme", "dark");
/// assert_eq!(store.get_item("theme").as_deref(), Some("dark"));
/// store.remove_item("theme");
/// assert!(store.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn set_item(&mut self, key: &str, value: &str) {
        log::trace!("store: set {:?} ({} bytes)", key, value.len());
        self.items.insert(key.into(), value.into());
    }

    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn remove_item(&mut self, key: &str) {
        self.items.remove(key);
    }

    fn clear(&mut self) {
        log::trace!("store: clear {} keys", self.items.len());
        self.items.clear();
    }
}
