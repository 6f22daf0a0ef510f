//! Single-entry result cache

use super::types::RequestKey;

/// Holds at most one value. Inserting under a new key discards the
/// previous entry.
#[derive(Debug, Clone)]
pub struct SingleSlotCache<T> {
    slot: Option<(RequestKey, T)>,
}

impl<T> Default for SingleSlotCache<T> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<T: Clone> SingleSlotCache<T> {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Value stored under `key`, if that is the key currently held
    pub fn get(&self, key: &RequestKey) -> Option<T> {
        match &self.slot {
            Some((k, value)) if k == key => Some(value.clone()),
            _ => None,
        }
    }

    /// Store `value`, replacing whatever was cached
    pub fn insert(&mut self, key: RequestKey, value: T) {
        self.slot = Some((key, value));
    }

    /// Drop the cached entry
    pub fn invalidate(&mut self) {
        self.slot = None;
    }

    /// Key of the cached entry
    pub fn key(&self) -> Option<&RequestKey> {
        self.slot.as_ref().map(|(k, _)| k)
    }

    /// Whether no entry is cached
    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }
}
