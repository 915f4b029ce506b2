//! In-memory key-value store using dashmap.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use civic_core::result::AppResult;
use civic_core::traits::store::KvStore;

/// Process-local key-value store.
///
/// Every operation on a single key holds that key's shard lock for its whole
/// duration, so `set_nx` and `compare_and_swap` are atomic.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// The underlying concurrent map.
    entries: Arc<DashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<bool> {
        Ok(self.entries.remove(key).is_some())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.entries.contains_key(key))
    }

    async fn keys_with_prefix(&self, prefix: &str) -> AppResult<Vec<String>> {
        let mut keys: Vec<String> = self
            .entries
            .iter()
            .filter(|entry| entry.key().starts_with(prefix))
            .map(|entry| entry.key().clone())
            .collect();
        keys.sort();
        debug!(prefix, count = keys.len(), "Listed keys by prefix");
        Ok(keys)
    }

    async fn set_nx(&self, key: &str, value: &str) -> AppResult<bool> {
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(value.to_string());
                Ok(true)
            }
        }
    }

    async fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&str>,
        new: Option<&str>,
    ) -> AppResult<bool> {
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut slot) => {
                if expected != Some(slot.get().as_str()) {
                    return Ok(false);
                }
                match new {
                    Some(value) => {
                        slot.insert(value.to_string());
                    }
                    None => {
                        slot.remove();
                    }
                }
                Ok(true)
            }
            Entry::Vacant(slot) => {
                if expected.is_some() {
                    return Ok(false);
                }
                if let Some(value) = new {
                    slot.insert(value.to_string());
                }
                Ok(true)
            }
        }
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn flush_all(&self) -> AppResult<()> {
        self.entries.clear();
        Ok(())
    }
}
