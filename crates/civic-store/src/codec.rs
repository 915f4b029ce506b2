//! Typed JSON access to store slots.
//!
//! Reads are forgiving: a slot that is absent, holds JSON `null`, or holds
//! content that does not parse as the requested type reads as `None`, and
//! the corruption is logged rather than returned. Writes always replace the
//! whole slot.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use civic_core::error::AppError;
use civic_core::result::AppResult;
use civic_core::traits::store::KvStore;

/// Serializes typed records to and from a [`KvStore`].
#[derive(Debug, Clone)]
pub struct SlotCodec {
    /// Backing store.
    store: Arc<dyn KvStore>,
    /// Attempts made by [`SlotCodec::update`] before reporting a conflict.
    cas_attempts: u32,
}

impl SlotCodec {
    /// Create a codec over a store.
    pub fn new(store: Arc<dyn KvStore>, cas_attempts: u32) -> Self {
        Self {
            store,
            cas_attempts: cas_attempts.max(1),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<dyn KvStore> {
        &self.store
    }

    fn decode<T: DeserializeOwned>(key: &str, raw: &str) -> Option<T> {
        match serde_json::from_str::<Option<T>>(raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Ignoring malformed slot content");
                None
            }
        }
    }

    /// Read and deserialize a slot.
    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let raw = self.store.get(key).await?;
        Ok(raw.and_then(|raw| Self::decode(key, &raw)))
    }

    /// Read a slot, falling back to `T::default()`.
    pub async fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> AppResult<T> {
        Ok(self.load(key).await?.unwrap_or_default())
    }

    /// Read every well-formed record whose key starts with `prefix`, in key order.
    pub async fn load_prefix<T: DeserializeOwned>(&self, prefix: &str) -> AppResult<Vec<T>> {
        let keys = self.store.keys_with_prefix(prefix).await?;
        let mut records = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(record) = self.load(&key).await? {
                records.push(record);
            }
        }
        debug!(prefix, count = records.len(), "Loaded records by prefix");
        Ok(records)
    }

    /// Serialize and replace a slot.
    pub async fn save<T: Serialize + Sync>(&self, key: &str, value: &T) -> AppResult<()> {
        let json = serde_json::to_string(value)?;
        self.store.set(key, &json).await
    }

    /// Write a slot unless it already holds a well-formed value.
    /// Returns whether it was written.
    ///
    /// Malformed content counts as absent and is replaced.
    pub async fn insert_new<T>(&self, key: &str, value: &T) -> AppResult<bool>
    where
        T: Serialize + DeserializeOwned + Sync,
    {
        let json = serde_json::to_string(value)?;
        if self.store.set_nx(key, &json).await? {
            return Ok(true);
        }
        let Some(raw) = self.store.get(key).await? else {
            return self.store.set_nx(key, &json).await;
        };
        if Self::decode::<T>(key, &raw).is_some() {
            return Ok(false);
        }
        warn!(key, "Replacing malformed slot content");
        self.store
            .compare_and_swap(key, Some(&raw), Some(&json))
            .await
    }

    /// Delete a slot. Returns whether it existed.
    pub async fn remove(&self, key: &str) -> AppResult<bool> {
        self.store.delete(key).await
    }

    /// Atomically read-modify-write one slot.
    ///
    /// `apply` receives the current value and returns the replacement. When
    /// another writer changes the slot in between, the fresh value is re-read
    /// and `apply` runs again. Returns `None` without writing if the slot is
    /// absent or unreadable; an error from `apply` aborts without writing.
    pub async fn update<T, F>(&self, key: &str, mut apply: F) -> AppResult<Option<T>>
    where
        T: Serialize + DeserializeOwned + Send,
        F: FnMut(T) -> AppResult<T> + Send,
    {
        for attempt in 1..=self.cas_attempts {
            let Some(raw) = self.store.get(key).await? else {
                return Ok(None);
            };
            let Some(current) = Self::decode::<T>(key, &raw) else {
                return Ok(None);
            };

            let next = apply(current)?;
            let json = serde_json::to_string(&next)?;
            if self
                .store
                .compare_and_swap(key, Some(&raw), Some(&json))
                .await?
            {
                return Ok(Some(next));
            }
            debug!(key, attempt, "Slot changed concurrently, retrying update");
        }

        warn!(key, attempts = self.cas_attempts, "Giving up on contended slot");
        Err(AppError::conflict(format!(
            "Record was modified concurrently: {key}"
        )))
    }
}
