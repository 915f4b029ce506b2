//! Key-value store trait for pluggable persistence backends.

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for flat key-value string stores (in-memory, file-backed).
///
/// Values are opaque strings (JSON by convention). Every write replaces the
/// whole value of a key; there are no partial or merge writes. Atomicity is
/// per key only: `set_nx` and `compare_and_swap` are the primitives used to
/// build race-free read-modify-write sequences.
#[async_trait]
pub trait KvStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., `"memory"`, `"file"`).
    fn provider_type(&self) -> &str;

    /// Get a value by key. Returns `None` if the key does not exist.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value, replacing any prior content.
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Delete a key. Returns `true` if the key existed.
    async fn delete(&self, key: &str) -> AppResult<bool>;

    /// Check whether a key exists.
    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// List every key starting with `prefix`, sorted ascending.
    async fn keys_with_prefix(&self, prefix: &str) -> AppResult<Vec<String>>;

    /// Set a value only if the key does not already exist.
    /// Returns `true` if the value was set, `false` if the key already existed.
    async fn set_nx(&self, key: &str, value: &str) -> AppResult<bool>;

    /// Atomically replace the value of `key` if it currently equals `expected`.
    ///
    /// `expected = None` means "the key must be absent"; `new = None` deletes
    /// the key. Returns `false` without writing when the current value differs.
    async fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&str>,
        new: Option<&str>,
    ) -> AppResult<bool>;

    /// Check that the backend is usable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Remove every key.
    async fn flush_all(&self) -> AppResult<()>;
}
