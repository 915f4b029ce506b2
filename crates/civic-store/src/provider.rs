//! Store manager that dispatches to the configured backend.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use civic_core::config::StoreConfig;
use civic_core::error::AppError;
use civic_core::result::AppResult;
use civic_core::traits::store::KvStore;

/// Store manager that wraps the configured key-value backend.
///
/// The backend is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct StoreManager {
    /// The inner backend.
    inner: Arc<dyn KvStore>,
}

impl StoreManager {
    /// Create a new store manager from configuration.
    pub async fn new(config: &StoreConfig) -> AppResult<Self> {
        let inner: Arc<dyn KvStore> = match config.provider.as_str() {
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory store");
                Arc::new(crate::memory::MemoryStore::new())
            }
            #[cfg(feature = "file")]
            "file" => {
                info!(directory = %config.directory, "Initializing file store");
                Arc::new(crate::file::FileStore::new(&config.directory).await?)
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown store provider: '{other}'. Supported: memory, file"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Create a store manager from an existing backend (for testing).
    pub fn from_provider(provider: Arc<dyn KvStore>) -> Self {
        Self { inner: provider }
    }

    /// Get a reference to the inner backend.
    pub fn provider(&self) -> &dyn KvStore {
        self.inner.as_ref()
    }
}

#[async_trait]
impl KvStore for StoreManager {
    fn provider_type(&self) -> &str {
        self.inner.provider_type()
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.inner.set(key, value).await
    }

    async fn delete(&self, key: &str) -> AppResult<bool> {
        self.inner.delete(key).await
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        self.inner.exists(key).await
    }

    async fn keys_with_prefix(&self, prefix: &str) -> AppResult<Vec<String>> {
        self.inner.keys_with_prefix(prefix).await
    }

    async fn set_nx(&self, key: &str, value: &str) -> AppResult<bool> {
        self.inner.set_nx(key, value).await
    }

    async fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&str>,
        new: Option<&str>,
    ) -> AppResult<bool> {
        self.inner.compare_and_swap(key, expected, new).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }

    async fn flush_all(&self) -> AppResult<()> {
        self.inner.flush_all().await
    }
}
