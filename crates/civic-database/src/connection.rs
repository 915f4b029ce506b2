//! Datastore handle shared by every repository.

use std::sync::Arc;

use tracing::info;

use civic_core::config::StoreConfig;
use civic_core::result::AppResult;
use civic_core::traits::store::KvStore;
use civic_store::{SlotCodec, StoreManager};

/// Wrapper around the configured key-value store and its codec.
#[derive(Debug, Clone)]
pub struct Datastore {
    /// Typed access to the store.
    codec: SlotCodec,
}

impl Datastore {
    /// Open the store described by configuration.
    pub async fn connect(config: &StoreConfig) -> AppResult<Self> {
        let manager = StoreManager::new(config).await?;
        info!(
            provider = manager.provider_type(),
            cas_attempts = config.cas_attempts,
            "Datastore ready"
        );
        Ok(Self::from_store(Arc::new(manager), config.cas_attempts))
    }

    /// Wrap an existing store (for testing).
    pub fn from_store(store: Arc<dyn KvStore>, cas_attempts: u32) -> Self {
        Self {
            codec: SlotCodec::new(store, cas_attempts),
        }
    }

    /// Return the typed codec.
    pub fn codec(&self) -> &SlotCodec {
        &self.codec
    }

    /// Return the raw store.
    pub fn store(&self) -> &Arc<dyn KvStore> {
        self.codec.store()
    }

    /// Check store availability.
    pub async fn health_check(&self) -> AppResult<bool> {
        self.store().health_check().await
    }
}
