//! Directory-backed key-value store.
//!
//! Each key is one file whose name is the URL-safe base64 encoding of the
//! key. Keys whose encoding would exceed [`MAX_NAME_LEN`] are stored under
//! `~` plus the SHA-256 of the key instead, with the key itself on the first
//! line of the file. Writes go to a hidden temp file in the same directory and are then
//! renamed over the target, so a reader sees either the old or the new value
//! in full. Mutations are serialized by an async mutex; there is no
//! cross-process locking.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use civic_core::error::{AppError, ErrorKind};
use civic_core::result::AppResult;
use civic_core::traits::store::KvStore;

/// Prefix of in-flight temp files. `.` is outside the URL-safe alphabet, so
/// temp files never decode as keys.
const TEMP_PREFIX: &str = ".tmp-";

/// Prefix of digest-named files. `~` is outside the URL-safe alphabet too.
const DIGEST_PREFIX: &str = "~";

/// Longest encoded file name used before switching to a digest name.
/// Stays well under the common 255-byte limit with the temp prefix added.
pub const MAX_NAME_LEN: usize = 200;

/// File-per-key store rooted at a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Directory holding one file per key.
    root: PathBuf,
    /// Serializes every mutation within this process.
    write_lock: Arc<Mutex<()>>,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `root_path`.
    pub async fn new(root_path: impl AsRef<Path>) -> AppResult<Self> {
        let root = root_path.as_ref().to_path_buf();
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create store directory: {}", root.display()),
                e,
            )
        })?;
        Ok(Self {
            root,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    /// The directory this store writes to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File name for `key`, and whether the key is embedded in the content.
    fn file_name(key: &str) -> (String, bool) {
        let encoded = URL_SAFE_NO_PAD.encode(key);
        if encoded.len() <= MAX_NAME_LEN {
            return (encoded, false);
        }
        let mut hasher = Sha256::new();
        hasher.update(key.as_bytes());
        (format!("{DIGEST_PREFIX}{:x}", hasher.finalize()), true)
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(Self::file_name(key).0)
    }

    fn decode_name(name: &str) -> Option<String> {
        let bytes = URL_SAFE_NO_PAD.decode(name).ok()?;
        String::from_utf8(bytes).ok()
    }

    /// Split digest-file content into its embedded key and value.
    fn split_embedded(content: &str) -> Option<(&str, &str)> {
        content.split_once('\n')
    }

    async fn read_file(&self, path: &Path, key: &str) -> AppResult<Option<String>> {
        match fs::read_to_string(path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read key: {key}"),
                e,
            )),
        }
    }

    async fn read_raw(&self, key: &str) -> AppResult<Option<String>> {
        let (name, embedded) = Self::file_name(key);
        let Some(content) = self.read_file(&self.root.join(&name), key).await? else {
            return Ok(None);
        };
        if !embedded {
            return Ok(Some(content));
        }
        match Self::split_embedded(&content) {
            Some((stored, value)) if stored == key => Ok(Some(value.to_string())),
            _ => {
                warn!(file = %name, "Digest file does not hold the requested key");
                Ok(None)
            }
        }
    }

    /// Replace the file for `key` in one rename.
    async fn write_raw(&self, key: &str, value: &str) -> AppResult<()> {
        let (name, embedded) = Self::file_name(key);
        let target = self.root.join(&name);
        let temp = self.root.join(format!("{TEMP_PREFIX}{name}"));
        let content = if embedded {
            format!("{key}\n{value}")
        } else {
            value.to_string()
        };

        fs::write(&temp, content).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write key: {key}"),
                e,
            )
        })?;
        fs::rename(&temp, &target).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to replace key: {key}"),
                e,
            )
        })?;

        debug!(key, bytes = value.len(), "Wrote key");
        Ok(())
    }

    async fn remove_raw(&self, key: &str) -> AppResult<bool> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete key: {key}"),
                e,
            )),
        }
    }

    async fn all_keys(&self) -> AppResult<Vec<String>> {
        let mut dir = fs::read_dir(&self.root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to list store directory: {}", self.root.display()),
                e,
            )
        })?;

        let mut keys = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with(TEMP_PREFIX) {
                continue;
            }
            let key = if name.starts_with(DIGEST_PREFIX) {
                self.read_file(&entry.path(), &name)
                    .await?
                    .and_then(|content| {
                        Self::split_embedded(&content).map(|(key, _)| key.to_string())
                    })
            } else {
                Self::decode_name(&name)
            };
            match key {
                Some(key) => keys.push(key),
                None => warn!(file = %name, "Ignoring foreign file in store directory"),
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[async_trait]
impl KvStore for FileStore {
    fn provider_type(&self) -> &str {
        "file"
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.read_raw(key).await
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        self.write_raw(key, value).await
    }

    async fn delete(&self, key: &str) -> AppResult<bool> {
        let _guard = self.write_lock.lock().await;
        self.remove_raw(key).await
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(fs::try_exists(self.path_for(key)).await?)
    }

    async fn keys_with_prefix(&self, prefix: &str) -> AppResult<Vec<String>> {
        let keys = self
            .all_keys()
            .await?
            .into_iter()
            .filter(|k| k.starts_with(prefix))
            .collect();
        Ok(keys)
    }

    async fn set_nx(&self, key: &str, value: &str) -> AppResult<bool> {
        let _guard = self.write_lock.lock().await;
        if self.read_raw(key).await?.is_some() {
            return Ok(false);
        }
        self.write_raw(key, value).await?;
        Ok(true)
    }

    async fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&str>,
        new: Option<&str>,
    ) -> AppResult<bool> {
        let _guard = self.write_lock.lock().await;
        let current = self.read_raw(key).await?;
        if current.as_deref() != expected {
            return Ok(false);
        }
        match new {
            Some(value) => self.write_raw(key, value).await?,
            None => {
                self.remove_raw(key).await?;
            }
        }
        Ok(true)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false))
    }

    async fn flush_all(&self) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        for key in self.all_keys().await? {
            self.remove_raw(&key).await?;
        }
        Ok(())
    }
}
