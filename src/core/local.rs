//! Local card cache.
//!
//! Keeps the card being edited in a single JSON file so an editor picks up
//! where it left off. Content that fails to parse is treated as absent and
//! overwritten by the next save.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::core::card::CardData;
use crate::core::sanitize::sanitize;

/// Key the web app stores the card under; the cache file is `<key>.json`.
pub const CACHE_KEY: &str = "fancyfam-card-data";

#[derive(Debug, Error)]
pub enum LocalCacheError {
    #[error("Failed to write card cache '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize card: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct LocalCardCache {
    path: PathBuf,
}

impl LocalCardCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Cache at `<data_dir>/fancyfam-card-data.json`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(format!("{CACHE_KEY}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last saved card, if there is a readable one.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn load(&self) -> Option<CardData> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(error = %e, "Failed to read card cache, ignoring it");
                return None;
            }
        };

        match serde_json::from_str::<serde_json::Value>(&content) {
            Ok(value) => Some(sanitize(&value)),
            Err(e) => {
                warn!(error = %e, "Card cache is corrupt, discarding it");
                None
            }
        }
    }

    /// Last saved card, or the starter card.
    pub async fn load_or_sample(&self) -> CardData {
        self.load().await.unwrap_or_else(CardData::sample)
    }

    /// Replace the cached card.
    #[instrument(skip(self, card), fields(path = %self.path.display()))]
    pub async fn save(&self, card: &CardData) -> Result<(), LocalCacheError> {
        let content = serde_json::to_string_pretty(card)?;
        let write_err = |path: &Path, source: std::io::Error| LocalCacheError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| write_err(parent, e))?;
            }
        }

        // Write to temp file first, then rename for atomicity
        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, &content)
            .await
            .map_err(|e| write_err(&temp_path, e))?;
        if let Err(e) = tokio::fs::rename(&temp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(write_err(&self.path, e));
        }

        debug!("Saved card cache");
        Ok(())
    }
}
