//! File-backed card store.
//!
//! Each card lives in `<dir>/<id>.json`. Writes go to a temp file that is
//! then hard-linked into place, so a reader never sees a half-written card
//! and an existing id is never overwritten.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument, warn};

use super::{generate_card_id, is_valid_card_id, CardStore, StorageError, StorageResult};
use crate::core::card::CardData;
use crate::core::sanitize::sanitize;

#[derive(Debug, Clone)]
pub struct FileCardStore {
    dir: PathBuf,
}

impl FileCardStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub async fn open(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            StorageError::config(format!(
                "Failed to create card directory '{}': {}",
                dir.display(),
                e
            ))
        })?;
        debug!(dir = %dir.display(), "Opened file card store");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn card_path(&self, id: &str) -> StorageResult<PathBuf> {
        if !is_valid_card_id(id) {
            return Err(StorageError::backend(format!("Invalid card id '{id}'")));
        }
        Ok(self.dir.join(format!("{id}.json")))
    }
}

#[async_trait]
impl CardStore for FileCardStore {
    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> StorageResult<Option<CardData>> {
        let path = self.card_path(id)?;
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::backend(format!(
                    "Failed to read card file '{}': {}",
                    path.display(),
                    e
                )))
            }
        };

        let value: serde_json::Value = serde_json::from_str(&content).map_err(|e| {
            warn!(path = %path.display(), error = %e, "Stored card is not valid JSON");
            StorageError::Serialization(e)
        })?;
        Ok(Some(sanitize(&value)))
    }

    #[instrument(skip(self, card))]
    async fn insert_new(&self, id: &str, card: &CardData) -> StorageResult<bool> {
        let path = self.card_path(id)?;
        let content = serde_json::to_vec(card)?;

        // Fresh name per call, created exclusively: a temp file left behind by
        // a crash may still share its inode with a committed card.
        let temp_path = self.dir.join(format!(".{id}.{}.tmp", generate_card_id()));
        if let Err(e) = write_new_file(&temp_path, &content).await {
            if e.kind() != std::io::ErrorKind::AlreadyExists {
                let _ = tokio::fs::remove_file(&temp_path).await;
            }
            return Err(StorageError::backend(format!(
                "Failed to write temp file '{}': {}",
                temp_path.display(),
                e
            )));
        }

        // hard_link fails instead of replacing an existing target.
        let linked = tokio::fs::hard_link(&temp_path, &path).await;
        let _ = tokio::fs::remove_file(&temp_path).await;

        match linked {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(StorageError::backend(format!(
                "Failed to commit card file '{}': {}",
                path.display(),
                e
            ))),
        }
    }

    fn name(&self) -> &str {
        "file"
    }
}

async fn write_new_file(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;
    file.write_all(content).await?;
    file.flush().await
}
