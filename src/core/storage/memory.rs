//! In-memory card store for tests and ephemeral servers.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{CardStore, StorageResult};
use crate::core::card::CardData;

/// In-memory card store.
///
/// Clones share the same map, so a test can keep a handle while the
/// service owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryCardStore {
    inner: Arc<RwLock<HashMap<String, CardData>>>,
}

impl MemoryCardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `cards`.
    pub fn with_cards<I, S>(cards: I) -> Self
    where
        I: IntoIterator<Item = (S, CardData)>,
        S: Into<String>,
    {
        let map = cards.into_iter().map(|(id, card)| (id.into(), card)).collect();
        Self {
            inner: Arc::new(RwLock::new(map)),
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl CardStore for MemoryCardStore {
    async fn get(&self, id: &str) -> StorageResult<Option<CardData>> {
        Ok(self.inner.read().await.get(id).cloned())
    }

    async fn insert_new(&self, id: &str, card: &CardData) -> StorageResult<bool> {
        let mut cards = self.inner.write().await;
        if cards.contains_key(id) {
            return Ok(false);
        }
        cards.insert(id.to_string(), card.clone());
        Ok(true)
    }

    fn name(&self) -> &str {
        "memory"
    }
}
