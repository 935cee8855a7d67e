//! Card store backends.
//!
//! The card service keeps each shared card as one JSON blob under a short
//! random id. Ids are write-once: there is no update, delete or listing.
//!
//! - [`MemoryCardStore`] - in-memory map, for tests and ephemeral servers
//! - [`FileCardStore`] - one `<id>.json` file per card in a directory

mod file;
mod memory;

pub mod error;

use async_trait::async_trait;
use rand::RngCore;
use tracing::{debug, instrument};

pub use error::{StorageError, StorageResult};
pub use file::FileCardStore;
pub use memory::MemoryCardStore;

use crate::core::card::CardData;

/// Random bytes per id; hex-encoded that gives 12 characters.
pub const CARD_ID_BYTES: usize = 6;

/// Longest id accepted on lookup. Ids minted by older servers were
/// base36 timestamps plus random digits, so lookups allow more than
/// [`CARD_ID_BYTES`] worth of hex.
pub const MAX_CARD_ID_LEN: usize = 64;

/// Fresh ids drawn before giving up on a save.
const MAX_ID_ATTEMPTS: usize = 8;

/// Trait for card store backends.
///
/// Implementations must be thread-safe; the HTTP service shares one store
/// across all request tasks.
#[async_trait]
pub trait CardStore: Send + Sync {
    /// Load the card stored under `id`, if any.
    async fn get(&self, id: &str) -> StorageResult<Option<CardData>>;

    /// Store `card` under `id` unless the id is taken.
    ///
    /// Returns `false` without writing when `id` already exists.
    async fn insert_new(&self, id: &str, card: &CardData) -> StorageResult<bool>;

    /// Backend name for logging.
    fn name(&self) -> &str;
}

/// Generate a random card id: [`CARD_ID_BYTES`] bytes from the thread
/// RNG, lowercase hex.
pub fn generate_card_id() -> String {
    let mut bytes = [0u8; CARD_ID_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Whether `id` could name a stored card. Anything else is rejected
/// before reaching a backend.
pub fn is_valid_card_id(id: &str) -> bool {
    !id.is_empty() && id.len() <= MAX_CARD_ID_LEN && id.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Store `card` under a freshly generated id and return the id.
#[instrument(skip(store, card), fields(backend = store.name()))]
pub async fn save_card(store: &dyn CardStore, card: &CardData) -> StorageResult<String> {
    for _ in 0..MAX_ID_ATTEMPTS {
        let id = generate_card_id();
        if store.insert_new(&id, card).await? {
            debug!(%id, "Stored card");
            return Ok(id);
        }
        debug!(%id, "Card id collision, drawing another");
    }
    Err(StorageError::IdExhausted(MAX_ID_ATTEMPTS))
}

/// Load a card by id; malformed ids are simply absent.
pub async fn load_card(store: &dyn CardStore, id: &str) -> StorageResult<Option<CardData>> {
    if !is_valid_card_id(id) {
        debug!(id_len = id.len(), "Rejected malformed card id");
        return Ok(None);
    }
    store.get(id).await
}
