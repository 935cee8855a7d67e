//! Remote Card Store Client
//!
//! Persists a full card on the card service in exchange for a short id,
//! and fetches it back. Used instead of an inline token when the token
//! would make the share URL too long.
//!
//! Calls carry the configured request timeout. Nothing is cancelled or
//! retried here; callers that may issue overlapping saves use
//! [`StoredShare`] to discard stale ids.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::config::ClientConfig;
use crate::core::card::CardData;
use crate::core::sanitize::sanitize;
use crate::core::server::{ErrorBody, SaveCardResponse};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

// ============================================================================
// Errors
// ============================================================================

/// Errors from talking to the card service.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, TLS or timeout failure before a response arrived.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service failed (5xx). Worth retrying later.
    #[error("Card service error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The service rejected the request (4xx). Retrying will not help.
    #[error("Card service rejected the request ({status}): {message}")]
    InvalidRequest { status: u16, message: String },

    /// A success response whose body could not be understood.
    #[error("Invalid response from card service: {0}")]
    InvalidResponse(String),

    /// Client could not be constructed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Returns true if the same call may succeed later.
    #[must_use]
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Server { .. })
    }

    /// Message suitable for a user-facing notice.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Network(_) => "Network issue: could not reach the card service. Check your connection and try again.",
            Self::Server { .. } | Self::InvalidResponse(_) => {
                "The card service is having trouble right now. Please try again later."
            }
            Self::InvalidRequest { .. } => "The card data was rejected as invalid.",
            Self::Config(_) => "Card sharing is not configured correctly.",
        }
    }

    async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or(text);

        if status.is_server_error() {
            Self::Server {
                status: status.as_u16(),
                message,
            }
        } else {
            Self::InvalidRequest {
                status: status.as_u16(),
                message,
            }
        }
    }
}

// ============================================================================
// Client
// ============================================================================

/// Client for the card service.
#[derive(Debug, Clone)]
pub struct RemoteCardStore {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteCardStore {
    /// Client for the service at `base_url` with [`DEFAULT_TIMEOUT`].
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(http, base_url))
    }

    /// Client for the configured service, or `None` when no base URL is
    /// set and only inline links are available.
    pub fn from_config(config: &ClientConfig) -> Result<Option<Self>, ClientError> {
        match config.base_url.as_deref().map(str::trim) {
            Some(base_url) if !base_url.is_empty() => {
                Self::with_timeout(base_url, config.timeout()).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Reuse an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Store `card` and return the id the service assigned.
    #[instrument(skip(self, card), fields(base_url = %self.base_url))]
    pub async fn save(&self, card: &CardData) -> Result<String, ClientError> {
        let response = self
            .http
            .post(format!("{}/cards", self.base_url))
            .json(card)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let err = ClientError::from_response(response).await;
            warn!(status = %status, error = %err, "Saving card failed");
            return Err(err);
        }

        let body: SaveCardResponse = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        if body.id.is_empty() {
            return Err(ClientError::InvalidResponse("empty card id".to_string()));
        }

        info!(id = %body.id, "Card saved to remote store");
        Ok(body.id)
    }

    /// Fetch the card stored under `id`.
    ///
    /// Returns `Ok(None)` when the service has no such card.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn fetch(&self, id: &str) -> Result<Option<CardData>, ClientError> {
        let url = format!("{}/cards/{}", self.base_url, urlencoding::encode(id));
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(%id, "Card not found on remote store");
            return Ok(None);
        }
        if !status.is_success() {
            let err = ClientError::from_response(response).await;
            warn!(status = %status, error = %err, "Fetching card failed");
            return Err(err);
        }

        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        Ok(Some(sanitize(&value)))
    }
}

// ============================================================================
// Stale Save Guard
// ============================================================================

/// An id together with the exact card it was saved for.
///
/// When the user keeps editing while a save is in flight, the id that comes
/// back describes an older card. Keep the latest `StoredShare` and ask it
/// for an id against the current card; a mismatch means save again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredShare {
    pub card: CardData,
    pub id: String,
}

impl StoredShare {
    pub fn new(card: CardData, id: impl Into<String>) -> Self {
        Self {
            card,
            id: id.into(),
        }
    }

    /// The stored id, if it still describes `latest`.
    pub fn id_for(&self, latest: &CardData) -> Option<&str> {
        (self.card == *latest).then_some(self.id.as_str())
    }
}
