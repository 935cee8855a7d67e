//! Card Store Service
//!
//! HTTP front of the card store: trades a full card for a short id and
//! hands it back later.
//!
//! ## Endpoints
//! - `POST /cards` - store a card, reply `{"id": "..."}`
//! - `GET /cards/{id}` - fetch a stored card
//! - `GET /cards?id={id}` - same, query form used by older share links
//! - `GET /health` - health check

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

use crate::config::ServerConfig;
use crate::core::sanitize::sanitize;
use crate::core::storage::{load_card, save_card, CardStore};

// ============================================================================
// Wire Types
// ============================================================================

/// Reply to a successful `POST /cards`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SaveCardResponse {
    pub id: String,
}

/// Error body shared by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Deserialize)]
struct CardQuery {
    id: Option<String>,
}

// ============================================================================
// Service State
// ============================================================================

/// Shared state for the card service
pub struct CardServiceState {
    pub store: Arc<dyn CardStore>,
}

/// Build the service router over `store`.
pub fn router(store: Arc<dyn CardStore>, max_body_bytes: usize) -> Router {
    let state = Arc::new(CardServiceState { store });

    Router::new()
        .route("/cards", post(create_card).get(get_card_by_query))
        .route("/cards/:id", get(get_card))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

// ============================================================================
// Card Service
// ============================================================================

/// Card store HTTP service with graceful shutdown.
pub struct CardService {
    config: ServerConfig,
    store: Arc<dyn CardStore>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    local_addr: Option<SocketAddr>,
}

impl CardService {
    pub fn new(config: ServerConfig, store: Arc<dyn CardStore>) -> Self {
        Self {
            config,
            store,
            shutdown_tx: None,
            local_addr: None,
        }
    }

    /// Address the service is bound to, once started.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    /// Base URL clients should use, once started.
    pub fn url(&self) -> Option<String> {
        self.local_addr.map(|addr| format!("http://{addr}"))
    }

    /// Bind and start serving in a background task.
    ///
    /// Port 0 binds an ephemeral port; see [`CardService::local_addr`].
    pub async fn start(&mut self) -> Result<SocketAddr, String> {
        if self.shutdown_tx.is_some() {
            return Err("Card service already running".to_string());
        }

        let bind = format!("{}:{}", self.config.host, self.config.port);
        let listener = tokio::net::TcpListener::bind(&bind)
            .await
            .map_err(|e| format!("Failed to bind card service to {bind}: {e}"))?;
        let addr = listener
            .local_addr()
            .map_err(|e| format!("Failed to read bound address: {e}"))?;

        let app = router(self.store.clone(), self.config.max_body_bytes);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            info!(%addr, "Card service started");
            let served = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                    info!("Card service shutting down");
                })
                .await;
            if let Err(e) = served {
                error!(error = %e, "Card service terminated with error");
            }
        });

        self.shutdown_tx = Some(shutdown_tx);
        self.local_addr = Some(addr);
        Ok(addr)
    }

    pub async fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            self.local_addr = None;
            info!("Card service stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.shutdown_tx.is_some()
    }
}

// ============================================================================
// HTTP Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Store a card. The body must be a JSON object; it is sanitized before
/// being stored.
async fn create_card(State(state): State<Arc<CardServiceState>>, body: Bytes) -> Response {
    let value: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "Rejected card with invalid JSON body");
            return error_response(StatusCode::BAD_REQUEST, "Invalid card data format.");
        }
    };
    if !value.is_object() {
        warn!("Rejected card body that is not a JSON object");
        return error_response(StatusCode::BAD_REQUEST, "Card data is required");
    }

    let card = sanitize(&value);
    match save_card(state.store.as_ref(), &card).await {
        Ok(id) => {
            info!(%id, "Saved card");
            Json(SaveCardResponse { id }).into_response()
        }
        Err(e) => {
            error!(error = %e, "Error saving card to store");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Could not save card data due to a server issue.",
            )
        }
    }
}

async fn get_card(State(state): State<Arc<CardServiceState>>, Path(id): Path<String>) -> Response {
    fetch_response(&state, &id).await
}

async fn get_card_by_query(
    State(state): State<Arc<CardServiceState>>,
    Query(query): Query<CardQuery>,
) -> Response {
    match query.id.as_deref() {
        Some(id) if !id.is_empty() => fetch_response(&state, id).await,
        _ => error_response(StatusCode::BAD_REQUEST, "Card ID is required"),
    }
}

async fn fetch_response(state: &CardServiceState, id: &str) -> Response {
    match load_card(state.store.as_ref(), id).await {
        Ok(Some(card)) => Json(card).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "Card not found"),
        Err(e) => {
            error!(%id, error = %e, "Error fetching card");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Could not retrieve card data",
            )
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}

// ============================================================================
// Tests
// ============================================================================
