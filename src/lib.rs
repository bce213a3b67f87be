//! Roleta - random Netflix BR title picker backed by TMDB.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod static_files;
pub mod views;

use std::sync::Arc;

use axum::Json;

use services::TmdbClient;

/// Shared application state.
///
/// Handlers are stateless; everything they need lives here behind `Arc`,
/// so concurrent requests never interact. Config only drives startup
/// (bind address, API key) and is not carried past it.
#[derive(Clone)]
pub struct AppState {
    pub tmdb: Arc<TmdbClient>,
}

/// GET /health
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
