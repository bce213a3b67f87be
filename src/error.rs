//! Application error types for the roleta backend.
//!
//! Provides a unified error type that implements `IntoResponse` for Axum.
//! User-visible failures collapse to two fixed pt-BR messages; upstream
//! detail only ever reaches the diagnostic log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Message returned when discovery yields no candidates.
pub const MSG_NO_TITLES: &str = "Nenhum título encontrado";

/// Message returned for every other failure on the random route.
pub const MSG_FETCH_FAILED: &str = "Erro ao buscar título completo";

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading/parsing errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Discovery returned an empty candidate pool
    #[error("no titles matched the discovery filters")]
    NoTitles,

    /// TMDB call failed: network error, non-2xx status, or malformed payload
    #[error("TMDB error: {0}")]
    Tmdb(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Config(e) => {
                // Log full error details but don't expose to client
                tracing::error!("Config error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, MSG_FETCH_FAILED)
            }
            AppError::NoTitles => (StatusCode::NOT_FOUND, MSG_NO_TITLES),
            AppError::Tmdb(detail) => {
                // Which upstream call failed and why stays in the log only
                tracing::error!("TMDB fetch failed: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, MSG_FETCH_FAILED)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, MSG_FETCH_FAILED)
            }
        };

        let body = ErrorResponse {
            error: message.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
