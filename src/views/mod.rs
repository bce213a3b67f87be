//! HTML views for the frontend.
//!
//! One askama page: the selection form plus an empty result slot that the
//! frontend script fills from `/api/random`.

use askama::Template;
use axum::{
    http::{StatusCode, Uri},
    response::IntoResponse,
    routing::get,
    Router,
};

use crate::AppState;

/// One entry of the fixed genre dropdown.
pub struct GenreOption {
    pub id: i64,
    pub name: &'static str,
}

/// The genres offered by the form, matching TMDB's ids.
const GENRES: &[GenreOption] = &[
    GenreOption { id: 28, name: "Ação" },
    GenreOption { id: 35, name: "Comédia" },
    GenreOption { id: 18, name: "Drama" },
    GenreOption { id: 99, name: "Documentário" },
    GenreOption { id: 27, name: "Terror" },
    GenreOption { id: 10749, name: "Romance" },
    GenreOption { id: 16, name: "Animação" },
    GenreOption { id: 878, name: "Ficção Científica" },
    GenreOption { id: 14, name: "Fantasia" },
    GenreOption { id: 53, name: "Suspense" },
];

#[derive(Template)]
#[template(path = "pages/index.html")]
pub struct IndexTemplate {
    pub genres: &'static [GenreOption],
}

/// Render the picker page
pub async fn index() -> IndexTemplate {
    IndexTemplate { genres: GENRES }
}

#[derive(Template)]
#[template(path = "pages/404.html")]
pub struct NotFoundTemplate {
    pub path: String,
}

/// 404 handler
pub async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            path: uri.path().to_string(),
        },
    )
}

/// Build the HTML routes for the frontend
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(index))
}
