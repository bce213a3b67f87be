//! The random title endpoint.
//!
//! One discover call picks the candidate pool, one candidate is chosen at
//! random, then details and videos are fetched concurrently and flattened
//! into the response document.

use axum::{
    extract::{Query, State},
    Json,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::services::tmdb::{TitleDetails, TitleKind, TmdbClient, Video};
use crate::AppState;

/// Number of creator names retained from the `created_by` list.
const MAX_CREATORS: usize = 2;

/// Query parameters for the random title endpoint.
#[derive(Debug, Deserialize)]
pub struct RandomQuery {
    /// Catalog category, defaults to movies.
    #[serde(rename = "type", default)]
    pub kind: TitleKind,
    /// Optional TMDB genre id; absent or empty means no filter.
    pub genre: Option<String>,
}

/// The flat response document rendered by the result card.
#[derive(Debug, Serialize)]
pub struct RandomTitle {
    pub title: String,
    pub year: String,
    pub overview: String,
    pub genres: Vec<String>,
    pub poster: Option<String>,
    pub rating: Option<u8>,
    pub status: String,
    pub creators: Vec<String>,
    pub trailer_url: Option<String>,
}

impl RandomTitle {
    /// Flatten one details payload and its video list into the response shape.
    pub fn derive(tmdb: &TmdbClient, details: TitleDetails, videos: Vec<Video>) -> Self {
        // Movies carry title/release_date, TV shows name/first_air_date.
        // Empty strings fall through like missing fields.
        let title = non_empty(details.title)
            .or_else(|| non_empty(details.name))
            .unwrap_or_default();

        let year = non_empty(details.release_date)
            .or_else(|| non_empty(details.first_air_date))
            .and_then(|date| date.split('-').next().map(str::to_string))
            .unwrap_or_default();

        // A vote average of exactly zero means "no votes" upstream, so it
        // renders the same as a missing field.
        let rating = details
            .vote_average
            .filter(|avg| *avg != 0.0)
            .map(|avg| (avg * 10.0).round() as u8);

        let poster = details
            .poster_path
            .map(|path| tmdb.poster_url(&path));

        let creators = details
            .created_by
            .into_iter()
            .take(MAX_CREATORS)
            .map(|c| c.name)
            .collect();

        // First YouTube trailer in upstream order wins.
        let trailer_url = videos
            .into_iter()
            .find(|v| v.kind == "Trailer" && v.site == "YouTube")
            .map(|v| tmdb.trailer_url(&v.key));

        Self {
            title,
            year,
            overview: details.overview.unwrap_or_default(),
            genres: details.genres.into_iter().map(|g| g.name).collect(),
            poster,
            rating,
            status: details.status.unwrap_or_default(),
            creators,
            trailer_url,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Draw a candidate index uniformly from `[0, len)`.
///
/// Split out so tests can pin the outcome with a seeded rng. `len` must be
/// non-zero; the handler bails on an empty pool before getting here.
fn pick_index<R: Rng + ?Sized>(rng: &mut R, len: usize) -> usize {
    rng.gen_range(0..len)
}

/// GET /api/random
///
/// Returns one random title available on Netflix BR, optionally narrowed
/// to a genre. 404 when discovery comes back empty, 500 for any upstream
/// failure; no partial result is ever returned.
pub async fn random_title(
    State(state): State<AppState>,
    Query(query): Query<RandomQuery>,
) -> Result<Json<RandomTitle>> {
    let candidates = state
        .tmdb
        .discover(query.kind, query.genre.as_deref())
        .await?;

    if candidates.is_empty() {
        tracing::debug!(
            kind = query.kind.path_segment(),
            genre = ?query.genre,
            "Discovery returned no candidates"
        );
        return Err(AppError::NoTitles);
    }

    let index = pick_index(&mut rand::thread_rng(), candidates.len());
    let chosen = &candidates[index];

    tracing::debug!(
        id = chosen.id,
        index,
        pool = candidates.len(),
        "Picked random candidate"
    );

    // Both calls run to completion; a failure on either side fails the request.
    let (details, videos) = tokio::join!(
        state.tmdb.details(query.kind, chosen.id),
        state.tmdb.videos(query.kind, chosen.id),
    );

    Ok(Json(RandomTitle::derive(&state.tmdb, details?, videos?)))
}
