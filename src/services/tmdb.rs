//! TMDB (The Movie Database) service client.
//!
//! Provides the three upstream calls the random picker needs: discover a
//! page of candidates, fetch details for one title, fetch its videos.

use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{AppError, Result};

const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
const TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p";
const YOUTUBE_WATCH_BASE: &str = "https://www.youtube.com/watch?v=";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Poster width segment used for every derived image URL.
const POSTER_SIZE: &str = "w500";

/// Everything is pinned to the Netflix catalog in Brazil, in Portuguese.
const WATCH_PROVIDER_NETFLIX: &str = "8";
const WATCH_REGION: &str = "BR";
const LANGUAGE: &str = "pt-BR";

/// Catalog partition: movies vs. episodic series.
///
/// Determines the endpoint family (`/discover/movie` vs `/discover/tv`)
/// and which detail field names TMDB populates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleKind {
    #[default]
    Movie,
    Tv,
}

impl TitleKind {
    pub fn path_segment(self) -> &'static str {
        match self {
            TitleKind::Movie => "movie",
            TitleKind::Tv => "tv",
        }
    }
}

/// TMDB API client for the discover/details/videos endpoints.
pub struct TmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl TmdbClient {
    /// Create a new TMDB client with the given API key.
    ///
    /// Returns an error if the API key is empty or if the HTTP client cannot be built.
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_base_url(api_key, TMDB_BASE_URL.to_string())
    }

    /// Create a client pointing at an arbitrary base URL.
    ///
    /// Tests use this to run against a stub upstream on a local port.
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(AppError::Internal(
                "TMDB API key cannot be empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    /// Create a new TMDB client wrapped in Arc for shared access.
    pub fn new_shared(api_key: String) -> Result<Arc<Self>> {
        Ok(Arc::new(Self::new(api_key)?))
    }

    /// Discover the first page of titles available on Netflix BR.
    ///
    /// Fixed filters: provider 8, region BR, popularity descending, pt-BR,
    /// adult content excluded, page 1. `genre` narrows to one TMDB genre id;
    /// `None` is sent as an empty `with_genres` value, which TMDB treats as
    /// no filter.
    pub async fn discover(
        &self,
        kind: TitleKind,
        genre: Option<&str>,
    ) -> Result<Vec<DiscoveredTitle>> {
        tracing::debug!(kind = kind.path_segment(), genre = ?genre, "TMDB discover");

        let params = [
            ("api_key", self.api_key.as_str()),
            ("with_watch_providers", WATCH_PROVIDER_NETFLIX),
            ("watch_region", WATCH_REGION),
            ("with_genres", genre.unwrap_or("")),
            ("sort_by", "popularity.desc"),
            ("language", LANGUAGE),
            ("include_adult", "false"),
            ("page", "1"),
        ];

        let page: DiscoverPage = self
            .get_with_params(&format!("/discover/{}", kind.path_segment()), &params)
            .await?;
        Ok(page.results)
    }

    /// Get full details for one title.
    pub async fn details(&self, kind: TitleKind, id: i64) -> Result<TitleDetails> {
        tracing::debug!(kind = kind.path_segment(), id = %id, "TMDB details");

        let params = [
            ("api_key", self.api_key.as_str()),
            ("language", LANGUAGE),
        ];
        self.get_with_params(&format!("/{}/{}", kind.path_segment(), id), &params)
            .await
    }

    /// Get the video clips (trailers, teasers) associated with one title.
    pub async fn videos(&self, kind: TitleKind, id: i64) -> Result<Vec<Video>> {
        tracing::debug!(kind = kind.path_segment(), id = %id, "TMDB videos");

        let params = [
            ("api_key", self.api_key.as_str()),
            ("language", LANGUAGE),
        ];
        let page: VideosPage = self
            .get_with_params(&format!("/{}/{}/videos", kind.path_segment(), id), &params)
            .await?;
        Ok(page.results)
    }

    /// Build a fully qualified poster URL from a raw TMDB poster path.
    pub fn poster_url(&self, path: &str) -> String {
        format!("{}/{}{}", TMDB_IMAGE_BASE, POSTER_SIZE, path)
    }

    /// Build a YouTube watch URL from a video key.
    pub fn trailer_url(&self, key: &str) -> String {
        format!("{}{}", YOUTUBE_WATCH_BASE, key)
    }

    /// Internal helper to perform GET requests with query parameters and deserialize JSON responses.
    async fn get_with_params<T, P>(&self, path: &str, params: &[P]) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
        P: serde::Serialize,
    {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| AppError::Tmdb(format!("TMDB request to {} failed: {}", path, e)))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AppError::Tmdb(
                "TMDB API key is invalid or missing".to_string(),
            ));
        }

        if !status.is_success() {
            return Err(AppError::Tmdb(format!(
                "TMDB API {} returned error status: {}",
                path, status
            )));
        }

        response.json::<T>().await.map_err(|e| {
            AppError::Tmdb(format!(
                "Failed to parse TMDB response from {}: {}",
                path, e
            ))
        })
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// One page of discover results.
#[derive(Debug, Deserialize)]
pub struct DiscoverPage {
    #[serde(default)]
    pub results: Vec<DiscoveredTitle>,
}

/// Discovery candidate. Only the id is consumed; the pool size drives the
/// random pick.
#[derive(Debug, Deserialize)]
pub struct DiscoveredTitle {
    pub id: i64,
}

/// Detailed title information.
///
/// One struct covers both kinds: movies populate `title`/`release_date`,
/// TV shows populate `name`/`first_air_date` and `created_by`.
#[derive(Debug, Default, Deserialize)]
pub struct TitleDetails {
    pub title: Option<String>,
    pub name: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub overview: Option<String>,
    #[serde(default)]
    pub genres: Vec<TitleGenre>,
    pub poster_path: Option<String>,
    pub vote_average: Option<f64>,
    pub status: Option<String>,
    #[serde(default)]
    pub created_by: Vec<Creator>,
}

/// Genre information from TMDB.
#[derive(Debug, Deserialize)]
pub struct TitleGenre {
    pub id: i64,
    pub name: String,
}

/// Series creator entry from TMDB (`created_by`).
#[derive(Debug, Deserialize)]
pub struct Creator {
    pub name: String,
}

/// Video list wrapper from the videos endpoint.
#[derive(Debug, Deserialize)]
pub struct VideosPage {
    #[serde(default)]
    pub results: Vec<Video>,
}

/// One video clip associated with a title.
#[derive(Debug, Deserialize)]
pub struct Video {
    pub site: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub key: String,
}
