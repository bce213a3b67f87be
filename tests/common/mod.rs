//! Test infrastructure for roleta integration tests.
//!
//! Provides a `TestApp` wrapper around `axum_test::TestServer` together with
//! a stub TMDB upstream bound to an ephemeral local port. Each test declares
//! the canned status and body for the three upstream endpoints and can
//! assert how many times each one was hit.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_test::TestServer;
use serde_json::Value;

use roleta::services::TmdbClient;
use roleta::{api, static_files, views, AppState};

/// Canned upstream reply: HTTP status plus JSON body.
pub type CannedReply = (u16, Value);

/// Per-endpoint hit counters for the stub upstream.
#[derive(Default)]
pub struct UpstreamHits {
    pub discover: AtomicUsize,
    pub details: AtomicUsize,
    pub videos: AtomicUsize,
}

impl UpstreamHits {
    pub fn discover_count(&self) -> usize {
        self.discover.load(Ordering::SeqCst)
    }

    pub fn details_count(&self) -> usize {
        self.details.load(Ordering::SeqCst)
    }

    pub fn videos_count(&self) -> usize {
        self.videos.load(Ordering::SeqCst)
    }
}

#[derive(Clone)]
struct StubState {
    hits: Arc<UpstreamHits>,
    discover: Arc<CannedReply>,
    details: Arc<CannedReply>,
    videos: Arc<CannedReply>,
}

fn reply(canned: &CannedReply) -> (StatusCode, Json<Value>) {
    let status = StatusCode::from_u16(canned.0).expect("canned reply uses a valid status code");
    (status, Json(canned.1.clone()))
}

async fn stub_discover(State(state): State<StubState>) -> impl IntoResponse {
    state.hits.discover.fetch_add(1, Ordering::SeqCst);
    reply(&state.discover)
}

async fn stub_details(State(state): State<StubState>) -> impl IntoResponse {
    state.hits.details.fetch_add(1, Ordering::SeqCst);
    reply(&state.details)
}

async fn stub_videos(State(state): State<StubState>) -> impl IntoResponse {
    state.hits.videos.fetch_add(1, Ordering::SeqCst);
    reply(&state.videos)
}

/// Test application wrapper around axum_test::TestServer.
pub struct TestApp {
    pub server: TestServer,
    pub hits: Arc<UpstreamHits>,
}

impl TestApp {
    /// Create a test application whose TMDB client points at a stub upstream
    /// serving the given canned replies.
    pub async fn new(discover: CannedReply, details: CannedReply, videos: CannedReply) -> Self {
        let hits = Arc::new(UpstreamHits::default());

        let stub_state = StubState {
            hits: Arc::clone(&hits),
            discover: Arc::new(discover),
            details: Arc::new(details),
            videos: Arc::new(videos),
        };

        // Route order does not matter: the static "discover" segment takes
        // priority over the ":kind" parameter.
        let stub = Router::new()
            .route("/discover/:kind", get(stub_discover))
            .route("/:kind/:id", get(stub_details))
            .route("/:kind/:id/videos", get(stub_videos))
            .with_state(stub_state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub upstream");
        let addr = listener.local_addr().expect("stub upstream has no addr");
        tokio::spawn(async move {
            axum::serve(listener, stub)
                .await
                .expect("stub upstream crashed");
        });

        let tmdb = TmdbClient::with_base_url("test-key".to_string(), format!("http://{}", addr))
            .expect("Failed to create test TMDB client");

        let state = AppState {
            tmdb: Arc::new(tmdb),
        };

        let server =
            TestServer::new(Self::build_router(state)).expect("Failed to create test server");

        Self { server, hits }
    }

    /// Build the application router.
    ///
    /// This mirrors the router construction in main.rs (minus the CORS
    /// layer) so tests run against the actual production routes.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/static/*path", get(static_files::serve_static))
            .route("/health", get(roleta::health_check))
            .merge(views::routes())
            .route("/api/random", get(api::random::random_title))
            .fallback(views::not_found)
            .with_state(state)
    }
}
