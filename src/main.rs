use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use roleta::{api, config::Config, services::TmdbClient, static_files, views, AppState};

fn init_tracing() {
    // Initialize tracing with env-filter
    // RUST_LOG environment variable controls log levels
    // Default: debug for our crate, info for axum, warn for dependencies
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("roleta=debug,tower_http=debug,axum=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() {
    // Initialize tracing first so we can log configuration loading
    init_tracing();

    tracing::info!("Starting roleta v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = match Config::load() {
        Ok(cfg) => {
            tracing::info!("Configuration loaded successfully");
            tracing::debug!("Server: {}:{}", cfg.server.host, cfg.server.port);
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // The app is a thin layer over TMDB; without a key there is nothing to serve
    let tmdb_client = match &config.tmdb.api_key {
        Some(api_key) if !api_key.is_empty() => match TmdbClient::new_shared(api_key.clone()) {
            Ok(client) => {
                tracing::info!("TMDB client initialized");
                client
            }
            Err(e) => {
                tracing::error!("Failed to create TMDB client: {}", e);
                std::process::exit(1);
            }
        },
        _ => {
            tracing::error!("TMDB API key not configured - set ROLETA_TMDB__API_KEY");
            std::process::exit(1);
        }
    };

    // Configure CORS based on allowed origins from config
    // If no origins configured, only same-origin requests are allowed
    let cors = if config.server.cors_origins.is_empty() {
        tracing::info!("CORS: No origins configured, same-origin only");
        CorsLayer::new()
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
            .max_age(std::time::Duration::from_secs(3600))
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .server
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        tracing::info!("CORS: Allowing origins {:?}", config.server.cors_origins);
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
            .max_age(std::time::Duration::from_secs(3600))
    };

    let addr = config.server_addr();

    // Create application state
    let state = AppState { tmdb: tmdb_client };

    // Build main router with state
    let app = Router::new()
        // Static assets (CSS, JS)
        .route("/static/*path", get(static_files::serve_static))
        // Health check
        .route("/health", get(roleta::health_check))
        // HTML routes (served at root)
        .merge(views::routes())
        // JSON API routes
        .route("/api/random", get(api::random::random_title))
        // 404 fallback
        .fallback(views::not_found)
        .layer(cors)
        .with_state(state);

    tracing::info!("roleta listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
