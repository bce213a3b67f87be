//! Embedded frontend assets.
//!
//! The frontend is exactly two files, `style.css` and `app.js`, compiled
//! into the binary so the server ships as a single artifact.

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "static/"]
pub struct Assets;

/// Serve embedded assets at /static/*path
pub async fn serve_static(Path(path): Path<String>) -> Response {
    let Some(asset) = Assets::get(&path) else {
        return (StatusCode::NOT_FOUND, "Not found").into_response();
    };

    // Assets are embedded at compile time, so cache forever
    let mime = mime_guess::from_path(&path).first_or_octet_stream();
    (
        [
            (header::CONTENT_TYPE, mime.to_string()),
            (
                header::CACHE_CONTROL,
                "public, max-age=31536000, immutable".to_string(),
            ),
        ],
        asset.data.into_owned(),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frontend_assets_are_embedded() {
        let response = tokio_test::block_on(serve_static(Path("style.css".to_string())));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/css"
        );

        let response = tokio_test::block_on(serve_static(Path("app.js".to_string())));
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_unknown_asset_is_404() {
        let response = tokio_test::block_on(serve_static(Path("missing.css".to_string())));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
