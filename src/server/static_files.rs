//! `GET /nz_static/{*filepath}` - static asset delivery.
//!
//! Serves files from the configured web root only. The containment
//! check runs on the lexically resolved path, so `..` segments and
//! absolute-path overrides are rejected before any filesystem access.

use std::fs;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::{error, info, warn};

use crate::validation::is_safe_path;
use crate::PluginConfig;

pub(crate) async fn handle_static_file(
    State(config): State<Arc<PluginConfig>>,
    Path(filepath): Path<String>,
) -> Response {
    let candidate = config.web_root.join(&filepath);

    if !is_safe_path(&candidate, &config.web_root) {
        warn!(path = %filepath, "static file access denied, outside web root");
        return (StatusCode::FORBIDDEN, "Forbidden").into_response();
    }

    if !candidate.is_file() {
        warn!(path = %candidate.display(), "static file not found");
        return (StatusCode::NOT_FOUND, "File not found").into_response();
    }

    let content = match fs::read(&candidate) {
        Ok(content) => content,
        Err(e) => {
            error!(path = %candidate.display(), error = %e, "static file read failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Internal server error: {e}"),
            )
                .into_response();
        }
    };

    let mime = mime_guess::from_path(&candidate).first_or_octet_stream();
    info!(path = %filepath, bytes = content.len(), mime = %mime, "static file served");

    (
        [
            (header::CONTENT_TYPE, mime.as_ref()),
            (header::CACHE_CONTROL, "public, max-age=3600"),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        ],
        content,
    )
        .into_response()
}
