//! HTTP surface of the plugin.
//!
//! Three routes, mirroring what gets registered into the host router:
//! - `GET /local_files` - directory listings and workflow loads
//! - `GET|POST /file_operations` - action-dispatched file mutations
//! - `GET /nz_static/{*filepath}` - static asset delivery
//!
//! All `/local_files` and `/file_operations` responses are HTTP 200 with
//! the outcome encoded in the JSON body; only the static file route uses
//! HTTP status codes for failures.

pub mod file_operations;
pub mod local_files;
pub mod static_files;


use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::constants::{FILE_OPERATIONS_ENDPOINT, LOCAL_FILES_ENDPOINT, STATIC_FILES_ENDPOINT};
use crate::PluginConfig;

/// Builds the plugin router. The host merges this into its own
/// application router.
pub fn router(config: Arc<PluginConfig>) -> Router {
    Router::new()
        .route(LOCAL_FILES_ENDPOINT, get(local_files::handle_local_files))
        .route(
            FILE_OPERATIONS_ENDPOINT,
            get(file_operations::handle_get).post(file_operations::handle_post),
        )
        .route(
            &format!("{STATIC_FILES_ENDPOINT}/{{*filepath}}"),
            get(static_files::handle_static_file),
        )
        .with_state(config)
}
