//! `GET /local_files` - browse the local filesystem.

use std::path::Path;

use axum::extract::Query;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::fileops::commands;
use crate::fileops::listing::directory_listing;

#[derive(Debug, Deserialize)]
pub(crate) struct LocalFilesQuery {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub action: String,
}

/// `action=load_workflow` returns the file content; any other action
/// returns a directory listing. Failures are reported as
/// `{error, type: "error"}` in the body.
pub(crate) async fn handle_local_files(Query(query): Query<LocalFilesQuery>) -> Json<Value> {
    if query.path.is_empty() {
        return Json(error_body("missing path parameter"));
    }

    info!(action = %query.action, path = %query.path, "local files request");

    if !Path::new(&query.path).exists() {
        return Json(error_body(&format!("path does not exist: {}", query.path)));
    }

    if query.action == "load_workflow" {
        load_workflow(&query.path)
    } else {
        list_directory(&query.path)
    }
}

pub(crate) fn load_workflow(path: &str) -> Json<Value> {
    match commands::load_workflow(path) {
        Ok(loaded) => Json(json!(loaded)),
        Err(e) => {
            error!(path, error = %e, "workflow load failed");
            Json(error_body(&e.to_string()))
        }
    }
}

pub(crate) fn list_directory(path: &str) -> Json<Value> {
    match directory_listing(Path::new(path), false) {
        Ok(listing) => Json(json!(listing)),
        Err(e) => {
            error!(path, error = %e, "directory listing failed");
            Json(error_body(&e.to_string()))
        }
    }
}

fn error_body(message: &str) -> Value {
    json!({
        "error": message,
        "type": "error",
    })
}
