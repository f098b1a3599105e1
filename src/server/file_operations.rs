//! `GET|POST /file_operations` - action-dispatched file mutations.
//!
//! The `action` string arrives via query parameters, a JSON body or a
//! form-encoded body. It is parsed into [`FileOpAction`] so the dispatch
//! below stays exhaustive; unknown actions never reach an operation.

use axum::extract::{Form, FromRequest, Query, Request};
use axum::http::header;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{error, info};

use super::local_files;
use crate::fileops::commands;
use crate::fileops::error::FileOpError;
use crate::fileops::types::{FileOpAction, FileOpRequest};

pub(crate) async fn handle_get(Query(request): Query<FileOpRequest>) -> Json<Value> {
    info!(action = %request.action, method = "GET", "file operation request");
    dispatch(request)
}

pub(crate) async fn handle_post(req: Request) -> Json<Value> {
    let is_json = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with(mime::APPLICATION_JSON.as_ref()))
        .unwrap_or(false);

    let request = if is_json {
        match Json::<FileOpRequest>::from_request(req, &()).await {
            Ok(Json(request)) => request,
            Err(e) => {
                error!(error = %e, "malformed JSON body");
                return Json(json!({ "error": format!("invalid request body: {e}") }));
            }
        }
    } else {
        match Form::<FileOpRequest>::from_request(req, &()).await {
            Ok(Form(request)) => request,
            Err(e) => {
                error!(error = %e, "malformed form body");
                return Json(json!({ "error": format!("invalid request body: {e}") }));
            }
        }
    };

    info!(action = %request.action, method = "POST", "file operation request");
    dispatch(request)
}

pub(crate) fn dispatch(request: FileOpRequest) -> Json<Value> {
    let Some(action) = FileOpAction::parse(&request.action) else {
        return Json(json!({
            "error": format!("unsupported operation: {}", request.action),
            "action": request.action,
        }));
    };

    let field = |value: &Option<String>| value.clone().unwrap_or_default();

    match action {
        FileOpAction::ListDirectory => local_files::list_directory(&field(&request.path)),
        FileOpAction::CreateDirectory => shape(
            action,
            commands::create_directory(
                &field(&request.parent_path),
                &field(&request.directory_name),
            ),
        ),
        FileOpAction::DeleteFile => {
            shape(action, commands::delete_file(&field(&request.file_path)))
        }
        FileOpAction::DeleteDirectory => shape(
            action,
            commands::delete_directory(&field(&request.directory_path)),
        ),
        FileOpAction::PathExists => shape(action, commands::path_exists(&field(&request.path))),
        FileOpAction::CopyFile => shape(
            action,
            commands::copy_file(
                &field(&request.source_path),
                &field(&request.target_path),
                request.new_name.as_deref(),
            ),
        ),
        FileOpAction::CopyDirectory => shape(
            action,
            commands::copy_directory(
                &field(&request.source_path),
                &field(&request.target_path),
                request.new_name.as_deref(),
            ),
        ),
        FileOpAction::MoveFile => shape(
            action,
            commands::move_file(
                &field(&request.source_path),
                &field(&request.target_path),
                request.new_filename.as_deref(),
            ),
        ),
        FileOpAction::MoveDirectory => {
            // rename requires a name; without one this is a plain move
            let new_name = request.new_name.as_deref().filter(|n| !n.is_empty());
            shape(
                action,
                commands::move_directory(
                    &field(&request.source_path),
                    &field(&request.target_path),
                    new_name,
                    request.operation_type.as_deref() == Some("rename") && new_name.is_some(),
                ),
            )
        }
        FileOpAction::Rename => {
            // older clients send the source as old_path
            let source = request
                .source_path
                .clone()
                .filter(|s| !s.is_empty())
                .or(request.old_path.clone())
                .unwrap_or_default();
            shape(
                action,
                commands::rename(
                    &source,
                    request.target_path.as_deref(),
                    request.new_name.as_deref(),
                ),
            )
        }
        FileOpAction::CheckFileExists => {
            exists_shape(action, commands::file_exists(&field(&request.path)))
        }
        FileOpAction::CheckDirectoryExists => {
            exists_shape(action, commands::directory_exists(&field(&request.path)))
        }
        FileOpAction::SaveWorkflow => {
            let data = request.workflow_data.clone().unwrap_or(Value::Null);
            shape(
                action,
                commands::save_workflow(&field(&request.file_path), &data),
            )
        }
    }
}

/// Shapes an operation result into `{success: true, ...}` or
/// `{success: false, error}`.
fn shape<T: Serialize>(action: FileOpAction, result: Result<T, FileOpError>) -> Json<Value> {
    match result {
        Ok(response) => Json(json!(response)),
        Err(e) => {
            error!(action = action.as_str(), error = %e, "file operation failed");
            Json(json!({ "success": false, "error": e.to_string() }))
        }
    }
}

/// The exists-checks answer `{exists}` rather than `{success, ...}`.
fn exists_shape(action: FileOpAction, result: Result<bool, FileOpError>) -> Json<Value> {
    match result {
        Ok(exists) => Json(json!({ "exists": exists })),
        Err(e) => {
            error!(action = action.as_str(), error = %e, "existence check failed");
            Json(json!({ "exists": false, "error": e.to_string() }))
        }
    }
}
