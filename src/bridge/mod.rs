//! Websocket message bus integration.
//!
//! The host delivers every bus message to registered handlers; this one
//! only claims messages whose `type` is `nz_workflow_manager` and
//! answers with a `nz_workflow_manager_response` envelope.
//!
//! Failure reporting follows the wire contract the frontend expects:
//! - read operations (list, load) report failures as a top-level
//!   `error` field;
//! - mutating operations (save, move, copy) report failures inside
//!   `result` as `{success: false, error}`.

pub mod protocol;

#[cfg(test)]
mod tests;

use std::env;
use std::path::Path;

use serde_json::{json, Value};
use tracing::{error, info};

use crate::constants::WEBSOCKET_MESSAGE_TYPE;
use crate::fileops::commands;
use crate::fileops::error::FileOpError;
use crate::fileops::listing::directory_listing;
use protocol::WsAction;

/// Handles one bus message. Returns `None` for messages addressed to
/// other handlers, `Some(response)` otherwise.
pub fn handle_message(message: &Value) -> Option<Value> {
    if message.get("type").and_then(Value::as_str) != Some(WEBSOCKET_MESSAGE_TYPE) {
        return None;
    }

    let action_raw = message
        .get("action")
        .and_then(Value::as_str)
        .unwrap_or("unknown");

    let Some(action) = WsAction::parse(action_raw) else {
        return Some(protocol::error_response(
            action_raw,
            format!("unsupported operation: {action_raw}"),
        ));
    };

    info!(action = action.as_str(), "websocket message");

    let response = match action {
        WsAction::ListDirectory => list_directory(str_field(message, "path")),
        WsAction::LoadWorkflow => load_workflow(str_field(message, "path")),
        WsAction::SaveWorkflow => save_workflow(message),
        WsAction::MoveFile => move_file(message),
        WsAction::CopyFile => copy_file(message),
    };

    Some(response)
}

fn str_field<'a>(message: &'a Value, key: &str) -> &'a str {
    message.get(key).and_then(Value::as_str).unwrap_or("")
}

fn opt_field<'a>(message: &'a Value, key: &str) -> Option<&'a str> {
    message
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn list_directory(path: &str) -> Value {
    let action = WsAction::ListDirectory.as_str();

    let resolved = if path.is_empty() {
        match env::current_dir() {
            Ok(cwd) => cwd,
            Err(e) => return read_failure(action, &FileOpError::Io(e)),
        }
    } else {
        Path::new(path).to_path_buf()
    };

    match directory_listing(&resolved, false) {
        Ok(listing) => protocol::result_response(action, json!(listing)),
        Err(e) => read_failure(action, &e),
    }
}

fn load_workflow(path: &str) -> Value {
    let action = WsAction::LoadWorkflow.as_str();
    match commands::load_workflow(path) {
        Ok(loaded) => protocol::result_response(action, json!(loaded)),
        Err(e) => read_failure(action, &e),
    }
}

fn save_workflow(message: &Value) -> Value {
    let action = WsAction::SaveWorkflow.as_str();
    let file_path = str_field(message, "file_path");
    let data = message
        .get("workflow_data")
        .cloned()
        .unwrap_or(Value::Null);

    match commands::save_workflow(file_path, &data) {
        Ok(saved) => protocol::result_response(action, json!(saved)),
        Err(e) => mutation_failure(action, &e),
    }
}

fn move_file(message: &Value) -> Value {
    let action = WsAction::MoveFile.as_str();
    match commands::move_file(
        str_field(message, "source_path"),
        str_field(message, "target_path"),
        opt_field(message, "new_filename"),
    ) {
        Ok(moved) => protocol::result_response(action, json!(moved)),
        Err(e) => mutation_failure(action, &e),
    }
}

fn copy_file(message: &Value) -> Value {
    let action = WsAction::CopyFile.as_str();
    match commands::copy_file(
        str_field(message, "source_path"),
        str_field(message, "target_path"),
        opt_field(message, "new_name"),
    ) {
        Ok(copied) => protocol::result_response(action, json!(copied)),
        Err(e) => mutation_failure(action, &e),
    }
}

fn read_failure(action: &str, e: &FileOpError) -> Value {
    error!(action, error = %e, "websocket read operation failed");
    protocol::error_response(action, e.to_string())
}

fn mutation_failure(action: &str, e: &FileOpError) -> Value {
    error!(action, error = %e, "websocket mutation failed");
    protocol::result_response(action, json!({ "success": false, "error": e.to_string() }))
}
