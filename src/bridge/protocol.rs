//! Message envelope for the host's websocket bus.

use serde_json::{json, Value};

use crate::constants::WEBSOCKET_RESPONSE_TYPE;

/// Actions accepted over the websocket bus. A closed set: anything
/// else is answered with an error envelope, never dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WsAction {
    ListDirectory,
    LoadWorkflow,
    SaveWorkflow,
    MoveFile,
    CopyFile,
}

impl WsAction {
    pub fn parse(action: &str) -> Option<Self> {
        match action {
            "list_directory" => Some(Self::ListDirectory),
            "load_workflow" => Some(Self::LoadWorkflow),
            "save_workflow" => Some(Self::SaveWorkflow),
            "move_file" => Some(Self::MoveFile),
            "copy_file" => Some(Self::CopyFile),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ListDirectory => "list_directory",
            Self::LoadWorkflow => "load_workflow",
            Self::SaveWorkflow => "save_workflow",
            Self::MoveFile => "move_file",
            Self::CopyFile => "copy_file",
        }
    }
}

/// Successful dispatch: the operation outcome rides in `result`.
/// Operations that answer `{success: false, ...}` still use this
/// envelope; only undispatchable messages get [`error_response`].
pub fn result_response(action: &str, result: Value) -> Value {
    json!({
        "type": WEBSOCKET_RESPONSE_TYPE,
        "action": action,
        "result": result,
    })
}

/// Undispatchable message: unsupported action, or a read operation
/// that could not produce a result document.
pub fn error_response(action: &str, error: String) -> Value {
    json!({
        "type": WEBSOCKET_RESPONSE_TYPE,
        "action": action,
        "error": error,
    })
}
