use std::fs;

use serde_json::json;
use tempfile::TempDir;

use super::handle_message;
use crate::constants::{WEBSOCKET_MESSAGE_TYPE, WEBSOCKET_RESPONSE_TYPE};

#[test]
fn test_foreign_message_type_is_ignored() {
    assert!(handle_message(&json!({ "type": "crystools.monitor" })).is_none());
    assert!(handle_message(&json!({ "action": "list_directory" })).is_none());
    assert!(handle_message(&json!("not an object")).is_none());
}

#[test]
fn test_unsupported_action_gets_error_envelope() {
    let response = handle_message(&json!({
        "type": WEBSOCKET_MESSAGE_TYPE,
        "action": "format_disk",
    }))
    .unwrap();

    assert_eq!(response["type"], WEBSOCKET_RESPONSE_TYPE);
    assert_eq!(response["action"], "format_disk");
    assert!(response["error"]
        .as_str()
        .unwrap()
        .contains("unsupported operation"));
    assert!(response.get("result").is_none());
}

#[test]
fn test_missing_action_gets_error_envelope() {
    let response = handle_message(&json!({ "type": WEBSOCKET_MESSAGE_TYPE })).unwrap();
    assert_eq!(response["action"], "unknown");
    assert!(response["error"].as_str().is_some());
}

#[test]
fn test_list_directory_result() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("models")).unwrap();
    fs::write(tmp.path().join("wf.json"), "{}").unwrap();

    let response = handle_message(&json!({
        "type": WEBSOCKET_MESSAGE_TYPE,
        "action": "list_directory",
        "path": tmp.path().display().to_string(),
    }))
    .unwrap();

    assert_eq!(response["type"], WEBSOCKET_RESPONSE_TYPE);
    assert_eq!(response["action"], "list_directory");
    let result = &response["result"];
    assert_eq!(result["type"], "directory_listing");
    assert_eq!(result["directories"][0]["name"], "models");
    assert_eq!(result["files"][0]["name"], "wf.json");
}

#[test]
fn test_list_directory_missing_path_is_top_level_error() {
    let tmp = TempDir::new().unwrap();
    let response = handle_message(&json!({
        "type": WEBSOCKET_MESSAGE_TYPE,
        "action": "list_directory",
        "path": tmp.path().join("nope").display().to_string(),
    }))
    .unwrap();

    assert!(response["error"].as_str().is_some());
    assert!(response.get("result").is_none());
}

#[test]
fn test_load_workflow_result() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("wf.json");
    fs::write(&file, "{\"nodes\":[]}").unwrap();

    let response = handle_message(&json!({
        "type": WEBSOCKET_MESSAGE_TYPE,
        "action": "load_workflow",
        "path": file.display().to_string(),
    }))
    .unwrap();

    assert_eq!(response["result"]["type"], "workflow_loaded");
    assert_eq!(response["result"]["data"], "{\"nodes\":[]}");
}

#[test]
fn test_save_workflow_success_and_failure_shapes() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("saved.json");

    let ok = handle_message(&json!({
        "type": WEBSOCKET_MESSAGE_TYPE,
        "action": "save_workflow",
        "file_path": file.display().to_string(),
        "workflow_data": "{\"a\":1}",
    }))
    .unwrap();

    assert_eq!(ok["result"]["success"], true);
    assert_eq!(ok["result"]["size"], 7);
    assert_eq!(fs::read_to_string(&file).unwrap(), "{\"a\":1}");

    // mutation failures live inside result, not at the top level
    let err = handle_message(&json!({
        "type": WEBSOCKET_MESSAGE_TYPE,
        "action": "save_workflow",
        "file_path": file.display().to_string(),
        "workflow_data": "not json",
    }))
    .unwrap();

    assert_eq!(err["result"]["success"], false);
    assert!(err["result"]["error"].as_str().is_some());
    assert!(err.get("error").is_none());
}

#[test]
fn test_move_file_over_bus() {
    let tmp = TempDir::new().unwrap();
    let target = tmp.path().join("dest");
    fs::create_dir(&target).unwrap();
    let source = tmp.path().join("a.json");
    fs::write(&source, "{}").unwrap();

    let response = handle_message(&json!({
        "type": WEBSOCKET_MESSAGE_TYPE,
        "action": "move_file",
        "source_path": source.display().to_string(),
        "target_path": target.display().to_string(),
        "new_filename": "b.json",
    }))
    .unwrap();

    assert_eq!(response["result"]["success"], true);
    assert!(!source.exists());
    assert!(target.join("b.json").exists());
}

#[test]
fn test_copy_file_over_bus() {
    let tmp = TempDir::new().unwrap();
    let target = tmp.path().join("dest");
    fs::create_dir(&target).unwrap();
    let source = tmp.path().join("a.json");
    fs::write(&source, "{}").unwrap();

    let response = handle_message(&json!({
        "type": WEBSOCKET_MESSAGE_TYPE,
        "action": "copy_file",
        "source_path": source.display().to_string(),
        "target_path": target.display().to_string(),
    }))
    .unwrap();

    assert_eq!(response["result"]["success"], true);
    assert!(source.exists());
    assert!(target.join("a.json").exists());
}

#[test]
fn test_copy_file_missing_source_is_result_failure() {
    let tmp = TempDir::new().unwrap();
    let response = handle_message(&json!({
        "type": WEBSOCKET_MESSAGE_TYPE,
        "action": "copy_file",
        "source_path": tmp.path().join("ghost.json").display().to_string(),
        "target_path": tmp.path().display().to_string(),
    }))
    .unwrap();

    assert_eq!(response["result"]["success"], false);
}
