//! Graph-node declarations for the host UI.
//!
//! The host discovers nodes from a declaration table: a class name, a
//! display name and an input/output signature. Execution goes through
//! [`WorkflowManagerNode::run`], which answers with a JSON document as
//! a string on success and a human-readable message on failure. Node
//! outputs are strings either way; a node never faults.

use std::env;
use std::path::Path;

use serde_json::json;
use tracing::error;

use crate::constants::NODE_CATEGORY;
use crate::fileops::commands;
use crate::fileops::listing::directory_listing;

// ============================================================================
// Declaration metadata
// ============================================================================

/// Input widget description, one entry per required node input.
#[derive(Debug, Clone)]
pub struct InputSpec {
    pub name: &'static str,
    /// Widget type, or a closed choice list when `choices` is set.
    pub widget: &'static str,
    pub choices: &'static [&'static str],
    pub default: &'static str,
    pub multiline: bool,
}

/// One node as the host's graph UI sees it.
#[derive(Debug, Clone)]
pub struct NodeSpec {
    pub class_name: &'static str,
    pub display_name: &'static str,
    pub category: &'static str,
    pub inputs: &'static [InputSpec],
    pub return_types: &'static [&'static str],
}

const WORKFLOW_MANAGER_INPUTS: &[InputSpec] = &[
    InputSpec {
        name: "action",
        widget: "COMBO",
        choices: &["list_directory", "load_workflow", "save_workflow"],
        default: "list_directory",
        multiline: false,
    },
    InputSpec {
        name: "path",
        widget: "STRING",
        choices: &[],
        default: "",
        multiline: false,
    },
    InputSpec {
        name: "workflow_data",
        widget: "STRING",
        choices: &[],
        default: "{}",
        multiline: true,
    },
];

/// Declaration table the host consumes at plugin load.
pub fn node_class_mappings() -> Vec<NodeSpec> {
    vec![
        NodeSpec {
            class_name: "NZ_Base",
            display_name: "⭐ NZ Workflow Manager",
            category: NODE_CATEGORY,
            inputs: &[],
            return_types: &["STRING"],
        },
        NodeSpec {
            class_name: "NZ_Workflow_Manager",
            display_name: "📁 NZ Workflow Manager",
            category: NODE_CATEGORY,
            inputs: WORKFLOW_MANAGER_INPUTS,
            return_types: &["STRING"],
        },
    ]
}

// ============================================================================
// Node execution
// ============================================================================

/// Liveness node: zero inputs, fixed output. Its presence in the
/// declaration table confirms the plugin loaded.
#[derive(Debug, Default)]
pub struct BaseNode;

impl BaseNode {
    pub fn run(&self) -> &'static str {
        "⭐ NZ plugin activated"
    }
}

/// Filesystem node backing the `NZ_Workflow_Manager` declaration.
#[derive(Debug, Default)]
pub struct WorkflowManagerNode;

impl WorkflowManagerNode {
    pub fn run(&self, action: &str, path: &str, workflow_data: &str) -> String {
        match action {
            "list_directory" => self.list_directory(path),
            "load_workflow" => self.load_workflow(path),
            "save_workflow" => self.save_workflow(path, workflow_data),
            other => format!("unknown operation: {other}"),
        }
    }

    /// Lists `path`, or the process working directory when `path` is
    /// empty.
    pub fn list_directory(&self, path: &str) -> String {
        let resolved = if path.is_empty() {
            match env::current_dir() {
                Ok(cwd) => cwd,
                Err(e) => return operation_failed("list directory", &e.to_string()),
            }
        } else {
            Path::new(path).to_path_buf()
        };

        match directory_listing(&resolved, false) {
            Ok(listing) => stringify(&json!(listing)),
            Err(e) => operation_failed("list directory", &e.to_string()),
        }
    }

    pub fn load_workflow(&self, path: &str) -> String {
        if path.is_empty() {
            return "workflow file path is required".to_string();
        }
        match commands::load_workflow(path) {
            Ok(loaded) => stringify(&json!(loaded)),
            Err(e) => operation_failed("load workflow", &e.to_string()),
        }
    }

    /// Appends `.json` when missing and refuses payloads that are not
    /// well-formed JSON, then overwrites without confirmation.
    pub fn save_workflow(&self, path: &str, workflow_data: &str) -> String {
        if path.is_empty() {
            return "save path is required".to_string();
        }
        let data = serde_json::Value::String(workflow_data.to_string());
        match commands::save_workflow(path, &data) {
            Ok(saved) => stringify(&json!({
                "path": saved.file_path,
                "message": "workflow saved",
                "type": "workflow_saved",
            })),
            Err(e) => operation_failed("save workflow", &e.to_string()),
        }
    }
}

fn operation_failed(what: &str, message: &str) -> String {
    error!(operation = what, error = message, "node operation failed");
    format!("failed to {what}: {message}")
}

fn stringify(value: &serde_json::Value) -> String {
    value.to_string()
}

// ============================================================================
// Tests
// ============================================================================
