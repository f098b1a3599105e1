//! Wire types for file operations.
//!
//! Field names follow the plugin's JSON contract (snake_case), so the
//! default serde behavior is the wire format.

use serde::{Deserialize, Serialize};

/// Closed set of operations accepted by the `/file_operations` endpoint.
///
/// Requests carry the operation as a free-form string; parsing it into
/// this enum keeps dispatch exhaustive so adding or removing an operation
/// is a compile-time-checked change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOpAction {
    ListDirectory,
    CreateDirectory,
    DeleteFile,
    DeleteDirectory,
    PathExists,
    CopyFile,
    CopyDirectory,
    MoveFile,
    MoveDirectory,
    Rename,
    CheckFileExists,
    CheckDirectoryExists,
    SaveWorkflow,
}

impl FileOpAction {
    pub fn parse(action: &str) -> Option<Self> {
        Some(match action {
            "list_directory" => Self::ListDirectory,
            "create_directory" => Self::CreateDirectory,
            "delete_file" => Self::DeleteFile,
            "delete_directory" => Self::DeleteDirectory,
            "path_exists" => Self::PathExists,
            "copy_file" => Self::CopyFile,
            "copy_directory" => Self::CopyDirectory,
            "move_file" => Self::MoveFile,
            "move_directory" => Self::MoveDirectory,
            "rename" => Self::Rename,
            "check_file_exists" => Self::CheckFileExists,
            "check_directory_exists" => Self::CheckDirectoryExists,
            "save_workflow" => Self::SaveWorkflow,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ListDirectory => "list_directory",
            Self::CreateDirectory => "create_directory",
            Self::DeleteFile => "delete_file",
            Self::DeleteDirectory => "delete_directory",
            Self::PathExists => "path_exists",
            Self::CopyFile => "copy_file",
            Self::CopyDirectory => "copy_directory",
            Self::MoveFile => "move_file",
            Self::MoveDirectory => "move_directory",
            Self::Rename => "rename",
            Self::CheckFileExists => "check_file_exists",
            Self::CheckDirectoryExists => "check_directory_exists",
            Self::SaveWorkflow => "save_workflow",
        }
    }
}

/// Parameter bag for `/file_operations` requests. Accepted as query
/// parameters, a JSON body or a form-encoded body; each operation pulls
/// out the fields it needs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileOpRequest {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub parent_path: Option<String>,
    #[serde(default)]
    pub directory_name: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub directory_path: Option<String>,
    #[serde(default)]
    pub source_path: Option<String>,
    #[serde(default)]
    pub old_path: Option<String>,
    #[serde(default)]
    pub target_path: Option<String>,
    #[serde(default)]
    pub new_name: Option<String>,
    #[serde(default)]
    pub new_filename: Option<String>,
    #[serde(default)]
    pub operation_type: Option<String>,
    /// Workflow payload: either a raw JSON string or an already-parsed
    /// object (the JSON body form allows both).
    #[serde(default)]
    pub workflow_data: Option<serde_json::Value>,
}

/// Last-modified date of a directory entry.
///
/// A failed stat call must not drop the entry or abort the listing, so
/// the unknown case is part of the model instead of a magic string in
/// the producer. On the wire `Unknown` serializes as `--/--/--`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryDate {
    /// Formatted as `MM/DD/YY`.
    Known(String),
    Unknown,
}

impl Serialize for EntryDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            EntryDate::Known(date) => serializer.serialize_str(date),
            EntryDate::Unknown => serializer.serialize_str("--/--/--"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DirectoryEntry {
    pub name: String,
    pub date: EntryDate,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileEntry {
    pub name: String,
    pub date: EntryDate,
    pub size: u64,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub is_workflow: bool,
}

/// Result of listing a directory. Directories and files are sorted
/// case-insensitively by name; files are filtered to the workflow
/// extension allow-list.
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryListing {
    pub path: String,
    pub directories: Vec<DirectoryEntry>,
    pub files: Vec<FileEntry>,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowLoaded {
    pub path: String,
    pub data: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateDirectoryResponse {
    pub success: bool,
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PathExistsResponse {
    pub success: bool,
    pub exists: bool,
    pub is_directory: bool,
    pub is_file: bool,
    pub path: String,
}

/// Response for copy and move operations.
#[derive(Debug, Clone, Serialize)]
pub struct TransferResponse {
    pub success: bool,
    pub source: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenameResponse {
    pub success: bool,
    pub source_path: String,
    pub target_path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SaveWorkflowResponse {
    pub success: bool,
    pub file_path: String,
    pub size: usize,
}
