//! Error types for file operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileOpError {
    #[error("invalid path")]
    InvalidPath,

    #[error("invalid name: {0}")]
    InvalidName(String),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("path does not exist: {0}")]
    NotFound(String),

    #[error("path is not a file: {0}")]
    NotAFile(String),

    #[error("path is not a directory: {0}")]
    NotADirectory(String),

    #[error("target already exists: {0}")]
    AlreadyExists(String),

    #[error("only JSON workflow files are supported")]
    UnsupportedExtension,

    #[error("workflow data is not valid JSON: {0}")]
    InvalidWorkflowJson(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("copy failed: {0}")]
    Copy(#[from] fs_extra::error::Error),
}

impl serde::Serialize for FileOpError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
