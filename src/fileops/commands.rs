//! File and workflow operations.
//!
//! Each operation validates its arguments, checks the preconditions
//! specific to the operation, performs the OS primitive and returns a
//! typed result. Nothing here panics; every failure becomes a
//! [`FileOpError`] that the transport layers shape into a JSON error.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::error::FileOpError;
use super::listing::is_workflow_file;
use super::types::{
    CreateDirectoryResponse, DeleteResponse, PathExistsResponse, RenameResponse,
    SaveWorkflowResponse, TransferResponse, WorkflowLoaded,
};
use crate::validation::{validate_filename, validate_path};

fn require_valid_path(path: &str) -> Result<(), FileOpError> {
    if validate_path(path) {
        Ok(())
    } else {
        Err(FileOpError::InvalidPath)
    }
}

fn require_valid_name(name: &str) -> Result<(), FileOpError> {
    if validate_filename(name) {
        Ok(())
    } else {
        Err(FileOpError::InvalidName(name.to_string()))
    }
}

fn require_existing_file(path: &Path) -> Result<(), FileOpError> {
    if !path.exists() {
        return Err(FileOpError::NotFound(path.display().to_string()));
    }
    if !path.is_file() {
        return Err(FileOpError::NotAFile(path.display().to_string()));
    }
    Ok(())
}

fn require_existing_dir(path: &Path) -> Result<(), FileOpError> {
    if !path.exists() {
        return Err(FileOpError::NotFound(path.display().to_string()));
    }
    if !path.is_dir() {
        return Err(FileOpError::NotADirectory(path.display().to_string()));
    }
    Ok(())
}

/// Final name for a transfer target: the validated override if given,
/// otherwise the source's own file name.
fn target_name(source: &Path, new_name: Option<&str>) -> Result<String, FileOpError> {
    match new_name {
        Some(name) if !name.is_empty() => {
            require_valid_name(name)?;
            Ok(name.to_string())
        }
        _ => source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or(FileOpError::InvalidPath),
    }
}

/// Creates `parent_path/directory_name`. Fails if the target exists.
pub fn create_directory(
    parent_path: &str,
    directory_name: &str,
) -> Result<CreateDirectoryResponse, FileOpError> {
    require_valid_path(parent_path)?;
    require_valid_name(directory_name)?;

    let new_directory = Path::new(parent_path).join(directory_name);
    if new_directory.exists() {
        return Err(FileOpError::AlreadyExists(
            new_directory.display().to_string(),
        ));
    }

    fs::create_dir_all(&new_directory)?;
    info!(path = %new_directory.display(), "created directory");

    Ok(CreateDirectoryResponse {
        success: true,
        path: new_directory.display().to_string(),
    })
}

/// Deletes a single file.
pub fn delete_file(file_path: &str) -> Result<DeleteResponse, FileOpError> {
    require_valid_path(file_path)?;
    let path = Path::new(file_path);
    require_existing_file(path)?;

    fs::remove_file(path)?;
    info!(path = file_path, "deleted file");

    Ok(DeleteResponse {
        success: true,
        path: file_path.to_string(),
    })
}

/// Deletes a directory and everything under it.
pub fn delete_directory(directory_path: &str) -> Result<DeleteResponse, FileOpError> {
    require_valid_path(directory_path)?;
    let path = Path::new(directory_path);
    require_existing_dir(path)?;

    fs::remove_dir_all(path)?;
    info!(path = directory_path, "deleted directory");

    Ok(DeleteResponse {
        success: true,
        path: directory_path.to_string(),
    })
}

/// Existence probe returning file/directory flags alongside the verdict.
pub fn path_exists(path: &str) -> Result<PathExistsResponse, FileOpError> {
    if path.is_empty() {
        return Err(FileOpError::MissingField("path"));
    }

    let p = Path::new(path);
    let exists = p.exists();

    Ok(PathExistsResponse {
        success: true,
        exists,
        is_directory: exists && p.is_dir(),
        is_file: exists && p.is_file(),
        path: path.to_string(),
    })
}

/// Bare file-existence check.
pub fn file_exists(path: &str) -> Result<bool, FileOpError> {
    if path.is_empty() {
        return Err(FileOpError::MissingField("path"));
    }
    let p = Path::new(path);
    Ok(p.exists() && p.is_file())
}

/// Bare directory-existence check.
pub fn directory_exists(path: &str) -> Result<bool, FileOpError> {
    if path.is_empty() {
        return Err(FileOpError::MissingField("path"));
    }
    let p = Path::new(path);
    Ok(p.exists() && p.is_dir())
}

/// Copies a file into an existing directory, optionally under a new
/// name. An existing destination file is overwritten.
pub fn copy_file(
    source_path: &str,
    target_path: &str,
    new_name: Option<&str>,
) -> Result<TransferResponse, FileOpError> {
    require_valid_path(source_path)?;
    require_valid_path(target_path)?;

    let source = Path::new(source_path);
    let target_dir = Path::new(target_path);
    require_existing_file(source)?;
    require_existing_dir(target_dir)?;

    let full_target = target_dir.join(target_name(source, new_name)?);
    fs::copy(source, &full_target)?;
    info!(source = source_path, target = %full_target.display(), "copied file");

    Ok(TransferResponse {
        success: true,
        source: source_path.to_string(),
        target: full_target.display().to_string(),
        operation: None,
    })
}

/// Copies a directory tree into an existing directory. A same-named
/// destination directory is removed first: this is destructive
/// overwrite, not merge.
pub fn copy_directory(
    source_path: &str,
    target_path: &str,
    new_name: Option<&str>,
) -> Result<TransferResponse, FileOpError> {
    require_valid_path(source_path)?;
    require_valid_path(target_path)?;

    let source = Path::new(source_path);
    let target_dir = Path::new(target_path);
    require_existing_dir(source)?;
    require_existing_dir(target_dir)?;

    let full_target = target_dir.join(target_name(source, new_name)?);
    if full_target.exists() {
        fs::remove_dir_all(&full_target)?;
    }
    copy_dir_recursive(source, &full_target)?;
    info!(source = source_path, target = %full_target.display(), "copied directory");

    Ok(TransferResponse {
        success: true,
        source: source_path.to_string(),
        target: full_target.display().to_string(),
        operation: None,
    })
}

fn copy_dir_recursive(source: &Path, target: &Path) -> Result<(), FileOpError> {
    let options = fs_extra::dir::CopyOptions::new().copy_inside(true);
    fs_extra::dir::copy(source, target, &options)?;
    Ok(())
}

/// Moves a file into an existing directory, optionally renaming it on
/// the way. An existing destination file is overwritten.
pub fn move_file(
    source_path: &str,
    target_path: &str,
    new_filename: Option<&str>,
) -> Result<TransferResponse, FileOpError> {
    require_valid_path(source_path)?;
    require_valid_path(target_path)?;

    let source = Path::new(source_path);
    let target_dir = Path::new(target_path);
    require_existing_file(source)?;
    require_existing_dir(target_dir)?;

    let full_target = target_dir.join(target_name(source, new_filename)?);
    move_file_primitive(source, &full_target)?;
    info!(source = source_path, target = %full_target.display(), "moved file");

    Ok(TransferResponse {
        success: true,
        source: source_path.to_string(),
        target: full_target.display().to_string(),
        operation: None,
    })
}

/// Rename when possible, copy+remove when the target sits on another
/// filesystem.
fn move_file_primitive(source: &Path, target: &Path) -> Result<(), FileOpError> {
    if fs::rename(source, target).is_ok() {
        return Ok(());
    }
    fs::copy(source, target)?;
    fs::remove_file(source)?;
    Ok(())
}

/// Moves a directory into an existing directory, or renames it in place
/// when `rename` is set.
///
/// The plain move removes a same-named destination directory first
/// (destructive overwrite). The rename variant instead fails when the
/// destination exists and requires the new name to validate.
pub fn move_directory(
    source_path: &str,
    target_path: &str,
    new_name: Option<&str>,
    rename: bool,
) -> Result<TransferResponse, FileOpError> {
    require_valid_path(source_path)?;
    let source = Path::new(source_path);
    require_existing_dir(source)?;

    require_valid_path(target_path)?;
    let target_dir = Path::new(target_path);
    require_existing_dir(target_dir)?;

    if rename {
        let name = new_name.filter(|n| !n.is_empty()).ok_or(FileOpError::MissingField("new_name"))?;
        require_valid_name(name)?;

        let full_target = target_dir.join(name);
        if full_target.exists() {
            return Err(FileOpError::AlreadyExists(full_target.display().to_string()));
        }

        fs::rename(source, &full_target)?;
        info!(source = source_path, target = %full_target.display(), "renamed directory");

        return Ok(TransferResponse {
            success: true,
            source: source_path.to_string(),
            target: full_target.display().to_string(),
            operation: Some("rename"),
        });
    }

    let full_target = target_dir.join(target_name(source, None)?);
    if full_target.exists() {
        fs::remove_dir_all(&full_target)?;
    }
    move_dir_primitive(source, &full_target)?;
    info!(source = source_path, target = %full_target.display(), "moved directory");

    Ok(TransferResponse {
        success: true,
        source: source_path.to_string(),
        target: full_target.display().to_string(),
        operation: Some("move"),
    })
}

fn move_dir_primitive(source: &Path, target: &Path) -> Result<(), FileOpError> {
    if fs::rename(source, target).is_ok() {
        return Ok(());
    }
    copy_dir_recursive(source, target)?;
    fs::remove_dir_all(source)?;
    Ok(())
}

/// Renames a file or directory. The destination is either an explicit
/// `target_path` (whose final component supplies the new name) or a
/// `new_name` resolved against the source's parent directory. Fails if
/// the destination already exists.
pub fn rename(
    source_path: &str,
    target_path: Option<&str>,
    new_name: Option<&str>,
) -> Result<RenameResponse, FileOpError> {
    if source_path.is_empty() {
        return Err(FileOpError::MissingField("source_path"));
    }
    require_valid_path(source_path)?;

    let source = Path::new(source_path);
    if !source.exists() {
        return Err(FileOpError::NotFound(source_path.to_string()));
    }

    let (final_target, name) = match (target_path.filter(|t| !t.is_empty()), new_name.filter(|n| !n.is_empty())) {
        (Some(target), _) => {
            let name = Path::new(target)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .ok_or(FileOpError::InvalidPath)?;
            (PathBuf::from(target), name)
        }
        (None, Some(name)) => {
            let parent = source.parent().unwrap_or_else(|| Path::new(""));
            (parent.join(name), name.to_string())
        }
        (None, None) => return Err(FileOpError::MissingField("target_path or new_name")),
    };

    require_valid_name(&name)?;

    if final_target.exists() {
        return Err(FileOpError::AlreadyExists(final_target.display().to_string()));
    }

    fs::rename(source, &final_target)?;
    info!(source = source_path, target = %final_target.display(), "renamed");

    Ok(RenameResponse {
        success: true,
        source_path: source_path.to_string(),
        target_path: final_target.display().to_string(),
    })
}

/// Reads a workflow file and returns its raw content.
pub fn load_workflow(path: &str) -> Result<WorkflowLoaded, FileOpError> {
    if path.is_empty() {
        return Err(FileOpError::MissingField("path"));
    }

    let p = Path::new(path);
    require_existing_file(p)?;

    if !is_workflow_file(path) {
        return Err(FileOpError::UnsupportedExtension);
    }

    let data = fs::read_to_string(p)?;
    info!(path, bytes = data.len(), "workflow loaded");

    Ok(WorkflowLoaded {
        path: path.to_string(),
        data,
        kind: "workflow_loaded",
    })
}

/// Writes a workflow file, appending `.json` when the extension is
/// missing and creating parent directories as needed. String payloads
/// must parse as JSON; object payloads are pretty-printed. An existing
/// file is overwritten without confirmation.
pub fn save_workflow(
    file_path: &str,
    workflow_data: &serde_json::Value,
) -> Result<SaveWorkflowResponse, FileOpError> {
    if file_path.is_empty() {
        return Err(FileOpError::MissingField("file_path"));
    }

    let content = match workflow_data {
        serde_json::Value::Null => return Err(FileOpError::MissingField("workflow_data")),
        serde_json::Value::String(raw) => {
            if raw.is_empty() {
                return Err(FileOpError::MissingField("workflow_data"));
            }
            serde_json::from_str::<serde::de::IgnoredAny>(raw)
                .map_err(|e| FileOpError::InvalidWorkflowJson(e.to_string()))?;
            raw.clone()
        }
        other => serde_json::to_string_pretty(other)?,
    };

    let target = ensure_json_extension(file_path);
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(&target, &content)?;
    info!(path = %target.display(), bytes = content.len(), "workflow saved");

    Ok(SaveWorkflowResponse {
        success: true,
        file_path: target.display().to_string(),
        size: content.len(),
    })
}

fn ensure_json_extension(path: &str) -> PathBuf {
    if is_workflow_file(path) {
        PathBuf::from(path)
    } else {
        PathBuf::from(format!("{path}.json"))
    }
}
