//! Stat-based entry info and directory listings.

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::OffsetDateTime;
use tracing::debug;

use super::error::FileOpError;
use super::types::{DirectoryEntry, DirectoryListing, EntryDate, FileEntry};
use crate::constants::SUPPORTED_WORKFLOW_EXTENSIONS;

const DATE_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[month]/[day]/[year repr:last_two]");

/// Whether a name carries one of the workflow extensions (`.json`).
pub fn is_workflow_file(name: &str) -> bool {
    let lower = name.to_lowercase();
    SUPPORTED_WORKFLOW_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(ext))
}

/// Formats a modification time as `MM/DD/YY`.
fn format_mtime(mtime: SystemTime) -> EntryDate {
    let datetime = OffsetDateTime::from(mtime);
    match datetime.format(DATE_FORMAT) {
        Ok(formatted) => EntryDate::Known(formatted),
        Err(_) => EntryDate::Unknown,
    }
}

/// Lists a directory, splitting entries into directories and workflow
/// files. Hidden (dot-prefixed) entries are skipped unless requested.
///
/// A per-entry stat failure yields [`EntryDate::Unknown`] rather than
/// dropping the entry or aborting the listing. A missing path or a
/// non-directory is an error, which keeps "directory does not exist"
/// distinguishable from "directory is empty".
pub fn directory_listing(
    path: &Path,
    include_hidden: bool,
) -> Result<DirectoryListing, FileOpError> {
    if !path.exists() {
        return Err(FileOpError::NotFound(path.display().to_string()));
    }
    if !path.is_dir() {
        return Err(FileOpError::NotADirectory(path.display().to_string()));
    }

    let mut directories = Vec::new();
    let mut files = Vec::new();

    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();

        if !include_hidden && name.starts_with('.') {
            continue;
        }

        let metadata = entry.metadata().ok();
        let date = metadata
            .as_ref()
            .and_then(|m| m.modified().ok())
            .map(format_mtime)
            .unwrap_or(EntryDate::Unknown);

        // Classification falls back to a direct stat when the entry
        // metadata was unreadable; an unreadable path counts as a file.
        let is_dir = metadata
            .as_ref()
            .map(|m| m.is_dir())
            .unwrap_or_else(|| entry.path().is_dir());

        if is_dir {
            directories.push(DirectoryEntry {
                name,
                date,
                kind: "directory",
            });
        } else if is_workflow_file(&name) {
            let size = metadata.map(|m| m.len()).unwrap_or(0);
            files.push(FileEntry {
                name,
                date,
                size,
                kind: "file",
                is_workflow: true,
            });
        }
    }

    directories.sort_by_key(|e| e.name.to_lowercase());
    files.sort_by_key(|e| e.name.to_lowercase());

    debug!(
        path = %path.display(),
        directories = directories.len(),
        files = files.len(),
        "directory listed"
    );

    Ok(DirectoryListing {
        path: path.display().to_string(),
        directories,
        files,
        kind: "directory_listing",
    })
}
