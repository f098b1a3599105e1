//! Path and filename validation.
//!
//! Every request that touches the filesystem runs through these checks
//! before any OS primitive is called. All functions return plain booleans;
//! callers surface a generic invalid-path error rather than leaking which
//! check failed.

use std::path::{Component, Path, PathBuf};

use crate::constants::{INVALID_FILENAME_CHARS, MAX_FILENAME_LEN, RESERVED_DEVICE_NAMES};

/// Characters rejected inside paths. Separators (`/`, `\`) are legal here,
/// and `:` is handled separately because of Windows drive letters.
const ILLEGAL_PATH_CHARS: &[char] = &['<', '>', '"', '|', '?', '*'];

/// Checks that a request path is non-empty, free of parent-directory
/// traversal segments and free of illegal characters.
///
/// On Windows a single drive-letter colon (`C:\...`) is exempted from the
/// colon check; every other colon is rejected on all platforms.
pub fn validate_path(path: &str) -> bool {
    if path.trim().is_empty() {
        return false;
    }

    if Path::new(path)
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return false;
    }

    let to_check = strip_drive_prefix(path);
    if to_check.chars().any(|c| ILLEGAL_PATH_CHARS.contains(&c)) {
        return false;
    }
    if to_check.contains(':') {
        return false;
    }

    true
}

/// Checks a single file or directory name: non-empty, no illegal
/// characters, not a reserved device name, at most 255 characters.
pub fn validate_filename(name: &str) -> bool {
    if name.trim().is_empty() {
        return false;
    }

    if name.chars().any(|c| INVALID_FILENAME_CHARS.contains(&c)) {
        return false;
    }

    if is_reserved_name(name) {
        return false;
    }

    name.chars().count() <= MAX_FILENAME_LEN
}

/// Rewrites a name so it always passes [`validate_filename`]: illegal
/// characters become `_`, reserved names get a `_` prefix, overlong names
/// are truncated.
pub fn sanitize_filename(name: &str) -> String {
    let mut sanitized: String = name
        .chars()
        .map(|c| {
            if INVALID_FILENAME_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect();

    sanitized = sanitized.trim().to_string();

    if is_reserved_name(&sanitized) {
        sanitized = format!("_{sanitized}");
    }

    if sanitized.chars().count() > MAX_FILENAME_LEN {
        sanitized = sanitized.chars().take(MAX_FILENAME_LEN).collect();
    }

    sanitized
}

/// Containment check for static file serving: the candidate, once made
/// absolute and lexically normalized, must live under the base directory.
///
/// Normalization is purely lexical (no symlink resolution), so a literal
/// `..` that escapes the base is caught even when the path does not exist.
pub fn is_safe_path(candidate: &Path, base: &Path) -> bool {
    match (absolutize(candidate), absolutize(base)) {
        (Some(candidate), Some(base)) => candidate.starts_with(&base),
        _ => false,
    }
}

/// Makes a path absolute against the current working directory and
/// resolves `.`/`..` components lexically.
fn absolutize(path: &Path) -> Option<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().ok()?.join(path)
    };

    let mut resolved = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::ParentDir => {
                resolved.pop();
            }
            Component::CurDir => {}
            other => resolved.push(other.as_os_str()),
        }
    }
    Some(resolved)
}

fn is_reserved_name(name: &str) -> bool {
    RESERVED_DEVICE_NAMES
        .iter()
        .any(|reserved| name.eq_ignore_ascii_case(reserved))
}

/// Strips a leading `C:`-style drive prefix on Windows so the colon check
/// only sees the remainder of the path.
fn strip_drive_prefix(path: &str) -> &str {
    if cfg!(windows)
        && path.len() >= 2
        && path.as_bytes()[1] == b':'
        && path
            .chars()
            .next()
            .map(|c| c.is_ascii_alphabetic())
            .unwrap_or(false)
    {
        &path[2..]
    } else {
        path
    }
}
