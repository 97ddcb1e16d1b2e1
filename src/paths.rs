//! Path helpers
//!
//! The build tool reports paths relative to a solution or project directory.
//! Paths of existing files are canonicalized, so a project reached through a
//! symlink has one identity. A path that does not exist (a project that was
//! since moved) falls back to lexical normalization.

use std::path::{Component, Path, PathBuf};

/// Convert separators reported by the build tool to the host convention
pub fn from_tool_output(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    if cfg!(windows) {
        PathBuf::from(trimmed)
    } else {
        PathBuf::from(trimmed.replace('\\', "/"))
    }
}

/// Resolve `path` against `base` and canonicalize the result
pub fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        canonical(path)
    } else {
        canonical(&base.join(path))
    }
}

/// Make a path absolute using the current directory, then canonicalize it
pub fn absolute(path: &Path) -> PathBuf {
    match std::path::absolute(path) {
        Ok(abs) => canonical(&abs),
        Err(_) => canonical(path),
    }
}

/// Canonical path of an existing file, else the lexically normalized path
pub fn canonical(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| normalize(path))
}

/// Remove `.` and `..` components
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Directory containing a file, falling back to the current directory
pub fn parent_dir(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
