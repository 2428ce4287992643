//! Path computation without touching the filesystem

use forge_errors::Error;
use std::path::{Component, Path, PathBuf};

/// Make `path` absolute against the current directory and collapse `.` and
/// `..` components lexically. Symlinks are left alone.
///
/// # Errors
///
/// Returns an error if `path` is relative and the current directory cannot
/// be determined.
pub fn absolute_path(path: &Path) -> Result<PathBuf, Error> {
    if path.is_absolute() {
        return Ok(normalize_lexically(path));
    }

    let cwd = std::env::current_dir().map_err(|e| Error::io_with_path(&e, path))?;
    Ok(normalize_lexically(&cwd.join(path)))
}

/// Resolve `.` and `..` without consulting the filesystem
///
/// `..` at the root stays at the root; leading `..` on a relative path are kept.
#[must_use]
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    let mut depth = 0usize;

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                normalized.push(component);
                depth = 0;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if depth > 0 {
                    normalized.pop();
                    depth -= 1;
                } else if !normalized.has_root() {
                    normalized.push("..");
                }
            }
            Component::Normal(name) => {
                normalized.push(name);
                depth += 1;
            }
        }
    }

    if normalized.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}
