//! Shared path and file helpers.

use std::io::Write;
use std::path::{Component, Path, PathBuf};

use super::{DocError, Result};

/// Collapse `.` and `..` segments without consulting the filesystem.
///
/// `..` at the filesystem root stays at the root, so `/p/../../etc` becomes
/// `/etc`. Symlinks are not resolved.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = match out.components().next_back() {
                    Some(Component::Normal(_)) => out.pop(),
                    Some(Component::RootDir) | Some(Component::Prefix(_)) => true,
                    _ => false,
                };
                if !popped {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Path of `path` relative to `root` with `/` separators.
///
/// Falls back to the full path when `path` is not under `root`.
pub fn rel_posix(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Replace `path` with `content` via a temp file in the same directory.
///
/// An interrupted run leaves the file either fully old or fully new.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| DocError::write(path, e))?;
    tmp.write_all(content.as_bytes())
        .and_then(|_| tmp.flush())
        .map_err(|e| DocError::write(path, e))?;

    // Keep the original permissions when replacing an existing file
    if let Ok(meta) = std::fs::metadata(path) {
        let _ = std::fs::set_permissions(tmp.path(), meta.permissions());
    }

    tmp.persist(path).map_err(|e| DocError::write(path, e.error))?;
    Ok(())
}
