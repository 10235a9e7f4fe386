use std::path::{Path, PathBuf};

use super::{DocError, ProjectRoot, Result};

/// Markdown source loaded from disk
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Root-relative path with `/` separators
    pub rel_path: String,
    pub content: String,
}

impl SourceFile {
    /// Read and decode a file as UTF-8.
    ///
    /// Decoding failures surface as `DocError::Read` with kind `InvalidData`.
    pub fn load(root: &ProjectRoot, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DocError::read(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            rel_path: root.relative(path),
            content,
        })
    }

    /// Directory links in this file are resolved against
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("/"))
    }
}
