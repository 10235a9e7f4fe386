pub mod asset;
pub mod error;
pub mod link;
pub mod source;
pub mod utils;

pub use asset::{AssetRecord, RenameEntry, RenameMap};
pub use error::{DocError, Result, ResultExt};
pub use link::{BrokenReason, Link, LinkKind, Resolution};
pub use source::SourceFile;
pub use utils::{normalize_lexically, rel_posix, write_atomic};

// =============================================================================
// Domain Newtypes
// =============================================================================

use std::fmt;
use std::path::{Path, PathBuf};

/// Absolute, canonicalized project root
///
/// Every path a run touches is either contained in this directory or
/// relative to a source file inside it. Constructed once per run and passed
/// explicitly to each component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectRoot(PathBuf);

impl ProjectRoot {
    /// Canonicalize `path` and check that it is a directory
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let canonical = path
            .canonicalize()
            .map_err(|e| DocError::invalid_root(path, e.to_string()))?;
        if !canonical.is_dir() {
            return Err(DocError::invalid_root(path, "not a directory"));
        }
        Ok(Self(canonical))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn join(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.0.join(rel)
    }

    /// Lexical containment check; never touches the filesystem
    pub fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.0)
    }

    /// Root-relative path in `/` form, or the path itself when outside the root
    pub fn relative(&self, path: &Path) -> String {
        rel_posix(&self.0, path)
    }
}

impl fmt::Display for ProjectRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl AsRef<Path> for ProjectRoot {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}
