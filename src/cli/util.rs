//! CLI Common Utilities
//!
//! Shared initialization and context management for CLI commands.

use std::path::{Path, PathBuf};

use crate::config::{Config, ConfigLoader};
use crate::scanner::TreeWalker;
use crate::types::{DocError, ProjectRoot, Result};

/// Command execution context
///
/// Created once per invocation from `--root` (or the current directory)
/// and the merged configuration.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Project root directory
    pub root: ProjectRoot,
    /// Loaded configuration
    pub config: Config,
}

impl CommandContext {
    /// Resolve the root and load configuration for it
    pub fn load(root: Option<&Path>) -> Result<Self> {
        let root = resolve_root(root)?;
        let config = ConfigLoader::load(&root)?;
        Ok(Self { root, config })
    }

    pub fn with_config(root: ProjectRoot, config: Config) -> Self {
        Self { root, config }
    }

    /// Walker over every Markdown source under the root
    pub fn walker(&self) -> TreeWalker {
        TreeWalker::new(&self.root)
    }
}

/// `--root` if given, otherwise the current directory
pub fn resolve_root(root: Option<&Path>) -> Result<ProjectRoot> {
    match root {
        Some(path) => ProjectRoot::new(path),
        None => {
            let cwd = std::env::current_dir().map_err(DocError::Io)?;
            ProjectRoot::new(cwd)
        }
    }
}

/// Resolve a user-supplied file argument.
///
/// Relative paths are tried against the current directory first, then
/// against the project root.
pub fn resolve_input(root: &ProjectRoot, path: &Path) -> PathBuf {
    if path.is_absolute() || path.exists() {
        return path.to_path_buf();
    }
    root.join(path)
}
