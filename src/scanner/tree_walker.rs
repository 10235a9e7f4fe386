use ignore::{DirEntry, WalkBuilder};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::constants::{assets, scan};
use crate::types::{DocError, ProjectRoot, Result, SourceFile};

/// File that was found but could not be loaded
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub path: String,
    pub reason: String,
}

/// Markdown sources loaded for one run
#[derive(Debug, Default)]
pub struct LoadedSources {
    pub sources: Vec<SourceFile>,
    pub skipped: Vec<SkippedFile>,
}

pub struct TreeWalker {
    root: ProjectRoot,
    only: Vec<glob::Pattern>,
}

impl TreeWalker {
    pub fn new(root: &ProjectRoot) -> Self {
        Self {
            root: root.clone(),
            only: vec![],
        }
    }

    /// Restrict Markdown sources to root-relative paths matching any pattern
    pub fn with_allowlist(mut self, patterns: &[String]) -> Result<Self> {
        self.only = patterns
            .iter()
            .map(|p| {
                let p = p.trim_start_matches("./");
                glob::Pattern::new(p).map_err(|e| DocError::Pattern {
                    pattern: p.to_string(),
                    message: e.to_string(),
                })
            })
            .collect::<Result<_>>()?;
        Ok(self)
    }

    /// All `.md` files under the root, in file-name order
    pub fn markdown_files(&self) -> Vec<PathBuf> {
        self.walk(self.root.path(), &[scan::MARKDOWN_EXTENSION])
            .into_iter()
            .filter(|path| self.allowed(path))
            .collect()
    }

    /// Diagram assets under the generated diagram tree
    pub fn asset_files(&self, include_svg: bool) -> Vec<PathBuf> {
        let dir = self.root.join(assets::DIAGRAM_DIR);
        if !dir.is_dir() {
            debug!("No diagram directory at {}", dir.display());
            return vec![];
        }

        let mut extensions = vec![assets::PNG_EXTENSION];
        if include_svg {
            extensions.push(assets::SVG_EXTENSION);
        }
        self.walk(&dir, &extensions)
    }

    /// Load every Markdown source, skipping files that cannot be decoded
    pub fn load_markdown(&self) -> LoadedSources {
        let mut loaded = LoadedSources::default();

        for path in self.markdown_files() {
            match SourceFile::load(&self.root, &path) {
                Ok(source) => loaded.sources.push(source),
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    loaded.skipped.push(SkippedFile {
                        path: self.root.relative(&path),
                        reason: e.to_string(),
                    });
                }
            }
        }

        loaded
    }

    fn walk(&self, start: &Path, extensions: &[&str]) -> Vec<PathBuf> {
        let walker = WalkBuilder::new(start)
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(|entry| !is_pruned(entry))
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let matches_ext = entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| extensions.iter().any(|want| ext.eq_ignore_ascii_case(want)));
            if matches_ext {
                files.push(entry.into_path());
            }
        }

        files
    }

    fn allowed(&self, path: &Path) -> bool {
        if self.only.is_empty() {
            return true;
        }
        let rel = self.root.relative(path);
        self.only.iter().any(|p| p.matches(&rel))
    }
}

/// Directory basenames never descended into
pub fn is_skipped_dir(name: &str) -> bool {
    name.starts_with('.') || scan::SKIP_DIRS.contains(&name)
}

fn is_pruned(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_some_and(|t| t.is_dir()) {
        return false;
    }
    entry
        .file_name()
        .to_str()
        .is_some_and(is_skipped_dir)
}
