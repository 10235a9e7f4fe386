//! Path Resolver
//!
//! Resolves internal link targets against the containing file's directory.
//! Containment in the project root is checked lexically before any disk
//! access, so a target escaping the root is never looked up on disk.

use std::path::Path;

use crate::types::{BrokenReason, ProjectRoot, Resolution, normalize_lexically};

pub struct PathResolver<'a> {
    root: &'a ProjectRoot,
}

impl<'a> PathResolver<'a> {
    pub fn new(root: &'a ProjectRoot) -> Self {
        Self { root }
    }

    /// Resolve `file_part` as written in a file located in `source_dir`.
    ///
    /// Only the literal target is checked; no `.md` or `index.md` fallbacks.
    pub fn resolve(&self, source_dir: &Path, file_part: &str) -> Resolution {
        let joined = match file_part.strip_prefix('/') {
            Some(site_absolute) => self.root.join(site_absolute),
            None => source_dir.join(file_part),
        };
        let resolved = normalize_lexically(&joined);

        if !self.root.contains(&resolved) {
            return Resolution::Broken {
                resolved: Some(resolved),
                reason: BrokenReason::OutOfScope,
            };
        }

        if resolved.exists() {
            Resolution::Found(resolved)
        } else {
            Resolution::Broken {
                resolved: Some(resolved),
                reason: BrokenReason::NotFound,
            }
        }
    }
}
