//! Reference mapping for documents moved into the reports tree.
//!
//! Each `reports-summaries/<category>/<name>.md` yields the references a
//! document could have used before it was moved there.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::{debug, warn};

use crate::constants::reports;
use crate::scanner::TreeWalker;
use crate::types::{ProjectRoot, Result};

const PRE_RELOCATION_PREFIXES: [&str; 7] = [
    "",
    "./",
    "../",
    "../../",
    "docs/",
    "../docs/",
    "../../docs/",
];

/// Legacy reference -> root-relative path under the reports directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelocationMap {
    map: BTreeMap<String, String>,
}

impl RelocationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan the reports directory under `root`
    pub fn from_reports_dir(root: &ProjectRoot) -> Result<Self> {
        if !root.join(reports::REPORTS_DIR).is_dir() {
            debug!("No {} directory under {}", reports::REPORTS_DIR, root);
            return Ok(Self::new());
        }

        let pattern = format!("{}/**/*.md", reports::REPORTS_DIR);
        let walker = TreeWalker::new(root).with_allowlist(&[pattern])?;
        let relocated: Vec<String> = walker
            .markdown_files()
            .iter()
            .map(|p| root.relative(p))
            .collect();

        Ok(Self::from_relocated(&relocated))
    }

    /// Build from root-relative paths of relocated documents
    pub fn from_relocated(paths: &[String]) -> Self {
        let values: HashSet<&str> = paths.iter().map(String::as_str).collect();
        let mut map = BTreeMap::new();

        for path in paths {
            let Some(name) = Path::new(path).file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            for prefix in PRE_RELOCATION_PREFIXES {
                let key = format!("{prefix}{name}");
                if values.contains(key.as_str()) {
                    continue;
                }
                match map.get(&key) {
                    Some(existing) if existing != path => {
                        warn!(
                            "'{}' matches both {} and {}; keeping {}",
                            key, existing, path, existing
                        );
                    }
                    Some(_) => {}
                    None => {
                        map.insert(key, path.clone());
                    }
                }
            }
        }

        Self { map }
    }

    pub fn get(&self, reference: &str) -> Option<&str> {
        self.map.get(reference).map(String::as_str)
    }

    /// Keys eligible for bare textual substitution
    pub fn bare_keys(&self) -> impl Iterator<Item = &str> {
        self.map
            .keys()
            .map(String::as_str)
            .filter(|k| !k.contains("://") && !k.starts_with('#'))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
