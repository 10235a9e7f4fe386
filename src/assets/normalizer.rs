use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::canonical::{canonical_basename, with_suffix};
use crate::scanner::TreeWalker;
use crate::types::{AssetRecord, DocError, ProjectRoot, RenameEntry, RenameMap};

/// Renames computed for one run, before anything touches disk
#[derive(Debug, Default)]
pub struct RenamePlan {
    /// Every asset seen, in walk order
    pub records: Vec<AssetRecord>,
    pub renames: RenameMap,
}

impl RenamePlan {
    pub fn pending(&self) -> impl Iterator<Item = &AssetRecord> {
        self.records.iter().filter(|r| r.needs_rename())
    }

    pub fn unchanged_count(&self) -> usize {
        self.records.iter().filter(|r| !r.needs_rename()).count()
    }
}

/// Result of executing a plan
#[derive(Debug, Default)]
pub struct NormalizeOutcome {
    pub applied: RenameMap,
    pub failures: Vec<DocError>,
}

pub struct AssetNormalizer {
    root: ProjectRoot,
    include_svg: bool,
}

impl AssetNormalizer {
    pub fn new(root: &ProjectRoot, include_svg: bool) -> Self {
        Self {
            root: root.clone(),
            include_svg,
        }
    }

    /// Compute canonical names for every diagram asset.
    ///
    /// Names already present in a directory (canonical assets and unrelated
    /// files) are reserved first; the remaining assets take their canonical
    /// name or the first free `-N` variant in walk order.
    pub fn plan(&self, walker: &TreeWalker) -> RenamePlan {
        let mut plan = RenamePlan::default();

        for (dir, files) in group_by_dir(walker.asset_files(self.include_svg)) {
            let renaming: HashSet<String> = files
                .iter()
                .filter_map(|p| file_name(p))
                .filter(|name| &canonical_basename(name) != name)
                .collect();
            let mut taken = existing_names(&dir);
            taken.retain(|name| !renaming.contains(name));

            for path in files {
                let Some(original) = file_name(&path) else {
                    warn!("Skipping non UTF-8 asset name: {}", path.display());
                    continue;
                };

                let canonical = if renaming.contains(&original) {
                    let name = free_name(&canonical_basename(&original), &taken);
                    taken.insert(name.clone());
                    name
                } else {
                    original.clone()
                };

                if canonical != original {
                    debug!("{} -> {}", original, canonical);
                    plan.renames.push(RenameEntry {
                        dir: self.root.relative(&dir),
                        from: original.clone(),
                        to: canonical.clone(),
                    });
                }
                plan.records.push(AssetRecord {
                    path,
                    original,
                    canonical,
                });
            }
        }

        plan
    }

    /// Execute the renames of `plan`; failures are collected, not raised
    pub fn apply(&self, plan: &RenamePlan) -> NormalizeOutcome {
        let mut outcome = NormalizeOutcome::default();

        for record in plan.pending() {
            let to = record.path.with_file_name(&record.canonical);
            match fs::rename(&record.path, &to) {
                Ok(()) => {
                    info!("Renamed {} -> {}", record.original, record.canonical);
                    outcome.applied.push(RenameEntry {
                        dir: self
                            .root
                            .relative(record.path.parent().unwrap_or(self.root.path())),
                        from: record.original.clone(),
                        to: record.canonical.clone(),
                    });
                }
                Err(source) => {
                    warn!("Rename failed for {}: {}", record.path.display(), source);
                    outcome.failures.push(DocError::Rename {
                        from: record.path.clone(),
                        to,
                        source,
                    });
                }
            }
        }

        outcome
    }
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
}

fn free_name(canonical: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(canonical) {
        return canonical.to_string();
    }
    (1..)
        .map(|n| with_suffix(canonical, n))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| canonical.to_string())
}

fn existing_names(dir: &Path) -> HashSet<String> {
    match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .filter_map(|e| e.file_name().to_str().map(str::to_string))
            .collect(),
        Err(e) => {
            warn!("Cannot list {}: {}", dir.display(), e);
            HashSet::new()
        }
    }
}

/// Group files by parent directory, keeping first-seen order
fn group_by_dir(files: Vec<PathBuf>) -> Vec<(PathBuf, Vec<PathBuf>)> {
    let mut groups: Vec<(PathBuf, Vec<PathBuf>)> = Vec::new();
    for file in files {
        let dir = file.parent().map(Path::to_path_buf).unwrap_or_default();
        match groups.iter_mut().find(|(d, _)| *d == dir) {
            Some((_, members)) => members.push(file),
            None => groups.push((dir, vec![file])),
        }
    }
    groups
}
