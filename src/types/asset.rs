use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Diagram asset and its canonical name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssetRecord {
    pub path: PathBuf,
    pub original: String,
    pub canonical: String,
}

impl AssetRecord {
    pub fn needs_rename(&self) -> bool {
        self.original != self.canonical
    }
}

/// One planned or executed rename
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenameEntry {
    /// Directory relative to the project root
    pub dir: String,
    pub from: String,
    pub to: String,
}

/// Renames keyed by original basename, in walk order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenameMap {
    entries: Vec<RenameEntry>,
}

impl RenameMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: RenameEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[RenameEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flatten to old basename -> new basename.
    ///
    /// Returns the map plus the basenames that mapped to different
    /// canonical names in different directories; for those the first
    /// entry wins.
    pub fn by_basename(&self) -> (HashMap<String, String>, Vec<String>) {
        let mut map: HashMap<String, String> = HashMap::new();
        let mut conflicts = Vec::new();
        for entry in &self.entries {
            match map.get(&entry.from) {
                Some(existing) if existing != &entry.to => {
                    if !conflicts.contains(&entry.from) {
                        conflicts.push(entry.from.clone());
                    }
                }
                Some(_) => {}
                None => {
                    map.insert(entry.from.clone(), entry.to.clone());
                }
            }
        }
        (map, conflicts)
    }
}
