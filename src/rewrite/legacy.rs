use std::collections::{HashMap, HashSet};
use tracing::warn;

use crate::types::RenameMap;

/// Textual forms a link to `name` may take before normalization
pub fn legacy_forms(name: &str) -> Vec<String> {
    let candidates = [
        name.to_string(),
        name.replace(' ', "%20"),
        name.replace(' ', "-"),
        name.replace('_', "-"),
    ];

    let mut forms: Vec<String> = Vec::with_capacity(candidates.len());
    for form in candidates {
        if !forms.contains(&form) {
            forms.push(form);
        }
    }
    forms
}

/// Legacy basename -> canonical basename, derived from a rename map.
///
/// Every real old name is claimed before any derived form, so a variant
/// spelling of one asset never shadows another asset's actual name. A
/// legacy form that equals any canonical name is left out, so an
/// already-canonical reference never matches.
pub fn basename_rules(renames: &RenameMap) -> HashMap<String, String> {
    let (flat, conflicts) = renames.by_basename();
    for name in &conflicts {
        warn!(
            "'{}' was renamed differently in several directories; using the first mapping",
            name
        );
    }

    let canonical: HashSet<&str> = renames.entries().iter().map(|e| e.to.as_str()).collect();
    let mut rules: HashMap<String, String> = HashMap::new();

    for (from, target) in &flat {
        if !canonical.contains(from.as_str()) {
            rules.insert(from.clone(), target.clone());
        }
    }

    for entry in renames.entries() {
        let Some(target) = flat.get(&entry.from) else {
            continue;
        };
        for form in legacy_forms(&entry.from) {
            if canonical.contains(form.as_str()) {
                continue;
            }
            rules.entry(form).or_insert_with(|| target.clone());
        }
    }

    rules
}
