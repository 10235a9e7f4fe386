//! Canonical asset basenames.
//!
//! `My Diagram (v2).PNG` becomes `my-diagram-v2.png`: the stem is
//! lower-cased, every run of characters outside `[a-z0-9]` turns into a
//! single `-`, and edge dashes are trimmed.

use crate::constants::assets::FALLBACK_STEM;

/// Lower-case `s` and replace each run outside `[a-z0-9]` with one `-`
pub fn slugify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_dash = false;

    for ch in s.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch);
        } else {
            pending_dash = true;
        }
    }

    out
}

/// Canonical form of an asset basename
pub fn canonical_basename(name: &str) -> String {
    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) => (stem, Some(ext)),
        None => (name, None),
    };

    let mut stem = slugify(stem);
    if stem.is_empty() {
        stem = FALLBACK_STEM.to_string();
    }

    let ext: Option<String> = ext
        .map(|e| {
            e.chars()
                .flat_map(char::to_lowercase)
                .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
                .collect::<String>()
        })
        .filter(|e| !e.is_empty());

    match ext {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem,
    }
}

/// Insert `-{n}` before the extension
pub fn with_suffix(canonical: &str, n: usize) -> String {
    match canonical.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}-{n}.{ext}"),
        None => format!("{canonical}-{n}"),
    }
}

pub fn is_canonical(name: &str) -> bool {
    canonical_basename(name) == name
}
