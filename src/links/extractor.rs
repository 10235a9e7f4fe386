//! Link Extractor
//!
//! Line-oriented scan for inline `[text](target)` links. Reference-style
//! links, autolinks, nested brackets and escaped parentheses are not
//! understood; an image `![alt](src)` is picked up through its inner
//! `[alt](src)`.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::{Link, LinkKind, SourceFile};

pub(crate) static INLINE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]*)\)").expect("inline link pattern"));

const EXTERNAL_PREFIXES: &[&str] = &["http://", "https://", "mailto:", "ftp://"];

/// Split a target into classification, file part and anchor
pub fn classify(target: &str) -> (LinkKind, &str, &str) {
    if EXTERNAL_PREFIXES.iter().any(|p| target.starts_with(p)) || target.contains("localhost:") {
        return (LinkKind::External, "", "");
    }

    let (file_part, anchor) = target.split_once('#').unwrap_or((target, ""));
    if file_part.is_empty() {
        return (LinkKind::AnchorOnly, "", anchor);
    }

    (LinkKind::Internal, file_part, anchor)
}

/// All inline links in `content`, attributed to `source`
pub fn extract_links(source: &str, content: &str) -> Vec<Link> {
    let mut links = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        for caps in INLINE_LINK.captures_iter(line) {
            let text = caps.get(1).map_or("", |m| m.as_str());
            let target = caps.get(2).map_or("", |m| m.as_str());
            let (kind, file_part, anchor) = classify(target);

            links.push(Link {
                source: source.to_string(),
                line: idx + 1,
                text: text.to_string(),
                target: target.to_string(),
                kind,
                file_part: file_part.to_string(),
                anchor: anchor.to_string(),
            });
        }
    }

    links
}

pub fn extract_from(source: &SourceFile) -> Vec<Link> {
    extract_links(&source.rel_path, &source.content)
}
