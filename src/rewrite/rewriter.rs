use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use super::legacy::basename_rules;
use super::relocation::RelocationMap;
use crate::links::classify;
use crate::links::extractor::INLINE_LINK;
use crate::markdown::{FenceState, FenceTracker};
use crate::types::{DocError, LinkKind, RenameMap, SourceFile, write_atomic};

/// File whose content changed (or would change) during a rewrite
#[derive(Debug, Clone, Serialize)]
pub struct FileRewrite {
    pub path: String,
    pub substitutions: usize,
}

#[derive(Debug, Default)]
pub struct RewriteOutcome {
    pub scanned: usize,
    pub changed: Vec<FileRewrite>,
    pub failures: Vec<DocError>,
}

impl RewriteOutcome {
    pub fn substitutions(&self) -> usize {
        self.changed.iter().map(|c| c.substitutions).sum()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Applies asset renames and document relocations to Markdown text.
///
/// Renames only touch link targets. Relocations touch link targets and,
/// when enabled, bare occurrences at reference boundaries. Fenced code is
/// never rewritten.
#[derive(Debug, Default)]
pub struct ReferenceRewriter {
    renames: HashMap<String, String>,
    relocations: RelocationMap,
    bare: Option<Regex>,
}

impl ReferenceRewriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_renames(mut self, renames: &RenameMap) -> Self {
        self.renames = basename_rules(renames);
        self
    }

    pub fn with_relocations(mut self, relocations: RelocationMap, bare: bool) -> Self {
        self.bare = if bare { bare_pattern(&relocations) } else { None };
        self.relocations = relocations;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.renames.is_empty() && self.relocations.is_empty()
    }

    /// Rewrite `content`, returning the new text and the substitution count.
    ///
    /// With zero substitutions the returned text equals the input byte for byte.
    pub fn rewrite_content(&self, content: &str) -> (String, usize) {
        if self.is_empty() {
            return (content.to_string(), 0);
        }

        let mut tracker = FenceTracker::new();
        let mut hits = 0;
        let mut lines: Vec<Cow<'_, str>> = Vec::new();

        for line in content.split('\n') {
            if tracker.step(line) == FenceState::Outside {
                lines.push(self.rewrite_line(line, &mut hits));
            } else {
                lines.push(Cow::Borrowed(line));
            }
        }

        if hits == 0 {
            return (content.to_string(), 0);
        }
        (lines.join("\n"), hits)
    }

    /// Rewrite every source, writing only files whose content changed
    pub fn apply(&self, sources: &[SourceFile], dry_run: bool) -> RewriteOutcome {
        let mut outcome = RewriteOutcome {
            scanned: sources.len(),
            ..Default::default()
        };

        for source in sources {
            let (updated, substitutions) = self.rewrite_content(&source.content);
            if updated == source.content {
                continue;
            }

            if !dry_run {
                if let Err(e) = write_atomic(&source.path, &updated) {
                    warn!("Failed to update {}: {}", source.rel_path, e);
                    outcome.failures.push(e);
                    continue;
                }
                info!("Updated {} ({} references)", source.rel_path, substitutions);
            } else {
                debug!("Would update {} ({} references)", source.rel_path, substitutions);
            }

            outcome.changed.push(FileRewrite {
                path: source.rel_path.clone(),
                substitutions,
            });
        }

        outcome
    }

    fn rewrite_line<'s>(&self, line: &'s str, hits: &mut usize) -> Cow<'s, str> {
        let mut out = String::new();
        let mut last = 0;
        let before = *hits;

        for caps in INLINE_LINK.captures_iter(line) {
            let Some(target) = caps.get(2) else {
                continue;
            };
            out.push_str(&self.replace_bare(&line[last..target.start()], hits));
            match self.rewrite_target(target.as_str()) {
                Some(new) => {
                    out.push_str(&new);
                    *hits += 1;
                }
                None => out.push_str(target.as_str()),
            }
            last = target.end();
        }
        out.push_str(&self.replace_bare(&line[last..], hits));

        if *hits == before {
            Cow::Borrowed(line)
        } else {
            Cow::Owned(out)
        }
    }

    fn rewrite_target(&self, target: &str) -> Option<String> {
        let (kind, file_part, _) = classify(target);
        if kind != LinkKind::Internal {
            return None;
        }
        let anchor = &target[file_part.len()..];

        if let Some(new) = self.relocations.get(file_part) {
            return Some(format!("{new}{anchor}"));
        }

        let (dir, name) = match file_part.rsplit_once('/') {
            Some((dir, name)) => (Some(dir), name),
            None => (None, file_part),
        };
        let new = self.renames.get(name)?;
        Some(match dir {
            Some(dir) => format!("{dir}/{new}{anchor}"),
            None => format!("{new}{anchor}"),
        })
    }

    fn replace_bare<'s>(&self, text: &'s str, hits: &mut usize) -> Cow<'s, str> {
        let Some(pattern) = &self.bare else {
            return Cow::Borrowed(text);
        };

        let mut out = String::new();
        let mut last = 0;
        let mut pos = 0;
        let mut replaced = false;

        while let Some(m) = pattern.find_at(text, pos) {
            let starts_clean = text[..m.start()]
                .chars()
                .next_back()
                .is_none_or(|c| !is_leading_path_char(c));
            let ends_clean = is_clean_end(&text[m.end()..]);

            if starts_clean
                && ends_clean
                && let Some(new) = self.relocations.get(m.as_str())
            {
                out.push_str(&text[last..m.start()]);
                out.push_str(new);
                last = m.end();
                pos = m.end();
                *hits += 1;
                replaced = true;
            } else {
                pos = m.start() + text[m.start()..].chars().next().map_or(1, char::len_utf8);
            }
        }

        if !replaced {
            return Cow::Borrowed(text);
        }
        out.push_str(&text[last..]);
        Cow::Owned(out)
    }
}

fn is_leading_path_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | '/' | '-')
}

fn is_trailing_path_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '/' | '-')
}

/// A match may end at a sentence period but not inside `name.md.bak`
fn is_clean_end(rest: &str) -> bool {
    let mut chars = rest.chars();
    match chars.next() {
        None => true,
        Some('.') => chars.next().is_none_or(|c| !is_trailing_path_char(c)),
        Some(c) => !is_trailing_path_char(c),
    }
}

/// Alternation of bare keys, longest first so `../docs/x.md` beats `x.md`
fn bare_pattern(relocations: &RelocationMap) -> Option<Regex> {
    let mut keys: Vec<&str> = relocations.bare_keys().collect();
    if keys.is_empty() {
        return None;
    }
    keys.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));

    let alternation = keys
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");

    match Regex::new(&alternation) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!("Bare relocation matching disabled: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ProjectRoot, RenameEntry};
    use proptest::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    fn renames(pairs: &[(&str, &str)]) -> RenameMap {
        let mut map = RenameMap::new();
        for (from, to) in pairs {
            map.push(RenameEntry {
                dir: "docs/diagrams/generated".to_string(),
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        map
    }

    fn relocations() -> RelocationMap {
        RelocationMap::from_relocated(&["reports-summaries/analysis/audit.md".to_string()])
    }

    fn rename_rewriter() -> ReferenceRewriter {
        ReferenceRewriter::new().with_renames(&renames(&[("My Diagram.png", "my-diagram.png")]))
    }

    #[test]
    fn test_rewrites_percent_encoded_image_link() {
        let (out, hits) = rename_rewriter().rewrite_content("![d](My%20Diagram.png)\n");
        assert_eq!(out, "![d](my-diagram.png)\n");
        assert_eq!(hits, 1);
    }

    #[test]
    fn test_rewrites_legacy_forms_keeping_dir_and_anchor() {
        let input = "[a](diagrams/generated/My-Diagram.png#top) [b](My Diagram.png)";
        let (out, hits) = rename_rewriter().rewrite_content(input);
        assert_eq!(
            out,
            "[a](diagrams/generated/my-diagram.png#top) [b](my-diagram.png)"
        );
        assert_eq!(hits, 2);
    }

    #[test]
    fn test_renames_leave_prose_alone() {
        let input = "The file My Diagram.png was renamed.\n";
        let (out, hits) = rename_rewriter().rewrite_content(input);
        assert_eq!(out, input);
        assert_eq!(hits, 0);
    }

    #[test]
    fn test_external_and_anchor_links_untouched() {
        let input = "[x](https://host/My%20Diagram.png) [y](#My%20Diagram.png)";
        assert_eq!(rename_rewriter().rewrite_content(input).0, input);
    }

    #[test]
    fn test_fenced_code_untouched() {
        let input = "```text\n![d](My%20Diagram.png)\n```\n![d](My%20Diagram.png)";
        let (out, hits) = rename_rewriter().rewrite_content(input);
        assert_eq!(out, "```text\n![d](My%20Diagram.png)\n```\n![d](my-diagram.png)");
        assert_eq!(hits, 1);
    }

    #[test]
    fn test_relocation_in_link_target() {
        let rewriter = ReferenceRewriter::new().with_relocations(relocations(), false);
        let (out, _) = rewriter.rewrite_content("See [audit](../docs/audit.md#summary).");
        assert_eq!(out, "See [audit](reports-summaries/analysis/audit.md#summary).");
    }

    #[test]
    fn test_bare_relocation_respects_boundaries() {
        let rewriter = ReferenceRewriter::new().with_relocations(relocations(), true);
        let input = "Read audit.md, then docs/audit.md. Not pre-audit.md or x/audit.md";
        let (out, hits) = rewriter.rewrite_content(input);
        assert_eq!(
            out,
            "Read reports-summaries/analysis/audit.md, then \
             reports-summaries/analysis/audit.md. Not pre-audit.md or x/audit.md"
        );
        assert_eq!(hits, 2);
    }

    #[test]
    fn test_bare_relocation_skips_longer_file_names() {
        let rewriter = ReferenceRewriter::new().with_relocations(relocations(), true);
        let input = "Backups audit.md.bak and audit.md.old stay.\n";
        let (out, hits) = rewriter.rewrite_content(input);
        assert_eq!(out, input);
        assert_eq!(hits, 0);

        let (out, hits) = rewriter.rewrite_content("End with audit.md.\n");
        assert_eq!(out, "End with reports-summaries/analysis/audit.md.\n");
        assert_eq!(hits, 1);
    }

    #[test]
    fn test_collision_suffix_survives_rewrite() {
        let rewriter = ReferenceRewriter::new().with_renames(&renames(&[
            ("A B.png", "a-b.png"),
            ("A-B.png", "a-b-1.png"),
        ]));
        let (out, hits) = rewriter.rewrite_content("[x](A-B.png) [y](A%20B.png)\n");
        assert_eq!(out, "[x](a-b-1.png) [y](a-b.png)\n");
        assert_eq!(hits, 2);
    }

    #[test]
    fn test_bare_relocation_disabled() {
        let rewriter = ReferenceRewriter::new().with_relocations(relocations(), false);
        let input = "Read audit.md\n";
        assert_eq!(rewriter.rewrite_content(input).0, input);
    }

    #[test]
    fn test_unrelated_content_byte_identical() {
        let rewriter = rename_rewriter().with_relocations(relocations(), true);
        let input = "# Title\r\n\r\n[ok](other.png)\r\ntrailing spaces   \r\n";
        let (out, hits) = rewriter.rewrite_content(input);
        assert_eq!(out, input);
        assert_eq!(hits, 0);
    }

    #[test]
    fn test_apply_writes_only_changed_files() {
        let temp = TempDir::new().unwrap();
        let root = ProjectRoot::new(temp.path()).unwrap();
        fs::write(root.join("a.md"), "![d](My%20Diagram.png)\n").unwrap();
        fs::write(root.join("b.md"), "nothing here\n").unwrap();
        let sources: Vec<SourceFile> = ["a.md", "b.md"]
            .iter()
            .map(|f| SourceFile::load(&root, &root.join(f)).unwrap())
            .collect();

        let dry = rename_rewriter().apply(&sources, true);
        assert_eq!(dry.changed.len(), 1);
        assert_eq!(
            fs::read_to_string(root.join("a.md")).unwrap(),
            "![d](My%20Diagram.png)\n"
        );

        let outcome = rename_rewriter().apply(&sources, false);
        assert_eq!(outcome.scanned, 2);
        assert_eq!(outcome.changed.len(), 1);
        assert_eq!(outcome.changed[0].path, "a.md");
        assert!(!outcome.has_failures());
        assert_eq!(
            fs::read_to_string(root.join("a.md")).unwrap(),
            "![d](my-diagram.png)\n"
        );
    }

    fn line_strategy() -> impl Strategy<Value = String> {
        prop::sample::select(vec![
            "![d](My%20Diagram.png)",
            "[r](audit.md)",
            "see audit.md and ./audit.md",
            "../../docs/audit.md#x",
            "[k](my-diagram.png)",
            "```",
            "plain text",
            "",
            "[e](http://h/audit.md)",
        ])
        .prop_map(str::to_string)
    }

    proptest! {
        #[test]
        fn prop_rewrite_idempotent(lines in prop::collection::vec(line_strategy(), 0..20)) {
            let rewriter = rename_rewriter().with_relocations(relocations(), true);
            let doc = lines.join("\n");
            let (once, _) = rewriter.rewrite_content(&doc);
            let (twice, hits) = rewriter.rewrite_content(&once);
            prop_assert_eq!(twice, once);
            prop_assert_eq!(hits, 0);
        }
    }
}
