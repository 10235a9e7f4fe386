//! Markdown Repairs
//!
//! Three line-oriented fixes applied in order:
//!
//! - **R1 (MD040)**: tag untagged opening fences with an inferred language
//! - **R2 (MD029)**: renumber ordered-list runs from 1 per indentation
//! - **R3 (MD032)**: surround list blocks with blank lines
//!
//! R2 and R3 never look inside fenced code blocks. Each repair is
//! idempotent, and so is the composition.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

use super::fence::{FenceState, FenceTracker, is_untagged_fence};
use super::language::infer_language;

static ORDERED_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([ \t]*)(\d+)(\.(?:\s.*)?)$").expect("ordered item pattern")
});

static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*(?:[-*+]|\d+[.)])(?:\s|$)").expect("list item pattern")
});

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ {0,3}#{1,6}(?:\s|$)").expect("heading pattern"));

/// When an ordered-list run ends
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ListNumbering {
    /// Only a non-indented non-list line ends a run; blank lines do not
    #[default]
    Continue,
    /// Blank lines end a run as well
    Reset,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RepairStats {
    pub fences_tagged: usize,
    pub items_renumbered: usize,
    pub blank_lines_inserted: usize,
}

impl RepairStats {
    pub fn total(&self) -> usize {
        self.fences_tagged + self.items_renumbered + self.blank_lines_inserted
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl std::ops::AddAssign for RepairStats {
    fn add_assign(&mut self, rhs: Self) {
        self.fences_tagged += rhs.fences_tagged;
        self.items_renumbered += rhs.items_renumbered;
        self.blank_lines_inserted += rhs.blank_lines_inserted;
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRepairer {
    numbering: ListNumbering,
}

impl MarkdownRepairer {
    pub fn new(numbering: ListNumbering) -> Self {
        Self { numbering }
    }

    /// Apply R1, R2 and R3 to `content`
    pub fn repair(&self, content: &str) -> (String, RepairStats) {
        let mut stats = RepairStats::default();
        let blank = if content.contains("\r\n") { "\r" } else { "" };

        let lines: Vec<String> = content.split('\n').map(str::to_string).collect();
        let lines = tag_fences(lines, &mut stats);
        let lines = renumber_lists(lines, self.numbering, &mut stats);
        let lines = pad_lists(lines, blank, &mut stats);

        (lines.join("\n"), stats)
    }
}

/// Repair with the default list-numbering policy
pub fn repair(content: &str) -> String {
    MarkdownRepairer::default().repair(content).0
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn is_heading(line: &str) -> bool {
    HEADING.is_match(line)
}

fn is_list_item(line: &str) -> bool {
    LIST_ITEM.is_match(line)
}

/// R1
fn tag_fences(mut lines: Vec<String>, stats: &mut RepairStats) -> Vec<String> {
    let mut tracker = FenceTracker::new();

    for i in 0..lines.len() {
        if tracker.step(&lines[i]) != FenceState::Opening || !is_untagged_fence(&lines[i]) {
            continue;
        }
        let language = infer_language(lines.get(i + 1).map(String::as_str));
        let cr = if lines[i].ends_with('\r') { "\r" } else { "" };
        lines[i] = format!("```{language}{cr}");
        stats.fences_tagged += 1;
    }

    lines
}

/// R2
fn renumber_lists(
    mut lines: Vec<String>,
    numbering: ListNumbering,
    stats: &mut RepairStats,
) -> Vec<String> {
    let mut tracker = FenceTracker::new();
    let mut counters: BTreeMap<usize, usize> = BTreeMap::new();

    for line in lines.iter_mut() {
        match tracker.step(line) {
            FenceState::Inside => continue,
            FenceState::Opening | FenceState::Closing => {
                counters.clear();
                continue;
            }
            FenceState::Outside => {}
        }

        let Some(caps) = ORDERED_ITEM.captures(line) else {
            if is_blank(line) {
                if numbering == ListNumbering::Reset {
                    counters.clear();
                }
            } else if !is_list_item(line) && !line.starts_with([' ', '\t']) {
                counters.clear();
            }
            continue;
        };

        let indent = caps.get(1).map_or("", |m| m.as_str());
        let number = caps.get(2).map_or("", |m| m.as_str());
        let rest = caps.get(3).map_or("", |m| m.as_str());

        let depth = indent.len();
        counters.retain(|&d, _| d <= depth);
        let counter = counters.entry(depth).or_insert(0);
        *counter += 1;

        if number.parse::<usize>().ok() != Some(*counter) {
            let renumbered = format!("{indent}{counter}{rest}");
            *line = renumbered;
            stats.items_renumbered += 1;
        }
    }

    lines
}

/// R3
fn pad_lists(lines: Vec<String>, blank: &str, stats: &mut RepairStats) -> Vec<String> {
    let mut tracker = FenceTracker::new();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut in_block = false;

    for line in lines {
        let state = tracker.step(&line);

        if state == FenceState::Inside {
            out.push(line);
            continue;
        }

        let item = state == FenceState::Outside && is_list_item(&line);
        let continuation =
            state == FenceState::Outside && !is_blank(&line) && line.starts_with([' ', '\t']);

        if in_block {
            if item || continuation {
                out.push(line);
                continue;
            }
            in_block = false;
            if !is_blank(&line) && !is_heading(&line) {
                out.push(blank.to_string());
                stats.blank_lines_inserted += 1;
            }
        } else if item {
            if let Some(prev) = out.last()
                && !is_blank(prev)
                && !is_heading(prev)
            {
                out.push(blank.to_string());
                stats.blank_lines_inserted += 1;
            }
            in_block = true;
        }

        out.push(line);
    }

    out
}
