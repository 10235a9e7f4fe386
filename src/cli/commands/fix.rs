//! Fix Command
//!
//! Applies the Markdown repairs to every source, or to the given files.

use std::path::PathBuf;

use crate::cli::ui::Output;
use crate::cli::util::{CommandContext, resolve_input};
use crate::markdown::{MarkdownRepairer, RepairStats};
use crate::types::{Result, SourceFile, write_atomic};

/// Returns 1 when a write failed, or in check mode when a file would change
pub fn run(ctx: &CommandContext, paths: &[PathBuf], check: bool) -> Result<u8> {
    let output = Output::new();
    let mut failed = false;

    let sources = if paths.is_empty() {
        let loaded = ctx.walker().load_markdown();
        for skipped in &loaded.skipped {
            output.warning(&format!("Skipped {}: {}", skipped.path, skipped.reason));
        }
        loaded.sources
    } else {
        let mut sources = Vec::with_capacity(paths.len());
        for path in paths {
            match SourceFile::load(&ctx.root, &resolve_input(&ctx.root, path)) {
                Ok(source) => sources.push(source),
                Err(e) => {
                    output.error(&e.to_string());
                    failed = true;
                }
            }
        }
        sources
    };

    let repairer = MarkdownRepairer::new(ctx.config.repair.list_numbering);
    let mut total = RepairStats::default();
    let mut changed = 0;

    for source in &sources {
        let (repaired, stats) = repairer.repair(&source.content);
        if repaired == source.content {
            continue;
        }
        changed += 1;
        total += stats;

        if check {
            output.warning(&format!("{} needs repair ({})", source.rel_path, describe(&stats)));
            continue;
        }

        match write_atomic(&source.path, &repaired) {
            Ok(()) => output.success(&format!("Fixed {} ({})", source.rel_path, describe(&stats))),
            Err(e) => {
                output.error(&e.to_string());
                failed = true;
            }
        }
    }

    println!();
    output.field("Files checked", sources.len());
    output.field(if check { "Files to fix" } else { "Files fixed" }, changed);
    output.field("Fences tagged", total.fences_tagged);
    output.field("Items renumbered", total.items_renumbered);
    output.field("Blank lines added", total.blank_lines_inserted);

    if failed || (check && changed > 0) {
        return Ok(1);
    }
    Ok(0)
}

fn describe(stats: &RepairStats) -> String {
    let mut parts = Vec::new();
    if stats.fences_tagged > 0 {
        parts.push(format!("{} fences tagged", stats.fences_tagged));
    }
    if stats.items_renumbered > 0 {
        parts.push(format!("{} items renumbered", stats.items_renumbered));
    }
    if stats.blank_lines_inserted > 0 {
        parts.push(format!("{} blank lines", stats.blank_lines_inserted));
    }
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        let stats = RepairStats {
            fences_tagged: 1,
            items_renumbered: 0,
            blank_lines_inserted: 2,
        };
        assert_eq!(describe(&stats), "1 fences tagged, 2 blank lines");
    }
}
