//! Relocate Command
//!
//! Points references at documents that now live under the reports tree.

use crate::cli::ui::Output;
use crate::cli::util::CommandContext;
use crate::rewrite::{ReferenceRewriter, RelocationMap};
use crate::types::Result;

/// Returns 1 when any write failed
pub fn run(ctx: &CommandContext, dry_run: bool) -> Result<u8> {
    let output = Output::new();

    let relocations = RelocationMap::from_reports_dir(&ctx.root)?;
    if relocations.is_empty() {
        output.info("No relocated documents found.");
        return Ok(0);
    }

    output.header("Rewriting relocated references");
    output.field("Mapped references", relocations.len());

    let loaded = ctx.walker().load_markdown();
    for skipped in &loaded.skipped {
        output.warning(&format!("Skipped {}: {}", skipped.path, skipped.reason));
    }

    let rewriter =
        ReferenceRewriter::new().with_relocations(relocations, ctx.config.rewrite.bare_relocations);
    let outcome = rewriter.apply(&loaded.sources, dry_run);

    for change in &outcome.changed {
        println!("  {} ({} references)", change.path, change.substitutions);
    }
    for failure in &outcome.failures {
        output.error(&failure.to_string());
    }

    println!();
    output.field("Files scanned", outcome.scanned);
    output.field("Files updated", outcome.changed.len());
    output.field("References", outcome.substitutions());

    if dry_run {
        output.dry_run_notice();
    }

    Ok(u8::from(outcome.has_failures()))
}
