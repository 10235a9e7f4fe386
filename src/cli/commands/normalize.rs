//! Normalize Command
//!
//! Renames diagram assets to canonical names, rewrites references to them,
//! and records the run in the rename report.

use crate::assets::AssetNormalizer;
use crate::cli::ui::Output;
use crate::cli::util::CommandContext;
use crate::report::{RenameReport, Reporter};
use crate::rewrite::ReferenceRewriter;
use crate::types::Result;

#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeOptions {
    pub dry_run: bool,
    /// Skip the rename report
    pub no_report: bool,
    /// Rename files without rewriting references
    pub no_rewrite: bool,
}

/// Returns 1 when any rename or write failed
pub fn run(ctx: &CommandContext, options: NormalizeOptions) -> Result<u8> {
    let output = Output::new();
    let walker = ctx.walker();
    let normalizer = AssetNormalizer::new(&ctx.root, ctx.config.assets.include_svg);

    output.header("Normalizing diagram assets");
    let plan = normalizer.plan(&walker);
    output.field("Assets scanned", plan.records.len());
    output.field("Already canonical", plan.unchanged_count());
    output.field("To rename", plan.renames.len());
    println!();
    Reporter::print_rename_table(plan.renames.entries());

    if options.dry_run {
        if !options.no_rewrite && !plan.renames.is_empty() {
            let loaded = walker.load_markdown();
            let rewrite = ReferenceRewriter::new()
                .with_renames(&plan.renames)
                .apply(&loaded.sources, true);
            println!();
            output.field("Files to update", rewrite.changed.len());
            output.field("References", rewrite.substitutions());
        }
        output.dry_run_notice();
        return Ok(0);
    }

    let outcome = normalizer.apply(&plan);
    let mut failed = !outcome.failures.is_empty();
    for failure in &outcome.failures {
        output.error(&failure.to_string());
    }

    let (mut files_rewritten, mut references) = (0, 0);
    if !options.no_rewrite && !outcome.applied.is_empty() {
        let loaded = walker.load_markdown();
        let rewrite = ReferenceRewriter::new()
            .with_renames(&outcome.applied)
            .apply(&loaded.sources, false);

        for failure in &rewrite.failures {
            output.error(&failure.to_string());
        }
        failed |= rewrite.has_failures();
        files_rewritten = rewrite.changed.len();
        references = rewrite.substitutions();
    }

    if ctx.config.report.write_rename_report && !options.no_report {
        let report = RenameReport::new(&outcome.applied, plan.records.len())
            .with_rewrites(files_rewritten, references);
        match report.write(&ctx.root) {
            Ok(path) => output.info(&format!("Report saved to: {}", ctx.root.relative(&path))),
            Err(e) => {
                output.error(&format!("Failed to write rename report: {}", e));
                failed = true;
            }
        }
    }

    println!();
    if failed {
        output.error("Normalization finished with errors");
        return Ok(1);
    }
    output.success(&format!(
        "Renamed {} assets, updated {} references in {} files",
        outcome.applied.len(),
        references,
        files_rewritten
    ));
    Ok(0)
}
