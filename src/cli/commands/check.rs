//! Check Command
//!
//! Validates every internal link in the project's Markdown sources.

use std::path::PathBuf;

use crate::cli::ui::Output;
use crate::cli::util::CommandContext;
use crate::links::LinkChecker;
use crate::report::{Reporter, ReporterStyle};
use crate::scanner::TreeWalker;
use crate::types::Result;

#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Counts and broken links only
    pub simple: bool,
    /// Allowlist of source globs, overriding `check.only`
    pub only: Vec<String>,
    /// Also write the report as JSON
    pub report: Option<PathBuf>,
}

/// Returns the broken-link count, capped for use as an exit status
pub fn run(ctx: &CommandContext, options: &CheckOptions) -> Result<u8> {
    let output = Output::new();

    let reporter = if options.simple {
        ReporterStyle::Simple
    } else {
        ctx.config.check.reporter
    };
    let only = if options.only.is_empty() {
        &ctx.config.check.only
    } else {
        &options.only
    };

    let walker = TreeWalker::new(&ctx.root).with_allowlist(only)?;

    if reporter == ReporterStyle::Full {
        println!("Checking links...");
        println!("  Root: {}", ctx.root);
        if !only.is_empty() {
            println!("  Only: {}", only.join(", "));
        }
        println!();
    }

    let report = LinkChecker::new(&ctx.root).check(&walker);
    Reporter::print_link_summary(&report, reporter);

    if let Some(ref path) = options.report {
        Reporter::generate_json(&report, path)?;
        println!();
        output.info(&format!("Report saved to: {}", path.display()));
    }

    Ok(report.exit_code())
}
