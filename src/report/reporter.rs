use console::style;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::links::LinkReport;
use crate::types::{BrokenReason, RenameEntry, Result, write_atomic};

/// How much the link summary prints
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReporterStyle {
    /// Per-file progress plus the full summary
    #[default]
    Full,
    /// Counts and broken links only
    Simple,
}

impl std::str::FromStr for ReporterStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "simple" => Ok(Self::Simple),
            other => Err(format!("unknown reporter style '{}'", other)),
        }
    }
}

pub struct Reporter;

impl Reporter {
    pub fn generate_json<P: AsRef<Path>>(report: &LinkReport, output_path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        write_atomic(output_path.as_ref(), &json)?;
        Ok(())
    }

    pub fn print_link_summary(report: &LinkReport, reporter: ReporterStyle) {
        if reporter == ReporterStyle::Full {
            for file in &report.files {
                if file.broken == 0 {
                    println!("{} {} ({} links)", style("✓").green(), file.path, file.links);
                } else {
                    println!(
                        "{} {} ({} links, {} broken)",
                        style("✗").red(),
                        file.path,
                        file.links,
                        file.broken
                    );
                }
            }
            println!();
        }

        println!("Link Check Report");
        println!("══════════════════════════════════════");
        println!();
        println!("Files scanned: {}", report.files_scanned);
        println!("Links found: {}", report.total_links);
        println!("  External: {}", report.external);
        println!("  Anchor-only: {}", report.anchor_only);
        println!("  Internal: {}", report.internal);
        println!("    Valid: {} ✓", report.valid);
        println!("    Broken: {} ✗", report.broken.len());

        if !report.skipped.is_empty() {
            println!();
            println!("Skipped files ({}):", report.skipped.len());
            for skipped in &report.skipped {
                println!("  {} {}: {}", style("⚠").yellow(), skipped.path, skipped.reason);
            }
        }

        if report.has_broken() {
            println!();
            println!("Broken links ({}):", report.broken.len());
            println!();

            for broken in &report.broken {
                println!(
                    "{} {}:{} [{}]({})",
                    style("✗").red(),
                    broken.source,
                    broken.line,
                    broken.text,
                    broken.target
                );
                if let Some(ref resolved) = broken.resolved {
                    println!("  → {}", resolved);
                }
                println!("  ({})", broken.reason);
            }
        }

        println!();
        println!("══════════════════════════════════════");

        if report.has_broken() {
            println!(
                "Result: FAILED ({} not found, {} out of scope)",
                report.count_reason(BrokenReason::NotFound),
                report.count_reason(BrokenReason::OutOfScope)
            );
        } else {
            println!("Result: PASSED ✓");
        }
    }

    pub fn print_rename_table(entries: &[RenameEntry]) {
        if entries.is_empty() {
            println!("No assets need renaming.");
            return;
        }

        let width = entries
            .iter()
            .map(|e| e.from.chars().count())
            .max()
            .unwrap_or(0);

        println!("Renames ({}):", entries.len());
        for entry in entries {
            println!(
                "  {}/{:<width$}  →  {}",
                entry.dir,
                entry.from,
                style(&entry.to).green(),
                width = width
            );
        }
    }
}
