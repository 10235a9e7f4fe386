//! Rename report written under the reports directory after a normalize run.

use chrono::{DateTime, SecondsFormat, Utc};
use std::fs;
use std::path::PathBuf;

use crate::constants::reports::RENAME_REPORT_PATH;
use crate::types::{DocError, ProjectRoot, RenameMap, Result, write_atomic};

const RULES: &[&str] = &[
    "Lower-case the file stem",
    "Replace every run of characters outside `[a-z0-9]` with `-`",
    "Trim leading and trailing `-` and collapse repeated `-`",
    "Lower-case the extension",
    "Suffix `-1`, `-2`, ... when the canonical name is already taken in the directory",
    "Rewrite Markdown link targets using the raw, `%20`, space-to-`-` and `_`-to-`-` forms of the old name",
];

pub struct RenameReport<'a> {
    pub renames: &'a RenameMap,
    pub assets_scanned: usize,
    pub files_rewritten: usize,
    pub references_rewritten: usize,
    pub generated_at: DateTime<Utc>,
}

impl<'a> RenameReport<'a> {
    pub fn new(renames: &'a RenameMap, assets_scanned: usize) -> Self {
        Self {
            renames,
            assets_scanned,
            files_rewritten: 0,
            references_rewritten: 0,
            generated_at: Utc::now(),
        }
    }

    pub fn with_rewrites(mut self, files: usize, references: usize) -> Self {
        self.files_rewritten = files;
        self.references_rewritten = references;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str("# Diagram Filename Fix Report\n\n");
        out.push_str("## Summary\n\n");
        out.push_str(&format!("- Assets scanned: {}\n", self.assets_scanned));
        out.push_str(&format!("- Assets renamed: {}\n", self.renames.len()));
        out.push_str(&format!("- Files updated: {}\n", self.files_rewritten));
        out.push_str(&format!(
            "- References rewritten: {}\n\n",
            self.references_rewritten
        ));

        out.push_str("## Renamed Files\n\n");
        if self.renames.is_empty() {
            out.push_str("No files were renamed.\n");
        } else {
            out.push_str("| Directory | Old Name | New Name |\n");
            out.push_str("|-----------|----------|----------|\n");
            for entry in self.renames.entries() {
                out.push_str(&format!(
                    "| {} | {} | {} |\n",
                    entry.dir,
                    entry.from.replace('|', "\\|"),
                    entry.to
                ));
            }
        }

        out.push_str("\n## Naming Rules\n\n");
        for (i, rule) in RULES.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, rule));
        }

        out.push_str("\n---\n\n");
        out.push_str(&format!(
            "Generated: {}\n",
            self.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));

        out
    }

    /// Write the report to its fixed location under `root`
    pub fn write(&self, root: &ProjectRoot) -> Result<PathBuf> {
        let path = root.join(RENAME_REPORT_PATH);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| DocError::write(parent, e))?;
        }
        write_atomic(&path, &self.render())?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::MarkdownRepairer;
    use crate::types::RenameEntry;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn sample() -> RenameMap {
        let mut map = RenameMap::new();
        map.push(RenameEntry {
            dir: "docs/diagrams/generated".to_string(),
            from: "My Diagram.png".to_string(),
            to: "my-diagram.png".to_string(),
        });
        map
    }

    #[test]
    fn test_render_sections() {
        let renames = sample();
        let mut report = RenameReport::new(&renames, 4).with_rewrites(2, 3);
        report.generated_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();

        let text = report.render();
        assert!(text.starts_with("# Diagram Filename Fix Report\n"));
        assert!(text.contains("- Assets scanned: 4\n"));
        assert!(text.contains("- Assets renamed: 1\n"));
        assert!(text.contains("- References rewritten: 3\n"));
        assert!(text.contains("| docs/diagrams/generated | My Diagram.png | my-diagram.png |"));
        assert!(text.contains("1. Lower-case the file stem"));
        assert!(text.ends_with("Generated: 2024-05-01T12:30:00Z\n"));
    }

    #[test]
    fn test_rendered_report_is_clean_markdown() {
        let renames = sample();
        let text = RenameReport::new(&renames, 1).render();
        let (repaired, stats) = MarkdownRepairer::default().repair(&text);
        assert_eq!(repaired, text);
        assert!(stats.is_empty());
    }

    #[test]
    fn test_write_creates_reports_dir() {
        let temp = TempDir::new().unwrap();
        let root = ProjectRoot::new(temp.path()).unwrap();
        let renames = RenameMap::new();

        let path = RenameReport::new(&renames, 0).write(&root).unwrap();
        assert!(path.ends_with("diagram-filename-fix-report.md"));
        let text = fs::read_to_string(path).unwrap();
        assert!(text.contains("No files were renamed."));
    }
}
