//! Global Constants
//!
//! Fixed locations and limits shared by every command.

/// Tree walking constants
pub mod scan {
    /// Directory basenames pruned during traversal (dot-directories are pruned too)
    pub const SKIP_DIRS: &[&str] = &[".git", "node_modules", "build", "target"];

    /// Markdown source extension
    pub const MARKDOWN_EXTENSION: &str = "md";
}

/// Diagram asset constants
pub mod assets {
    /// Diagram tree, relative to the project root
    pub const DIAGRAM_DIR: &str = "docs/diagrams/generated";

    /// Raster diagram extension, always included
    pub const PNG_EXTENSION: &str = "png";

    /// Vector diagram extension, included when enabled in config
    pub const SVG_EXTENSION: &str = "svg";

    /// Stem used when a name has no `[a-z0-9]` characters at all
    pub const FALLBACK_STEM: &str = "asset";
}

/// Report output constants
pub mod reports {
    /// Canonical reports tree, relative to the project root
    pub const REPORTS_DIR: &str = "reports-summaries";

    /// Rename report, relative to the project root
    pub const RENAME_REPORT_PATH: &str =
        "reports-summaries/task-execution/diagram-filename-fix-report.md";
}

/// Process exit constants
pub mod exit {
    /// Largest broken-link count reported through the exit status
    pub const MAX_BROKEN_EXIT: usize = 125;
}
