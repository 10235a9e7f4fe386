//! Markdown Repairer
//!
//! Pure text transformations over Markdown sources plus the fenced-block
//! tracking shared with the reference rewriter.

pub mod fence;
pub mod language;
pub mod repair;

pub use fence::{FenceState, FenceTracker};
pub use language::infer_language;
pub use repair::{ListNumbering, MarkdownRepairer, RepairStats, repair};
