//! Reporter
//!
//! Human-readable link summaries, JSON export, and the rename report
//! document.

pub mod rename_report;
pub mod reporter;

pub use rename_report::RenameReport;
pub use reporter::{Reporter, ReporterStyle};
