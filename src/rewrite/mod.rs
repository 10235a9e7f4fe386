//! Reference Rewriter
//!
//! Carries asset renames and document relocations through every Markdown
//! source. A file with nothing to substitute is left byte-identical.

pub mod legacy;
pub mod relocation;
pub mod rewriter;

pub use legacy::{basename_rules, legacy_forms};
pub use relocation::RelocationMap;
pub use rewriter::{FileRewrite, ReferenceRewriter, RewriteOutcome};
