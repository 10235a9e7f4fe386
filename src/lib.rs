//! docmend - Link Integrity and Normalization for Markdown Documentation
//!
//! Walks a documentation tree, validates every internal link, renames
//! generated diagram assets to canonical names, carries those renames (and
//! document relocations) through the Markdown sources, and repairs common
//! Markdown lint failures.
//!
//! ## Pipeline
//!
//! 1. **Tree walker**: Markdown sources and diagram assets, blacklist pruned
//! 2. **Link extractor / resolver**: inline links classified and resolved
//!    against the project root
//! 3. **Asset normalizer**: canonical basenames and the rename map
//! 4. **Reference rewriter**: rename map and relocation map applied to sources
//! 5. **Markdown repairer**: fence tags, list numbering, list spacing
//! 6. **Reporter**: console summaries, JSON export, rename report
//!
//! ## Quick Start
//!
//! ```ignore
//! use docmend::{LinkChecker, ProjectRoot, TreeWalker};
//!
//! let root = ProjectRoot::new(".")?;
//! let report = LinkChecker::new(&root).check(&TreeWalker::new(&root));
//! println!("{} broken", report.broken.len());
//! ```
//!
//! ## Modules
//!
//! - [`scanner`]: directory traversal
//! - [`links`]: extraction, classification, resolution, checking
//! - [`assets`]: canonical names and on-disk renames
//! - [`rewrite`]: reference rewriting
//! - [`markdown`]: Markdown repairs
//! - [`report`]: output
//! - [`config`]: layered configuration

pub mod assets;
pub mod cli;
pub mod config;
pub mod constants;
pub mod links;
pub mod markdown;
pub mod report;
pub mod rewrite;
pub mod scanner;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader};

// Error Types
pub use types::error::{DocError, Result, ResultExt};

// Domain
pub use types::{Link, LinkKind, ProjectRoot, RenameEntry, RenameMap, SourceFile};

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use assets::{AssetNormalizer, RenamePlan};
pub use links::{LinkChecker, LinkReport};
pub use markdown::{ListNumbering, MarkdownRepairer, repair};
pub use report::{RenameReport, Reporter, ReporterStyle};
pub use rewrite::{ReferenceRewriter, RelocationMap};
pub use scanner::TreeWalker;
