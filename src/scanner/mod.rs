//! Tree Walker
//!
//! Enumerates Markdown sources and diagram assets under the project root,
//! pruning the fixed directory blacklist.

pub mod tree_walker;

pub use tree_walker::{LoadedSources, SkippedFile, TreeWalker, is_skipped_dir};
