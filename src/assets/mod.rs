//! Asset Normalizer
//!
//! Renames diagram assets under `docs/diagrams/generated` to canonical slug
//! basenames and emits the rename map consumed by the reference rewriter.

pub mod canonical;
pub mod normalizer;

pub use canonical::{canonical_basename, is_canonical, slugify};
pub use normalizer::{AssetNormalizer, NormalizeOutcome, RenamePlan};
