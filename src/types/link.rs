use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Classification of a link target
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    External,
    AnchorOnly,
    Internal,
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::External => write!(f, "external"),
            Self::AnchorOnly => write!(f, "anchor"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

/// Inline Markdown link extracted from a source file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Link {
    /// Source file, relative to the project root
    pub source: String,
    /// 1-based line of the link
    pub line: usize,
    pub text: String,
    /// Raw target as written
    pub target: String,
    pub kind: LinkKind,
    /// Target up to the first `#` (internal links only)
    pub file_part: String,
    /// Fragment after the first `#`, possibly empty
    pub anchor: String,
}

impl Link {
    pub fn is_internal(&self) -> bool {
        self.kind == LinkKind::Internal
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BrokenReason {
    OutOfScope,
    NotFound,
}

impl fmt::Display for BrokenReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfScope => write!(f, "out of project scope"),
            Self::NotFound => write!(f, "target not found"),
        }
    }
}

/// Outcome of resolving an internal link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Target exists inside the root
    Found(PathBuf),
    /// Target is broken; `resolved` is absent when no path could be formed
    Broken {
        resolved: Option<PathBuf>,
        reason: BrokenReason,
    },
}

impl Resolution {
    pub fn is_broken(&self) -> bool {
        matches!(self, Self::Broken { .. })
    }
}
