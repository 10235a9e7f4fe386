//! Configuration Types
//!
//! All configuration structures with defaults matching the built-in behavior.

use serde::{Deserialize, Serialize};

use crate::markdown::ListNumbering;
use crate::report::ReporterStyle;
use crate::types::{DocError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Link check settings
    pub check: CheckConfig,

    /// Diagram asset settings
    pub assets: AssetsConfig,

    /// Reference rewriting settings
    pub rewrite: RewriteConfig,

    /// Markdown repair settings
    pub repair: RepairConfig,

    /// Report output settings
    pub report: ReportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            check: CheckConfig::default(),
            assets: AssetsConfig::default(),
            rewrite: RewriteConfig::default(),
            repair: RepairConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    /// Returns `DocError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(DocError::Config("version must not be empty".to_string()));
        }

        for pattern in &self.check.only {
            if let Err(e) = glob::Pattern::new(pattern) {
                return Err(DocError::Config(format!(
                    "check.only pattern '{}' is invalid: {}",
                    pattern, e
                )));
            }
        }

        Ok(())
    }
}

// =============================================================================
// Check Configuration
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Output style for `check`
    pub reporter: ReporterStyle,

    /// Default allowlist of source globs; empty checks every file
    pub only: Vec<String>,
}

// =============================================================================
// Assets Configuration
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Normalize `.svg` diagrams alongside `.png`
    pub include_svg: bool,
}

// =============================================================================
// Rewrite Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteConfig {
    /// Rewrite relocated document names outside link syntax too
    pub bare_relocations: bool,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            bare_relocations: true,
        }
    }
}

// =============================================================================
// Repair Configuration
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RepairConfig {
    pub list_numbering: ListNumbering,
}

// =============================================================================
// Report Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Write the rename report after `normalize`
    pub write_rename_report: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            write_rename_report: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.check.reporter, ReporterStyle::Full);
        assert!(config.check.only.is_empty());
        assert!(!config.assets.include_svg);
        assert!(config.rewrite.bare_relocations);
        assert_eq!(config.repair.list_numbering, ListNumbering::Continue);
        assert!(config.report.write_rename_report);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_glob() {
        let mut config = Config::default();
        config.check.only = vec!["docs/[".to_string()];
        assert!(matches!(config.validate(), Err(DocError::Config(_))));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str("[repair]\nlist_numbering = \"reset\"\n").unwrap();
        assert_eq!(config.repair.list_numbering, ListNumbering::Reset);
        assert!(config.rewrite.bare_relocations);
        assert_eq!(config.version, "1.0");
    }
}
