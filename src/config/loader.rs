//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/docmend/config.toml)
//! 3. Project config (<root>/.docmend/config.toml)
//! 4. Environment variables (DOCMEND_* prefix, `__` between sections)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use super::types::Config;
use crate::types::{DocError, ProjectRoot, Result, ResultExt};

const ENV_PREFIX: &str = "DOCMEND_";
const PROJECT_DIR: &str = ".docmend";
const CONFIG_FILE: &str = "config.toml";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain using Figment:
    /// defaults → global → project → env vars
    pub fn load(root: &ProjectRoot) -> Result<Config> {
        Self::load_with_env(root, ENV_PREFIX)
    }

    fn load_with_env(root: &ProjectRoot, env_prefix: &str) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Merge global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        // Merge project config
        let project_path = Self::project_config_path(root);
        if project_path.exists() {
            debug!("Loading project config from: {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        }

        // DOCMEND_REPAIR__LIST_NUMBERING -> repair.list_numbering
        figment = figment.merge(Env::prefixed(env_prefix).split("__").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| DocError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/docmend/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".config"))
            })
            .map(|p| p.join("docmend"))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join(CONFIG_FILE))
    }

    /// Get path to project config file
    pub fn project_config_path(root: &ProjectRoot) -> PathBuf {
        root.join(PROJECT_DIR).join(CONFIG_FILE)
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file paths
    pub fn show_path(root: &ProjectRoot) {
        println!("Configuration paths:");
        println!();

        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        } else {
            println!("  Global:  (not available)");
        }

        let project = Self::project_config_path(root);
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());
    }

    /// Show current effective configuration
    pub fn show_config(config: &Config, as_json: bool) -> Result<()> {
        if as_json {
            println!("{}", serde_json::to_string_pretty(config)?);
        } else {
            println!(
                "{}",
                toml::to_string_pretty(config).with_context("Failed to render config")?
            );
        }

        Ok(())
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Write the default project config, returning its path
    pub fn init_project(root: &ProjectRoot, force: bool) -> Result<PathBuf> {
        let config_path = Self::project_config_path(root);
        if let Some(dir) = config_path.parent() {
            fs::create_dir_all(dir)?;
        }

        if config_path.exists() && !force {
            info!("Project config exists: {}", config_path.display());
            return Ok(config_path);
        }

        fs::write(&config_path, Self::default_project_config())?;
        info!("Created project config: {}", config_path.display());

        Ok(config_path)
    }

    // =========================================================================
    // Internal
    // =========================================================================

    /// Generate default project config content (TOML)
    fn default_project_config() -> String {
        r#"# docmend Project Configuration
# Project settings override ~/.config/docmend/config.toml.

version = "1.0"

[check]
# "full" prints every file, "simple" prints counts and broken links
reporter = "full"
# Globs of sources to check; empty checks every Markdown file
only = []

[assets]
include_svg = false

[rewrite]
# Also rewrite relocated report names outside link syntax
bare_relocations = true

[repair]
# "continue": blank lines keep an ordered list going; "reset": they end it
list_numbering = "continue"

[report]
write_rename_report = true
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::ListNumbering;
    use crate::report::ReporterStyle;
    use tempfile::TempDir;

    fn temp_root() -> (TempDir, ProjectRoot) {
        let temp = TempDir::new().unwrap();
        let root = ProjectRoot::new(temp.path()).unwrap();
        (temp, root)
    }

    #[test]
    fn test_default_project_config_parses() {
        let config: Config = toml::from_str(&ConfigLoader::default_project_config()).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.repair.list_numbering, ListNumbering::Continue);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_init_project() {
        let (_temp, root) = temp_root();

        let path = ConfigLoader::init_project(&root, false).unwrap();
        assert_eq!(path, root.join(".docmend/config.toml"));
        assert!(path.exists());

        fs::write(&path, "version = \"2.0\"\n").unwrap();
        ConfigLoader::init_project(&root, false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "version = \"2.0\"\n");

        ConfigLoader::init_project(&root, true).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("[repair]"));
    }

    #[test]
    fn test_project_config_overrides_defaults() {
        let (_temp, root) = temp_root();
        fs::create_dir_all(root.join(".docmend")).unwrap();
        fs::write(
            root.join(".docmend/config.toml"),
            "[check]\nreporter = \"simple\"\n\n[assets]\ninclude_svg = true\n",
        )
        .unwrap();

        let config = ConfigLoader::load_with_env(&root, "DOCMEND_TEST_UNSET_").unwrap();
        assert_eq!(config.check.reporter, ReporterStyle::Simple);
        assert!(config.assets.include_svg);
        assert!(config.rewrite.bare_relocations);
    }

    #[test]
    fn test_env_override() {
        let (_temp, root) = temp_root();
        // SAFETY: the prefix is unique to this test
        unsafe {
            std::env::set_var("DOCMEND_LOADER_TEST_REPAIR__LIST_NUMBERING", "reset");
        }
        let config = ConfigLoader::load_with_env(&root, "DOCMEND_LOADER_TEST_").unwrap();
        unsafe {
            std::env::remove_var("DOCMEND_LOADER_TEST_REPAIR__LIST_NUMBERING");
        }
        assert_eq!(config.repair.list_numbering, ListNumbering::Reset);
    }
}
