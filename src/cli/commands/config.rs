//! Config Command
//!
//! Manage docmend configuration.
//!
//! Usage:
//!   docmend config show [-f json]
//!   docmend config path
//!   docmend config init [--force]

use crate::cli::ui::Output;
use crate::cli::util::CommandContext;
use crate::config::ConfigLoader;
use crate::types::{ProjectRoot, Result};

/// Show the merged effective configuration
pub fn show(ctx: &CommandContext, format: &str) -> Result<()> {
    ConfigLoader::show_config(&ctx.config, format == "json")
}

/// Show configuration paths
pub fn path(root: &ProjectRoot) -> Result<()> {
    ConfigLoader::show_path(root);
    Ok(())
}

/// Initialize project configuration
pub fn init(root: &ProjectRoot, force: bool) -> Result<()> {
    let path = ConfigLoader::init_project(root, force)?;
    Output::new().success("Initialized project configuration");
    println!("  Config: {}", path.display());
    Ok(())
}
