use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docmend::cli::commands::{self, CheckOptions, NormalizeOptions};
use docmend::cli::{CommandContext, resolve_root};

#[derive(Parser)]
#[command(name = "docmend")]
#[command(
    version,
    about = "Link checker and normalizer for Markdown documentation trees"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true, env = "DOCMEND_ROOT", help = "Project root (default: current directory)")]
    root: Option<PathBuf>,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check every internal link in the Markdown sources
    Check {
        #[arg(long, help = "Print counts and broken links only")]
        simple: bool,
        #[arg(long, value_name = "PATH", help = "Only check sources matching these globs")]
        only: Vec<String>,
        #[arg(long, value_name = "JSON", help = "Also write the report as JSON")]
        report: Option<PathBuf>,
    },

    /// Rename diagram assets to canonical names and rewrite references
    Normalize {
        #[arg(long = "dry-run", help = "Show planned renames without touching disk")]
        dry_run: bool,
        #[arg(long = "no-report", help = "Do not write the rename report")]
        no_report: bool,
        #[arg(long = "no-rewrite", help = "Rename files without rewriting references")]
        no_rewrite: bool,
    },

    /// Rewrite references to documents moved under reports-summaries/
    Relocate {
        #[arg(long = "dry-run", help = "Show affected files without writing")]
        dry_run: bool,
    },

    /// Repair fences, ordered lists and list spacing
    Fix {
        #[arg(help = "Files to repair (default: every Markdown source)")]
        paths: Vec<PathBuf>,
        #[arg(long, help = "Report files that need repair without writing")]
        check: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Write the default project configuration
    Init {
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mdocmend encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Call default hook for backtrace (if RUST_BACKTRACE=1)
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<u8> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let root = cli.root.as_deref();

    let code = match cli.command {
        Commands::Check {
            simple,
            only,
            report,
        } => {
            let ctx = CommandContext::load(root)?;
            commands::check::run(
                &ctx,
                &CheckOptions {
                    simple,
                    only,
                    report,
                },
            )?
        }
        Commands::Normalize {
            dry_run,
            no_report,
            no_rewrite,
        } => {
            let ctx = CommandContext::load(root)?;
            commands::normalize::run(
                &ctx,
                NormalizeOptions {
                    dry_run,
                    no_report,
                    no_rewrite,
                },
            )?
        }
        Commands::Relocate { dry_run } => {
            let ctx = CommandContext::load(root)?;
            commands::relocate::run(&ctx, dry_run)?
        }
        Commands::Fix { paths, check } => {
            let ctx = CommandContext::load(root)?;
            commands::fix::run(&ctx, &paths, check)?
        }
        Commands::Config { action } => {
            match action {
                ConfigAction::Show { format } => {
                    let ctx = CommandContext::load(root)?;
                    commands::config::show(&ctx, &format)?;
                }
                ConfigAction::Path => {
                    commands::config::path(&resolve_root(root)?)?;
                }
                ConfigAction::Init { force } => {
                    commands::config::init(&resolve_root(root)?, force)?;
                }
            }
            0
        }
    };

    Ok(code)
}
