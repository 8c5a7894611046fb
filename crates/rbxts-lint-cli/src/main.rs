//! rbxts-lint CLI tool.
//!
//! Usage:
//! ```bash
//! rbxts-lint check [OPTIONS] <SNAPSHOTS>...
//! rbxts-lint list-rules
//! rbxts-lint recommended [--format json|toml]
//! rbxts-lint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Type-aware linter for roblox-ts projects
#[derive(Parser)]
#[command(name = "rbxts-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run lint checks over host snapshots
    Check {
        /// Snapshot files, or directories containing them
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific rules (comma-separated names or codes)
        #[arg(long)]
        rules: Option<String>,

        /// Apply automatic fixes to the source files
        #[arg(long)]
        fix: bool,

        /// Skip type-aware rules for snapshots without type information
        #[arg(long)]
        skip_untyped: bool,
    },

    /// List available rules
    ListRules,

    /// Print the recommended rule configuration
    Recommended {
        /// Output format
        #[arg(short, long, default_value = "json")]
        format: PresetFormat,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

/// Output format for the recommended configuration.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum PresetFormat {
    /// An ESLint-style `rules` object.
    #[default]
    Json,
    /// A `[rules]` table for `rbxts-lint.toml`.
    Toml,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            paths,
            format,
            rules,
            fix,
            skip_untyped,
        } => {
            let source = config_resolver::resolve(&search_start(&paths), cli.config.as_deref());
            let options = commands::check::CheckOptions {
                format,
                rules_filter: rules,
                fix,
                skip_untyped,
            };
            let failed = commands::check::run(&paths, &options, &source)?;
            if failed {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::ListRules => commands::list_rules::run(),
        Commands::Recommended { format } => commands::recommended::run(format),
        Commands::Init { force } => commands::init::run(force),
    }
}

/// Directory the project config search starts from: the first checked path,
/// or its parent when it names a file.
fn search_start(paths: &[PathBuf]) -> PathBuf {
    match paths.first() {
        Some(p) if p.is_dir() => p.clone(),
        Some(p) => p
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), std::path::Path::to_path_buf),
        None => PathBuf::from("."),
    }
}
