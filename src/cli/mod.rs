//! CLI command definitions and handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
pub use clap_complete::Shell;

pub mod batch;
pub mod cache;
pub mod completions;
pub mod context;
pub mod init;
pub mod resolve;
pub mod status;

pub use context::CommandContext;

/// tripshot - destination photo resolver for travel platform UIs
#[derive(Parser, Debug)]
#[command(name = "tripshot")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Custom config file path (defaults to ~/.tripshot/config.yaml)
    #[arg(long, global = true, env = "TRIPSHOT_CONFIG")]
    pub config: Option<String>,

    /// Bypass the image cache and resolve fresh
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Top-level subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Set up your Pexels API key
    Init,

    /// Show configuration and cache status
    Status,

    /// Resolve a travel query to a destination image URL
    Resolve {
        /// Free-text travel query, e.g. "Goa Beach"
        query: String,
    },

    /// Resolve many queries concurrently
    Batch {
        /// File with one query per line
        #[arg(long)]
        file: Option<PathBuf>,

        /// Queries given inline
        queries: Vec<String>,

        /// Per-item assignment delay in milliseconds (overrides preferences)
        #[arg(long)]
        stagger_ms: Option<u64>,
    },

    /// Manage the local image cache
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },

    /// Show version information
    Version,
}

/// Cache management subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show cache statistics
    Stats,

    /// Remove all cached image entries
    Clear,

    /// Drop entries older than the retention window
    Compact,

    /// Show the cache directory path
    Path,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Pretty,
    /// Tabular output
    Table,
    /// Machine-readable JSON
    Json,
}
