//! tripshot CLI - destination photo resolver for travel platform UIs

use clap::Parser;

mod cache;
mod cli;
mod client;
mod config;
mod error;
mod output;
mod resolver;

use cli::{CacheCommands, Cli, Commands};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Init => cli::init::run(config_path).await,
        Commands::Status => cli::status::run(config_path),
        Commands::Resolve { query } => {
            cli::resolve::run(&query, cli.format, config_path, cli.no_cache).await
        }
        Commands::Batch {
            file,
            queries,
            stagger_ms,
        } => {
            cli::batch::run(
                file,
                queries,
                stagger_ms,
                cli.format,
                config_path,
                cli.no_cache,
            )
            .await
        }
        Commands::Cache(cache_cmd) => match cache_cmd {
            CacheCommands::Stats => cli::cache::stats(cli.format),
            CacheCommands::Clear => cli::cache::clear(cli.format),
            CacheCommands::Compact => cli::cache::compact(cli.format),
            CacheCommands::Path => cli::cache::path(),
        },
        Commands::Completions { shell } => cli::completions::run(shell),
        Commands::Version => {
            println!("tripshot version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
