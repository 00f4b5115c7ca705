//! Command execution context
//!
//! Bundles the loaded config, the provider-backed resolver, and runtime
//! options so command handlers don't repeat the same setup.

use std::sync::Arc;

use clap::ValueEnum;

use crate::cli::OutputFormat;
use crate::client::PexelsClient;
use crate::config::{Config, ENV_API_HOST, ENV_API_KEY};
use crate::error::{ConfigError, Error, Result};
use crate::resolver::ImageResolver;

/// Context for command execution containing config, resolver, and options.
pub struct CommandContext {
    /// Loaded configuration
    pub config: Config,
    /// Resolver over the live Pexels client (Arc-wrapped for batch fan-out)
    pub resolver: Arc<ImageResolver<PexelsClient>>,
    /// Effective output format
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a command context.
    ///
    /// Loads config from `config_path` (or the default location), resolves
    /// the API key (environment wins over the file; a missing config file is
    /// fine when the environment provides the key), and builds the resolver.
    /// The photo provider host honors `TRIPSHOT_API_HOST`.
    pub fn new(
        format: Option<OutputFormat>,
        config_path: Option<&str>,
        no_cache: bool,
    ) -> Result<Self> {
        let config = match Config::load_at(config_path) {
            Ok(config) => config,
            Err(Error::Config(ConfigError::NotFound)) if std::env::var(ENV_API_KEY).is_ok() => {
                Config::default()
            }
            Err(err) => return Err(err),
        };

        let format = format
            .or_else(|| {
                config
                    .preferences
                    .format
                    .as_deref()
                    .and_then(|f| OutputFormat::from_str(f, true).ok())
            })
            .unwrap_or_default();

        let api_key = config.resolve_api_key()?;
        let api_host = std::env::var(ENV_API_HOST).ok();
        let client = PexelsClient::with_host(api_key, api_host)?;
        let resolver = Arc::new(ImageResolver::new(client, !no_cache));

        Ok(Self {
            config,
            resolver,
            format,
        })
    }
}
