//! Configuration management for tripshot

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Environment variable that overrides the configured API key
pub const ENV_API_KEY: &str = "TRIPSHOT_API_KEY";

/// Environment variable that overrides the photo provider host
pub const ENV_API_HOST: &str = "TRIPSHOT_API_HOST";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Pexels API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Per-item assignment delay for batch resolution, in milliseconds
    #[serde(default = "default_stagger_ms")]
    pub stagger_ms: u64,
}

fn default_stagger_ms() -> u64 {
    crate::resolver::batch::ASSIGN_STAGGER.as_millis() as u64
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            format: None,
            stagger_ms: default_stagger_ms(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".tripshot").join("config.yaml"))
    }

    /// Load configuration from a custom path, or the default location
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from(PathBuf::from(p)),
            None => Self::load_from(Self::default_path()?),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(Self::default_path()?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_yaml::to_string(self)
            .map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // Set file permissions to 600 on Unix systems
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Resolve the effective API key: environment first, then the config file
    pub fn resolve_api_key(&self) -> Result<String> {
        if let Ok(key) = std::env::var(ENV_API_KEY)
            && !key.is_empty()
        {
            return Ok(key);
        }
        self.api_key
            .clone()
            .ok_or_else(|| ConfigError::MissingApiKey.into())
    }
}
