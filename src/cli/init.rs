//! Init command implementation

use colored::Colorize;
use dialoguer::{Password, theme::ColorfulTheme};

use crate::client::{PexelsClient, PhotoSearchApi};
use crate::config::{Config, ENV_API_HOST};
use crate::error::Result;

/// Run the init command
///
/// Prompts for the Pexels API key, validates it with a probe search, and
/// saves the configuration. A custom provider host can be set via the
/// `TRIPSHOT_API_HOST` environment variable.
pub async fn run(config_path: Option<&str>) -> Result<()> {
    println!("{}", "Welcome to tripshot!".bold().green());
    println!("Let's set up your Pexels API key.\n");

    let api_key: String = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter your Pexels API key")
        .interact()?;

    println!("\n{}", "Validating key...".cyan());
    let api_host = std::env::var(ENV_API_HOST).ok();
    let client = PexelsClient::with_host(api_key.clone(), api_host)?;
    client.search("nature", 1).await?;

    println!("{}", "✓ Key accepted!".green());

    // Keep existing preferences when re-initializing
    let mut config = Config::load_at(config_path).unwrap_or_default();
    config.api_key = Some(api_key);

    match config_path {
        Some(path) => config.save_to(path.into())?,
        None => config.save()?,
    }

    println!("\n{}", "Setup complete. Try:".bold());
    println!("  tripshot resolve \"Goa Beach\"");

    Ok(())
}
