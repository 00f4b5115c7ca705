//! Resolve command implementation

use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;
use crate::output::json::format_json;

/// Resolve a single travel query and print the image URL
pub async fn run(
    query: &str,
    format: Option<OutputFormat>,
    config_path: Option<&str>,
    no_cache: bool,
) -> Result<()> {
    let ctx = CommandContext::new(format, config_path, no_cache)?;

    let url = ctx.resolver.resolve(query).await;

    match ctx.format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "query": query,
                "url": url,
            });
            println!("{}", format_json(&json)?);
        }
        _ => println!("{}", url),
    }

    Ok(())
}
