//! Batch command implementation
//!
//! Reads queries from a file or the command line, fans them out through the
//! batch coordinator with a progress bar, and prints one URL per query.

use std::path::PathBuf;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tabled::Tabled;
use tokio_util::sync::CancellationToken;

use crate::cli::{CommandContext, OutputFormat};
use crate::error::{Error, Result};
use crate::output::{json::format_json, table::format_table};
use crate::resolver::{BatchItem, resolve_batch_with};

/// A resolved batch entry as presented to the user
#[derive(Debug, Serialize, Tabled)]
pub struct BatchRow {
    #[tabled(rename = "QUERY")]
    pub query: String,

    #[tabled(rename = "URL")]
    pub url: String,
}

/// Resolve a batch of travel queries concurrently
pub async fn run(
    file: Option<PathBuf>,
    queries: Vec<String>,
    stagger_ms: Option<u64>,
    format: Option<OutputFormat>,
    config_path: Option<&str>,
    no_cache: bool,
) -> Result<()> {
    let ctx = CommandContext::new(format, config_path, no_cache)?;

    let queries = collect_queries(file, queries)?;
    if queries.is_empty() {
        return Err(Error::Other(
            "No queries given. Pass queries as arguments or use --file.".to_string(),
        ));
    }

    let items: Vec<BatchItem> = queries
        .iter()
        .enumerate()
        .map(|(i, q)| BatchItem {
            id: i.to_string(),
            query: q.clone(),
        })
        .collect();

    let stagger = Duration::from_millis(stagger_ms.unwrap_or(ctx.config.preferences.stagger_ms));

    // A torn-down batch (ctrl-c) settles remaining items on placeholders
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_cancel.cancel();
        }
    });

    let progress = ProgressBar::new(items.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let resolved = resolve_batch_with(&ctx.resolver, items, &cancel, stagger, |image| {
        progress.set_message(image.query.clone());
        progress.inc(1);
    })
    .await;
    progress.finish_and_clear();

    let mut rows: Vec<(usize, BatchRow)> = resolved
        .into_iter()
        .map(|image| {
            let index = image.id.parse::<usize>().unwrap_or(usize::MAX);
            (
                index,
                BatchRow {
                    query: image.query,
                    url: image.url,
                },
            )
        })
        .collect();
    // Present results in input order regardless of arrival order
    rows.sort_by_key(|(index, _)| *index);
    let rows: Vec<BatchRow> = rows.into_iter().map(|(_, row)| row).collect();

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&rows)?),
        OutputFormat::Table => println!("{}", format_table(&rows)),
        OutputFormat::Pretty => {
            for row in &rows {
                println!("{}\t{}", row.query, row.url);
            }
        }
    }

    Ok(())
}

/// Merge queries from an optional file (one per line, blanks skipped) with
/// inline arguments; file entries come first.
fn collect_queries(file: Option<PathBuf>, inline: Vec<String>) -> Result<Vec<String>> {
    let mut queries = Vec::new();

    if let Some(path) = file {
        let contents = std::fs::read_to_string(&path)?;
        queries.extend(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from),
        );
    }

    queries.extend(inline);
    Ok(queries)
}
