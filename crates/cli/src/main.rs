mod cli;

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::info;

use pagemill_core::{config::load_dotenv, Chunk, ChunkingConfig, PageInput};
use pagemill_segment::{process_document, DocumentStats};

use crate::cli::CliArgs;

/// Shape of a JSON input file.
#[derive(Debug, Deserialize)]
struct PagesFile {
    pages: Vec<PageInput>,
}

/// Serialized pipeline result.
#[derive(Debug, Serialize)]
struct OutputFile {
    chunks: Vec<Chunk>,
    stats: DocumentStats,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    load_dotenv();
    let args = CliArgs::parse();

    let config = resolve_config(&args);
    config.log_summary();

    let pages = read_pages(&args).context("failed to read input document")?;
    info!(pages = pages.len(), "document loaded");

    let output = process_document(&pages, &config).context("segmentation failed")?;

    let body = if args.pretty {
        serde_json::to_string_pretty(&OutputFile {
            chunks: output.chunks,
            stats: output.stats,
        })?
    } else {
        serde_json::to_string(&OutputFile {
            chunks: output.chunks,
            stats: output.stats,
        })?
    };

    match &args.output {
        Some(path) => fs::write(path, body)
            .with_context(|| format!("failed to write output to {}", path.display()))?,
        None => println!("{body}"),
    }

    Ok(())
}

/// Env-derived config with CLI flag overrides.
fn resolve_config(args: &CliArgs) -> ChunkingConfig {
    let mut config = ChunkingConfig::from_env();
    if let Some(target) = args.target_size {
        config.target_size = target;
    }
    if let Some(min) = args.min_size {
        config.min_size = min;
    }
    if let Some(max) = args.max_size {
        config.max_size = max;
    }
    if args.no_merge {
        config.enable_merging = false;
    }
    config
}

/// Load pages from a JSON pages file or raw markdown (form-feed separated).
fn read_pages(args: &CliArgs) -> Result<Vec<PageInput>> {
    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("cannot read {}", args.input.display()))?;

    let is_json = args
        .input
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        let file: PagesFile = serde_json::from_str(&raw)
            .with_context(|| format!("{} is not a valid pages document", args.input.display()))?;
        return Ok(file.pages);
    }

    // Raw markdown: form feeds mark page breaks; without them the whole
    // file is one page.
    let pages = raw
        .split('\u{c}')
        .enumerate()
        .map(|(i, text)| PageInput {
            page_number: (i + 1) as u32,
            raw_text: text.to_string(),
            breadcrumb_context: Vec::new(),
        })
        .collect();
    Ok(pages)
}
