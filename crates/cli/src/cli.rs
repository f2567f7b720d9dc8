use std::path::PathBuf;

use clap::Parser;

/// Document segmentation front end for pagemill.
///
/// Reads a paginated document (JSON pages file or raw markdown), runs the
/// segmentation pipeline, and writes the chunk list with statistics as JSON.
#[derive(Parser, Debug)]
#[command(name = "pagemill", about = "Segment paginated documents into embedding-ready chunks")]
pub struct CliArgs {
    /// Input file: a JSON pages document ({"pages": [...]}) or raw markdown
    /// (form-feed separated pages; a single page otherwise)
    pub input: PathBuf,

    /// Write output JSON here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Preferred chunk size in characters (overrides CHUNK_TARGET_SIZE)
    #[arg(long)]
    pub target_size: Option<usize>,

    /// Minimum chunk size in characters (overrides CHUNK_MIN_SIZE)
    #[arg(long)]
    pub min_size: Option<usize>,

    /// Maximum chunk size in characters (overrides CHUNK_MAX_SIZE)
    #[arg(long)]
    pub max_size: Option<usize>,

    /// Disable cross-page boundary merging
    #[arg(long)]
    pub no_merge: bool,

    /// Pretty-print the output JSON
    #[arg(long)]
    pub pretty: bool,
}
