//! Per-document driver.
//!
//! Runs the stages strictly in page order: block detection, parsing,
//! chunk assembly, then continuation detection and merging against the
//! previous page's final chunk. The rolling boundary chunk is handed
//! explicitly from one iteration to the next; no state is ambient.

use tracing::{debug, info};

use pagemill_core::{Chunk, ChunkingConfig, ConfigError, PageInput};

use crate::blocks::detect_blocks;
use crate::chunker::chunk_sections;
use crate::continuation;
use crate::merger::{merge_boundary, MergeOutcome};
use crate::parser::parse_page;
use crate::stats::DocumentStats;

/// Final chunk list plus the statistics gathered while producing it.
#[derive(Debug, Clone)]
pub struct DocumentOutput {
    pub chunks: Vec<Chunk>,
    pub stats: DocumentStats,
}

/// Segment a whole document.
///
/// Pages must arrive in document order; continuation detection needs the
/// immediately preceding page's final chunk. Returns a fatal error for a
/// malformed configuration before any page is touched.
pub fn process_document(
    pages: &[PageInput],
    config: &ChunkingConfig,
) -> Result<DocumentOutput, ConfigError> {
    config.validate()?;

    let mut chunks: Vec<Chunk> = Vec::new();
    let mut stats = DocumentStats::new();
    let mut carried_crumbs: Vec<String> = Vec::new();

    for page in pages {
        let page = seed_context(page, &carried_crumbs);
        let blocks = detect_blocks(&page.raw_text);
        let parsed = parse_page(&page, &blocks);
        carried_crumbs = parsed.trailing_breadcrumbs;

        let mut page_chunks = chunk_sections(parsed.sections, config);
        debug!(
            page = page.page_number,
            blocks = blocks.len(),
            chunks = page_chunks.len(),
            "page segmented"
        );

        // Boundary repair against the previous page's last chunk.
        if config.enable_merging && !chunks.is_empty() && !page_chunks.is_empty() {
            let signal = continuation::detect(chunks.last().unwrap(), &page_chunks[0]);
            if let Some(sig) = signal {
                let prev = chunks.pop().unwrap();
                let first = page_chunks.remove(0);
                match merge_boundary(prev, first, Some(&sig), config) {
                    MergeOutcome::Merged(merged) => {
                        debug!(
                            page = page.page_number,
                            kind = ?sig.kind,
                            "merged boundary chunks"
                        );
                        stats.record_merge();
                        chunks.push(merged);
                    }
                    MergeOutcome::Unchanged(a, b) => {
                        chunks.push(a);
                        page_chunks.insert(0, b);
                    }
                }
            }
        }

        chunks.append(&mut page_chunks);
    }

    for chunk in &chunks {
        stats.record_chunk(chunk);
    }

    info!(
        pages = pages.len(),
        chunks = chunks.len(),
        merges = stats.merged_chunks,
        "document segmented"
    );

    Ok(DocumentOutput { chunks, stats })
}

/// Pages that supply no breadcrumb context inherit the previous page's
/// trailing stack, so mid-section pages keep their provenance.
fn seed_context(page: &PageInput, carried: &[String]) -> PageInput {
    if page.breadcrumb_context.is_empty() && !carried.is_empty() {
        PageInput {
            breadcrumb_context: carried.to_vec(),
            ..page.clone()
        }
    } else {
        page.clone()
    }
}
