//! Boundary-chunk merging.
//!
//! Repairs content severed by pagination: given a positive continuation
//! signal, the last chunk of page N and the first chunk of page N+1 are
//! replaced by a single chunk. A merged chunk is not re-validated against
//! the size ceiling; splitting it again would reintroduce the defect being
//! repaired.

use uuid::Uuid;

use pagemill_core::{Chunk, ChunkKind, ChunkMetadata, ChunkingConfig, SECTION_SEPARATOR};

use crate::continuation::ContinuationSignal;

/// Result of one boundary decision.
#[derive(Debug, Clone)]
pub enum MergeOutcome {
    /// Both source chunks were consumed; the replacement covers them.
    Merged(Chunk),
    /// Boundary left intact; the chunks come back unmodified.
    Unchanged(Chunk, Chunk),
}

/// Merge two boundary chunks when a continuation signal is present.
///
/// Without a signal (or with merging disabled, or a non-text side) the
/// chunks pass through untouched, so re-running the merger is a no-op.
pub fn merge_boundary(
    prev: Chunk,
    next: Chunk,
    signal: Option<&ContinuationSignal>,
    config: &ChunkingConfig,
) -> MergeOutcome {
    if signal.is_none() || !config.enable_merging || !prev.is_text() || !next.is_text() {
        return MergeOutcome::Unchanged(prev, next);
    }

    let content = format!("{}{}{}", prev.content, SECTION_SEPARATOR, next.content);
    let page_range = (
        prev.metadata.page_range.0.min(next.metadata.page_range.0),
        prev.metadata.page_range.1.max(next.metadata.page_range.1),
    );

    let metadata = ChunkMetadata {
        breadcrumbs: pick_breadcrumbs(&prev, &next),
        kind: ChunkKind::Text,
        char_count: content.chars().count(),
        num_sections: prev.metadata.num_sections + next.metadata.num_sections,
        page_range,
        is_merged: true,
        merged_from_pages: Some((prev.metadata.page_range.1, next.metadata.page_range.0)),
    };

    MergeOutcome::Merged(Chunk {
        id: Uuid::new_v4(),
        content,
        metadata,
    })
}

/// The more specific (longer) trail labels the merged content; an
/// equal-length tie keeps the earlier page's trail.
fn pick_breadcrumbs(prev: &Chunk, next: &Chunk) -> Vec<String> {
    if next.metadata.breadcrumbs.len() > prev.metadata.breadcrumbs.len() {
        next.metadata.breadcrumbs.clone()
    } else {
        prev.metadata.breadcrumbs.clone()
    }
}
