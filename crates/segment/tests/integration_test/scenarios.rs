use pagemill_core::{ChunkKind, ChunkingConfig, ConfigError};
use pagemill_segment::process_document;

use crate::helpers::{make_config, make_page};

#[test]
fn severed_sentence_is_rejoined() {
    // Page N ends mid-sentence; page N+1 completes it.
    let pages = vec![
        make_page(1, "The architecture relies on three core"),
        make_page(2, "components: ingestion, processing, and storage."),
    ];
    let out = process_document(&pages, &make_config(1000, 1, 2000)).unwrap();

    assert_eq!(out.chunks.len(), 1);
    let merged = &out.chunks[0];
    assert_eq!(
        merged.content,
        "The architecture relies on three core\n\ncomponents: ingestion, processing, and storage."
    );
    assert!(merged.metadata.is_merged);
    assert_eq!(merged.metadata.merged_from_pages, Some((1, 2)));
    assert_eq!(out.stats.merged_chunks, 1);
}

#[test]
fn oversized_table_page_yields_one_table_chunk() {
    let rows: Vec<String> = (0..12)
        .map(|i| format!("| row {i} | some value {i} | more detail {i} |"))
        .collect();
    let table = format!("| id | value | detail |\n|----|-------|--------|\n{}", rows.join("\n"));
    let pages = vec![make_page(1, &table)];

    // Target far below the table size.
    let out = process_document(&pages, &make_config(100, 10, 200)).unwrap();

    assert_eq!(out.chunks.len(), 1);
    assert_eq!(out.chunks[0].metadata.kind, ChunkKind::Table);
    assert!(out.chunks[0].metadata.char_count > 100);
    for i in 0..12 {
        assert!(out.chunks[0].content.contains(&format!("row {i}")));
    }
}

#[test]
fn min_above_target_fails_before_processing() {
    let config = ChunkingConfig {
        target_size: 1000,
        min_size: 1500,
        max_size: 2000,
        enable_merging: true,
    };
    let pages = vec![make_page(1, "Any content.")];
    let err = process_document(&pages, &config).unwrap_err();
    assert!(matches!(err, ConfigError::TargetOutOfBounds { .. }));
}

#[test]
fn stranded_header_joins_its_body() {
    let pages = vec![
        make_page(1, "Some closing prose for the section.\n\n## Implementation Details"),
        make_page(2, "The implementation begins with the parser stage."),
    ];
    // Small target so the header is flushed into its own trailing chunk.
    let out = process_document(&pages, &make_config(30, 1, 120)).unwrap();

    let merged = out
        .chunks
        .iter()
        .find(|c| c.metadata.is_merged)
        .expect("header should merge with its body");
    assert_eq!(merged.metadata.kind, ChunkKind::Text);
    assert!(merged.content.contains("## Implementation Details"));
    assert!(merged.content.contains("parser stage"));
}
