use pagemill_core::ChunkingConfig;
use pagemill_segment::merger::{merge_boundary, MergeOutcome};
use pagemill_segment::{continuation, process_document};

use crate::helpers::{make_config, make_page};

#[test]
fn disabled_merging_leaves_boundary_chunks_apart() {
    let pages = vec![
        make_page(1, "The architecture relies on three core"),
        make_page(2, "components: ingestion, processing, and storage."),
    ];
    let config = ChunkingConfig {
        enable_merging: false,
        ..make_config(1000, 1, 2000)
    };
    let out = process_document(&pages, &config).unwrap();

    assert_eq!(out.chunks.len(), 2);
    assert!(out.chunks.iter().all(|c| !c.metadata.is_merged));
    assert_eq!(out.stats.merged_chunks, 0);
}

#[test]
fn clean_boundary_is_left_untouched() {
    let pages = vec![
        make_page(1, "Page one finishes its thought completely."),
        make_page(2, "Page two opens an unrelated topic."),
    ];
    let out = process_document(&pages, &make_config(1000, 1, 2000)).unwrap();

    assert_eq!(out.chunks.len(), 2);
    assert_eq!(out.chunks[0].metadata.page_range, (1, 1));
    assert_eq!(out.chunks[1].metadata.page_range, (2, 2));
}

#[test]
fn rerunning_merger_on_negative_signal_is_identity() {
    let pages = vec![
        make_page(1, "A finished statement."),
        make_page(2, "Another finished statement."),
    ];
    let config = make_config(1000, 1, 2000);
    let out = process_document(&pages, &config).unwrap();
    let [prev, next]: [_; 2] = out.chunks.try_into().unwrap();

    let signal = continuation::detect(&prev, &next);
    assert!(signal.is_none());

    let prev_content = prev.content.clone();
    let next_content = next.content.clone();
    match merge_boundary(prev, next, signal.as_ref(), &config) {
        MergeOutcome::Unchanged(a, b) => {
            assert_eq!(a.content, prev_content);
            assert_eq!(b.content, next_content);
        }
        MergeOutcome::Merged(_) => panic!("negative signal must not merge"),
    }
}

#[test]
fn table_boundary_is_never_merged() {
    // Page 1 ends in a complete protected table; page 2 starts with prose.
    let pages = vec![
        make_page(1, "Intro.\n\n| a | b |\n|---|---|\n| 1 | 2 |"),
        make_page(2, "prose that does not terminate"),
    ];
    let out = process_document(&pages, &make_config(1000, 1, 2000)).unwrap();
    assert!(out.chunks.iter().all(|c| !c.metadata.is_merged));
}

#[test]
fn merge_happens_at_each_severed_boundary() {
    let pages = vec![
        make_page(1, "First page trails off without"),
        make_page(2, "ending. Second page also stops before the"),
        make_page(3, "end. Third page closes everything cleanly."),
    ];
    let out = process_document(&pages, &make_config(1000, 1, 2000)).unwrap();

    assert_eq!(out.stats.merged_chunks, 2);
    assert_eq!(out.chunks.len(), 1);
    let merged = &out.chunks[0];
    assert!(merged.metadata.is_merged);
    assert_eq!(merged.metadata.page_range, (1, 3));
}

#[test]
fn breadcrumbs_thread_across_pages() {
    let pages = vec![
        make_page(1, "# Manual\n\n## Install\n\nInstall text that ends here."),
        make_page(2, "More install prose continuing the same section."),
    ];
    let out = process_document(&pages, &make_config(1000, 1, 2000)).unwrap();

    let last = out.chunks.last().unwrap();
    assert_eq!(last.metadata.breadcrumbs, vec!["Manual", "Install"]);
}
