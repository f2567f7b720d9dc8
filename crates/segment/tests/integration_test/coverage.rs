use pagemill_core::ChunkKind;
use pagemill_segment::process_document;

use crate::helpers::{make_config, make_page, normalize};

#[test]
fn chunk_contents_reconstruct_the_document() {
    let page1 = "# Guide\n\nFirst paragraph of the guide with enough words to matter.\n\n\
                 - step one\n- step two\n\nClosing prose for page one.";
    let page2 = "## Details\n\nSecond page prose, also with enough words to be seen.\n\n\
                 ```\nfn protected() {}\n```\n\nFinal line of the document.";
    let pages = vec![make_page(1, page1), make_page(2, page2)];

    let out = process_document(&pages, &make_config(80, 1, 400)).unwrap();

    let rebuilt = out
        .chunks
        .iter()
        .map(|c| c.content.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let original = format!("{page1} {page2}");
    assert_eq!(normalize(&rebuilt), normalize(&original));
}

#[test]
fn fenced_code_is_never_split() {
    let code = "```rust\nfn alpha() {}\nfn beta() {}\nfn gamma() {}\nfn delta() {}\n```";
    let text = format!("Lead-in paragraph.\n\n{code}\n\nTrailing paragraph.");
    let pages = vec![make_page(1, &text)];

    // Ceiling far below the code block size.
    let out = process_document(&pages, &make_config(20, 1, 40)).unwrap();

    let holders: Vec<_> = out
        .chunks
        .iter()
        .filter(|c| c.content.contains("fn alpha"))
        .collect();
    assert_eq!(holders.len(), 1);
    assert_eq!(holders[0].content, code);
    assert_eq!(holders[0].metadata.kind, ChunkKind::Code);
}

#[test]
fn table_region_is_never_split() {
    let table = "| a | b |\n|---|---|\n| 1 | 2 |\n| 3 | 4 |\n| 5 | 6 |";
    let text = format!("Before.\n\n{table}\n\nAfter.");
    let pages = vec![make_page(1, &text)];

    let out = process_document(&pages, &make_config(15, 1, 30)).unwrap();

    let holders: Vec<_> = out
        .chunks
        .iter()
        .filter(|c| c.content.contains("| 1 | 2 |"))
        .collect();
    assert_eq!(holders.len(), 1);
    assert_eq!(holders[0].content, table);
}

#[test]
fn plain_text_chunks_respect_the_ceiling() {
    let body = "One sentence here. Another sentence there. ".repeat(40);
    let pages = vec![make_page(1, &body)];
    let config = make_config(200, 50, 300);

    let out = process_document(&pages, &config).unwrap();

    assert!(out.chunks.len() > 1);
    for chunk in &out.chunks {
        assert!(
            chunk.metadata.char_count <= config.max_size,
            "chunk of {} exceeds max {}",
            chunk.metadata.char_count,
            config.max_size
        );
    }
}

#[test]
fn only_the_trailing_chunk_may_be_undersized() {
    let body = "A solid sentence with a reasonable number of words in it. ".repeat(20);
    let pages = vec![make_page(1, &body)];
    let config = make_config(200, 100, 400);

    let out = process_document(&pages, &config).unwrap();

    for chunk in &out.chunks[..out.chunks.len() - 1] {
        assert!(
            chunk.metadata.char_count >= config.min_size,
            "non-trailing chunk of {} below min {}",
            chunk.metadata.char_count,
            config.min_size
        );
    }
}

#[test]
fn stats_reflect_the_final_chunk_list() {
    let text = "Prose paragraph.\n\n| a | b |\n|---|---|\n| 1 | 2 |\n\nMore prose.";
    let pages = vec![make_page(1, text)];
    let out = process_document(&pages, &make_config(1000, 1, 2000)).unwrap();

    assert_eq!(out.stats.total_chunks, out.chunks.len());
    let counted: usize = out.stats.chunks_by_kind.values().sum();
    assert_eq!(counted, out.chunks.len());
    assert_eq!(out.stats.chunks_by_kind["table"], 1);
    assert_eq!(out.stats.merged_chunks, 0);
}

#[test]
fn empty_document_yields_empty_output() {
    let out = process_document(&[], &make_config(1000, 1, 2000)).unwrap();
    assert!(out.chunks.is_empty());
    assert_eq!(out.stats.total_chunks, 0);
}
