use pagemill_core::{ChunkingConfig, PageInput};

/// Create a page with no incoming breadcrumb context.
pub fn make_page(page_number: u32, text: &str) -> PageInput {
    PageInput {
        page_number,
        raw_text: text.to_string(),
        breadcrumb_context: Vec::new(),
    }
}

/// Create a test configuration with merging enabled.
pub fn make_config(target: usize, min: usize, max: usize) -> ChunkingConfig {
    ChunkingConfig {
        target_size: target,
        min_size: min,
        max_size: max,
        enable_merging: true,
    }
}

/// Whitespace-normalize for content comparisons across separator
/// insertions.
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
