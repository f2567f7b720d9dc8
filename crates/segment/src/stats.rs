//! Per-document segmentation statistics.
//!
//! A value threaded through the driver and returned with the chunk list;
//! nothing here is global or shared across documents.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

use pagemill_core::Chunk;

/// Upper bounds (exclusive) of the size histogram buckets; the last bucket
/// is open-ended.
const BUCKET_BOUNDS: &[usize] = &[250, 500, 1000, 2000, 4000];

/// One histogram bucket of chunk character counts.
#[derive(Debug, Clone, Serialize)]
pub struct SizeBucket {
    pub label: String,
    pub count: usize,
}

/// Aggregated statistics for one segmented document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentStats {
    pub total_chunks: usize,
    /// Chunk counts keyed by kind label, in first-seen order.
    pub chunks_by_kind: IndexMap<String, usize>,
    pub merged_chunks: usize,
    pub total_chars: usize,
    pub min_chunk_size: usize,
    pub max_chunk_size: usize,
    pub mean_chunk_size: f64,
    pub size_histogram: Vec<SizeBucket>,
    pub generated_at: DateTime<Utc>,

    #[serde(skip)]
    bucket_counts: Vec<usize>,
}

impl Default for DocumentStats {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStats {
    pub fn new() -> Self {
        Self {
            total_chunks: 0,
            chunks_by_kind: IndexMap::new(),
            merged_chunks: 0,
            total_chars: 0,
            min_chunk_size: 0,
            max_chunk_size: 0,
            mean_chunk_size: 0.0,
            size_histogram: Vec::new(),
            generated_at: Utc::now(),
            bucket_counts: vec![0; BUCKET_BOUNDS.len() + 1],
        }
    }

    /// Record one final chunk.
    pub fn record_chunk(&mut self, chunk: &Chunk) {
        let size = chunk.metadata.char_count;

        self.total_chunks += 1;
        self.total_chars += size;
        *self
            .chunks_by_kind
            .entry(chunk.metadata.kind.label().to_string())
            .or_insert(0) += 1;

        if self.total_chunks == 1 || size < self.min_chunk_size {
            self.min_chunk_size = size;
        }
        if size > self.max_chunk_size {
            self.max_chunk_size = size;
        }
        self.mean_chunk_size = self.total_chars as f64 / self.total_chunks as f64;

        let bucket = BUCKET_BOUNDS
            .iter()
            .position(|&bound| size < bound)
            .unwrap_or(BUCKET_BOUNDS.len());
        self.bucket_counts[bucket] += 1;
        self.size_histogram = self.render_histogram();
    }

    /// Record one boundary merge performed by the page merger.
    pub fn record_merge(&mut self) {
        self.merged_chunks += 1;
    }

    fn render_histogram(&self) -> Vec<SizeBucket> {
        let mut lower = 0;
        let mut buckets = Vec::with_capacity(self.bucket_counts.len());
        for (i, &count) in self.bucket_counts.iter().enumerate() {
            let label = match BUCKET_BOUNDS.get(i) {
                Some(&upper) => {
                    let l = format!("{lower}-{}", upper - 1);
                    lower = upper;
                    l
                }
                None => format!("{lower}+"),
            };
            buckets.push(SizeBucket { label, count });
        }
        buckets
    }
}
