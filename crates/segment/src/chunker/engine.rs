//! The buffer-accumulator chunking loop.

use pagemill_core::{Chunk, ChunkingConfig, Section, SECTION_SEPARATOR};

use super::helpers::split_oversized;

/// Pending sections awaiting flush, with a running character count that
/// includes the separators a flush would insert.
struct Buffer {
    sections: Vec<Section>,
    chars: usize,
}

impl Buffer {
    fn new() -> Self {
        Self {
            sections: Vec::new(),
            chars: 0,
        }
    }

    fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    fn push(&mut self, section: Section) {
        if !self.sections.is_empty() {
            self.chars += SECTION_SEPARATOR.chars().count();
        }
        self.chars += section.char_len();
        self.sections.push(section);
    }

    fn would_exceed(&self, section: &Section, limit: usize) -> bool {
        if self.sections.is_empty() {
            return false;
        }
        self.chars + SECTION_SEPARATOR.chars().count() + section.char_len() > limit
    }

    fn flush_into(&mut self, out: &mut Vec<Chunk>) {
        if self.sections.is_empty() {
            return;
        }
        out.push(Chunk::from_sections(&self.sections));
        self.sections.clear();
        self.chars = 0;
    }
}

/// Assemble the ordered section sequence of one page into chunks.
///
/// Every section ends up in exactly one chunk. Protected sections become
/// their own chunks; prose accumulates until `target_size` and flushes; a
/// single prose section over `max_size` is split at sentence boundaries
/// (word boundaries as fallback) so no plain-text chunk exceeds the ceiling.
/// The final flush may be undersized; the caller treats it as the page's
/// trailing remainder.
pub fn chunk_sections(sections: Vec<Section>, config: &ChunkingConfig) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut buffer = Buffer::new();

    for section in sections {
        if section.protected {
            // Never combined with adjacent prose: a table/image/code body
            // in the middle of a prose chunk would poison the embedding.
            buffer.flush_into(&mut chunks);
            chunks.push(Chunk::from_sections(&[section]));
            continue;
        }

        // Appending must not push a multi-section buffer past the ceiling.
        if buffer.would_exceed(&section, config.max_size) {
            buffer.flush_into(&mut chunks);
        }

        if section.char_len() > config.max_size {
            // Oversized single section: emit bounded pieces, keep the
            // remainder buffered so trailing prose can still join it.
            debug_assert!(buffer.is_empty());
            let pieces = split_oversized(&section.text, config.max_size);
            let last = pieces.len().saturating_sub(1);
            for (i, piece) in pieces.into_iter().enumerate() {
                let part = Section {
                    text: piece,
                    ..section.clone()
                };
                if i < last {
                    chunks.push(Chunk::from_sections(&[part]));
                } else {
                    buffer.push(part);
                }
            }
        } else {
            buffer.push(section);
        }

        if buffer.chars >= config.target_size {
            buffer.flush_into(&mut chunks);
        }
    }

    buffer.flush_into(&mut chunks);
    chunks
}
