//! Cross-page continuation detection.
//!
//! Inspects the last chunk of one page and the first chunk of the next for
//! evidence that pagination severed a single unit of content. Signals are
//! evaluated in a fixed precedence order so ambiguous boundaries resolve
//! deterministically.

use serde::Serialize;

use pagemill_core::Chunk;

use crate::blocks::{is_header_line, is_list_item, is_pipe_row};
use crate::chunker::helpers::ends_with_terminal;

/// Why two boundary chunks are believed to be one severed unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    TableContinuation,
    ListContinuation,
    HeaderWithoutBody,
    IncompleteSentence,
    TrailingConjunction,
}

/// A positive continuation verdict. Absence (`None` from [`detect`]) means
/// the boundary looks intentional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContinuationSignal {
    pub kind: SignalKind,
    pub confidence: f32,
}

/// Closed set of words that almost never end a sentence.
const DANGLING_WORDS: &[&str] = &[
    "and", "or", "but", "nor", "the", "a", "an", "of", "to", "in", "on", "at",
    "with", "for", "by", "as", "than",
];

/// Decide whether `prev` (last chunk of page N) and `next` (first chunk of
/// page N+1) were severed by pagination.
///
/// Only plain-text chunks are eligible: merging across a table/image/code
/// boundary is never valid, so any protected-kind side returns `None`
/// immediately.
pub fn detect(prev: &Chunk, next: &Chunk) -> Option<ContinuationSignal> {
    if !prev.is_text() || !next.is_text() {
        return None;
    }

    let last_line = prev.content.lines().rev().find(|l| !l.trim().is_empty())?;
    let first_line = next.content.lines().find(|l| !l.trim().is_empty())?;

    // 1. Open table row severed from its continuation.
    if is_pipe_row(last_line) && is_pipe_row(first_line) {
        return signal(SignalKind::TableContinuation, 0.95);
    }

    // 2. Unfinished list item followed by a bullet at the same or deeper
    //    nesting.
    if is_list_item(last_line)
        && !ends_with_terminal(last_line)
        && is_list_item(first_line)
        && indent_width(first_line) >= indent_width(last_line)
    {
        return signal(SignalKind::ListContinuation, 0.9);
    }

    // 3. A header stranded at the bottom of the page with its body on the
    //    next one.
    if is_lone_header(prev) && !is_header_line(first_line) {
        return signal(SignalKind::HeaderWithoutBody, 0.85);
    }

    // 4. Prose cut mid-sentence.
    if !ends_with_terminal(&prev.content) {
        return signal(SignalKind::IncompleteSentence, 0.7);
    }

    // 5. Sentence-terminal but dangling on a conjunction or article.
    if last_word_is_dangling(&prev.content) {
        return signal(SignalKind::TrailingConjunction, 0.75);
    }

    None
}

fn signal(kind: SignalKind, confidence: f32) -> Option<ContinuationSignal> {
    Some(ContinuationSignal { kind, confidence })
}

fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

fn is_lone_header(chunk: &Chunk) -> bool {
    if chunk.metadata.num_sections != 1 {
        return false;
    }
    let mut lines = chunk.content.lines().filter(|l| !l.trim().is_empty());
    match (lines.next(), lines.next()) {
        (Some(only), None) => is_header_line(only),
        _ => false,
    }
}

fn last_word_is_dangling(content: &str) -> bool {
    let Some(word) = content.split_whitespace().last() else {
        return false;
    };
    let stripped: String = word
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    DANGLING_WORDS.contains(&stripped.as_str())
}
