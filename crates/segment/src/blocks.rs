//! Protected-block detection.
//!
//! Scans raw page text for regions that must never be split across chunks:
//! pipe tables, image references with their captions, and fenced code.
//! Later stages treat each returned range as atomic.

use serde::Serialize;

/// Kind of a protected region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Table,
    Image,
    Code,
}

/// A byte range of the page that must stay in one piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtectedBlock {
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
    pub kind: BlockKind,
}

impl ProtectedBlock {
    fn len(&self) -> usize {
        self.end - self.start
    }

    fn overlaps(&self, other: &ProtectedBlock) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A line of the page together with its byte range (newline excluded).
#[derive(Debug, Clone, Copy)]
pub(crate) struct Line<'a> {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) text: &'a str,
}

pub(crate) fn index_lines(text: &str) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    let mut start = 0;
    for segment in text.split_inclusive('\n') {
        let content = segment.strip_suffix('\n').unwrap_or(segment);
        let content = content.strip_suffix('\r').unwrap_or(content);
        lines.push(Line {
            start,
            end: start + content.len(),
            text: content,
        });
        start += segment.len();
    }
    lines
}

// ── Line classifiers ────────────────────────────────────────────────

pub(crate) fn is_fence(line: &str) -> bool {
    let t = line.trim_start();
    t.starts_with("```") || t.starts_with("~~~")
}

fn fence_delimiter(line: &str) -> &'static str {
    if line.trim_start().starts_with("~~~") {
        "~~~"
    } else {
        "```"
    }
}

pub(crate) fn is_pipe_row(line: &str) -> bool {
    line.trim_start().starts_with('|')
}

/// A table header/separator row: only pipes, dashes, colons and spaces,
/// with at least one dash.
pub(crate) fn is_separator_row(line: &str) -> bool {
    let t = line.trim();
    t.starts_with('|')
        && t.contains('-')
        && t.chars().all(|c| matches!(c, '|' | '-' | ':' | ' '))
}

pub(crate) fn is_image_line(line: &str) -> bool {
    let t = line.trim();
    t.starts_with("![") && t.contains("](") && t.ends_with(')')
}

pub(crate) fn is_header_line(line: &str) -> bool {
    let t = line.trim_start();
    let hashes = t.chars().take_while(|&c| c == '#').count();
    (1..=6).contains(&hashes) && t[hashes..].starts_with(' ')
}

/// Strict bullet/numeral prefix; dash-prefixed prose without a trailing
/// space does not qualify.
pub(crate) fn is_list_item(line: &str) -> bool {
    let t = line.trim_start();
    if let Some(rest) = t.strip_prefix(['-', '*', '+']) {
        return rest.starts_with(' ');
    }
    let digits = t.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &t[digits..];
        return (rest.starts_with('.') || rest.starts_with(')'))
            && rest[1..].starts_with(' ');
    }
    false
}

fn is_structural(line: &str) -> bool {
    is_header_line(line) || is_list_item(line) || is_pipe_row(line) || is_fence(line)
        || is_image_line(line)
}

// ── Detection ───────────────────────────────────────────────────────

/// Find every protected region in the page.
///
/// Returned blocks are ordered by start offset and non-overlapping; when two
/// candidate ranges overlap, the longer (outer) one wins. Absence of matches
/// yields an empty list.
pub fn detect_blocks(text: &str) -> Vec<ProtectedBlock> {
    let lines = index_lines(text);
    let mut candidates = Vec::new();

    detect_code_fences(text, &lines, &mut candidates);
    detect_tables(&lines, &mut candidates);
    detect_images(&lines, &mut candidates);

    resolve_overlaps(candidates)
}

fn detect_code_fences(text: &str, lines: &[Line<'_>], out: &mut Vec<ProtectedBlock>) {
    let mut i = 0;
    while i < lines.len() {
        if !is_fence(lines[i].text) {
            i += 1;
            continue;
        }
        let delim = fence_delimiter(lines[i].text);
        let open = lines[i];
        let mut close: Option<Line<'_>> = None;
        let mut j = i + 1;
        while j < lines.len() {
            if lines[j].text.trim_start().starts_with(delim) {
                close = Some(lines[j]);
                break;
            }
            j += 1;
        }
        match close {
            Some(c) => {
                out.push(ProtectedBlock {
                    start: open.start,
                    end: c.end,
                    kind: BlockKind::Code,
                });
                i = j + 1;
            }
            None => {
                // Unterminated fence: assume the block stays open to the end
                // of the page and protect the whole tail.
                out.push(ProtectedBlock {
                    start: open.start,
                    end: text.len(),
                    kind: BlockKind::Code,
                });
                return;
            }
        }
    }
}

fn detect_tables(lines: &[Line<'_>], out: &mut Vec<ProtectedBlock>) {
    let mut i = 0;
    while i < lines.len() {
        if !is_pipe_row(lines[i].text) {
            i += 1;
            continue;
        }
        let run_start = i;
        let mut has_separator = false;
        while i < lines.len() && is_pipe_row(lines[i].text) {
            if is_separator_row(lines[i].text) {
                has_separator = true;
            }
            i += 1;
        }
        let run_len = i - run_start;
        // A lone pipe row (or a run with no separator) is not a table; it is
        // most likely a fragment severed by pagination and is left to the
        // continuation detector.
        if run_len >= 2 && has_separator {
            out.push(ProtectedBlock {
                start: lines[run_start].start,
                end: lines[i - 1].end,
                kind: BlockKind::Table,
            });
        }
    }
}

fn detect_images(lines: &[Line<'_>], out: &mut Vec<ProtectedBlock>) {
    let mut i = 0;
    while i < lines.len() {
        if !is_image_line(lines[i].text) {
            i += 1;
            continue;
        }
        let start = lines[i].start;
        let mut end = lines[i].end;
        // Bind an immediately following description line as the caption.
        if let Some(next) = lines.get(i + 1) {
            if !next.text.trim().is_empty() && !is_structural(next.text) {
                end = next.end;
                i += 1;
            }
        }
        out.push(ProtectedBlock {
            start,
            end,
            kind: BlockKind::Image,
        });
        i += 1;
    }
}

/// Longest range wins on overlap; survivors come back ordered by start.
fn resolve_overlaps(mut candidates: Vec<ProtectedBlock>) -> Vec<ProtectedBlock> {
    candidates.sort_by(|a, b| b.len().cmp(&a.len()).then(a.start.cmp(&b.start)));
    let mut kept: Vec<ProtectedBlock> = Vec::with_capacity(candidates.len());
    for block in candidates {
        if !kept.iter().any(|k| k.overlaps(&block)) {
            kept.push(block);
        }
    }
    kept.sort_by_key(|b| b.start);
    kept
}
