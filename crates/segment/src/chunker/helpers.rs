//! Boundary-finding utilities for oversized-section splitting.

/// Sentence-terminal punctuation.
pub(crate) fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// True when the last non-whitespace character is sentence-terminal.
/// Closing quotes and brackets after the terminal are looked through.
pub(crate) fn ends_with_terminal(text: &str) -> bool {
    text.chars()
        .rev()
        .find(|c| !c.is_whitespace() && !matches!(c, '"' | '\'' | ')' | ']' | '\u{201d}' | '\u{2019}'))
        .map(is_terminal)
        .unwrap_or(false)
}

/// Byte offset of the best sentence boundary whose head stays within
/// `max_chars` characters. A boundary is terminal punctuation followed by
/// whitespace; the head keeps the punctuation. Returns `None` when no such
/// boundary exists.
pub(crate) fn sentence_split_point(text: &str, max_chars: usize) -> Option<usize> {
    let mut best = None;
    let mut prev: Option<(usize, char, usize)> = None; // (byte, char, char_pos)

    for (pos, (byte, c)) in text.char_indices().enumerate() {
        if let Some((pbyte, pc, ppos)) = prev {
            if is_terminal(pc) && c.is_whitespace() {
                // Head spans ppos + 1 characters.
                if ppos + 1 <= max_chars {
                    best = Some(pbyte + pc.len_utf8());
                } else {
                    break;
                }
            }
        }
        prev = Some((byte, c, pos));
    }
    best
}

/// Byte offset of the last whitespace gap whose head stays within
/// `max_chars` characters and is non-empty. Returns `None` for a single
/// unbroken token.
pub(crate) fn word_split_point(text: &str, max_chars: usize) -> Option<usize> {
    let mut best = None;
    for (pos, (byte, c)) in text.char_indices().enumerate() {
        if c.is_whitespace() && pos > 0 && pos <= max_chars {
            best = Some(byte);
        }
        if pos > max_chars {
            break;
        }
    }
    best
}

/// Split `text` into pieces of at most `max_chars` characters, preferring
/// sentence boundaries, then word boundaries, then a hard character cut for
/// unbroken tokens. Every piece is trimmed and non-empty.
pub(crate) fn split_oversized(text: &str, max_chars: usize) -> Vec<String> {
    debug_assert!(max_chars > 0);
    let mut pieces = Vec::new();
    let mut rest = text.trim();

    while rest.chars().count() > max_chars {
        let split = sentence_split_point(rest, max_chars)
            .or_else(|| word_split_point(rest, max_chars))
            .unwrap_or_else(|| hard_cut(rest, max_chars));
        let (head, tail) = rest.split_at(split);
        let head = head.trim_end();
        if !head.is_empty() {
            pieces.push(head.to_string());
        }
        rest = tail.trim_start();
    }
    if !rest.is_empty() {
        pieces.push(rest.to_string());
    }
    pieces
}

/// Byte offset after exactly `max_chars` characters.
fn hard_cut(text: &str, max_chars: usize) -> usize {
    text.char_indices()
        .nth(max_chars)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}
