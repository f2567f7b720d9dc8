//! Semantic parsing of one page into typed sections.
//!
//! Walks the raw text top to bottom, emitting protected regions atomically
//! and splitting everything else by structural markers. Headers maintain the
//! breadcrumb stack so every section carries its ancestor trail.

use pagemill_core::{PageInput, Section, SectionKind};

use crate::blocks::{
    index_lines, is_header_line, is_list_item, BlockKind, ProtectedBlock,
};

/// Parser output: ordered sections plus the breadcrumb stack left open at
/// the bottom of the page, for threading into the next page.
#[derive(Debug, Clone)]
pub struct ParsedPage {
    pub sections: Vec<Section>,
    pub trailing_breadcrumbs: Vec<String>,
}

/// Split a page into ordered sections covering its text, honoring the
/// protected ranges found by the block detector.
///
/// Never fails: text with no recognizable structure degrades to a single
/// paragraph section covering the whole page.
pub fn parse_page(page: &PageInput, blocks: &[ProtectedBlock]) -> ParsedPage {
    let mut state = ParseState::new(page);
    let lines = index_lines(&page.raw_text);

    let mut block_idx = 0;
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];

        // Skip blocks that ended before this line (defensive; ranges are
        // line-aligned).
        while block_idx < blocks.len() && blocks[block_idx].end <= line.start {
            block_idx += 1;
        }

        if let Some(block) = blocks.get(block_idx) {
            if line.start >= block.start && line.start < block.end {
                state.flush_paragraph();
                state.flush_list();
                state.emit_protected(&page.raw_text, block);
                // Consume every line inside the block.
                while i < lines.len() && lines[i].start < block.end {
                    i += 1;
                }
                block_idx += 1;
                continue;
            }
        }

        if line.text.trim().is_empty() {
            state.paragraph_break();
            state.flush_list();
        } else if is_header_line(line.text) {
            state.flush_paragraph();
            state.flush_list();
            state.emit_header(line.text);
        } else if is_list_item(line.text) {
            state.flush_paragraph();
            state.push_list_line(line.text);
        } else {
            // Ambiguous dash-prefixed prose fails the strict bullet pattern
            // and lands here as a paragraph line.
            state.flush_list();
            state.push_paragraph_line(line.text);
        }
        i += 1;
    }

    state.flush_paragraph();
    state.flush_list();
    state.finish()
}

/// Working state for one page walk.
struct ParseState {
    page_number: u32,
    /// (depth, title) pairs; seeded from the page's incoming context.
    crumbs: Vec<(u8, String)>,
    /// Completed blank-line-separated runs of the pending paragraph.
    para_parts: Vec<String>,
    /// Lines of the run currently being accumulated.
    para_lines: Vec<String>,
    list_lines: Vec<String>,
    sections: Vec<Section>,
}

impl ParseState {
    fn new(page: &PageInput) -> Self {
        // Incoming context arrives as titles only; assign increasing depths
        // so a level-N header on this page pops the right ancestors.
        let crumbs = page
            .breadcrumb_context
            .iter()
            .enumerate()
            .map(|(i, title)| ((i + 1) as u8, title.clone()))
            .collect();
        Self {
            page_number: page.page_number,
            crumbs,
            para_parts: Vec::new(),
            para_lines: Vec::new(),
            list_lines: Vec::new(),
            sections: Vec::new(),
        }
    }

    fn trail(&self) -> Vec<String> {
        self.crumbs.iter().map(|(_, t)| t.clone()).collect()
    }

    fn emit(&mut self, kind: SectionKind, text: String) {
        if text.trim().is_empty() {
            return;
        }
        self.sections.push(Section {
            kind,
            text,
            breadcrumbs: self.trail(),
            protected: kind.is_protected(),
            page_number: self.page_number,
        });
    }

    fn emit_protected(&mut self, raw: &str, block: &ProtectedBlock) {
        let kind = match block.kind {
            BlockKind::Table => SectionKind::Table,
            BlockKind::Image => SectionKind::Image,
            BlockKind::Code => SectionKind::Code,
        };
        let text = raw[block.start..block.end].trim_end().to_string();
        self.emit(kind, text);
    }

    fn emit_header(&mut self, line: &str) {
        let trimmed = line.trim_start();
        let level = trimmed.chars().take_while(|&c| c == '#').count() as u8;
        let title = trimmed[level as usize..].trim().to_string();

        // Pop siblings and deeper ancestors, then push this header so the
        // trail reads ancestors-then-self.
        self.crumbs.retain(|(depth, _)| *depth < level);
        self.crumbs.push((level, title));

        self.emit(SectionKind::Header { level }, line.trim_end().to_string());
    }

    fn push_paragraph_line(&mut self, line: &str) {
        self.para_lines.push(line.trim_end().to_string());
    }

    /// A blank line ends the current run but not the paragraph section;
    /// adjacent prose runs with no structural marker between them stay
    /// consolidated in one section.
    fn paragraph_break(&mut self) {
        if !self.para_lines.is_empty() {
            self.para_parts.push(self.para_lines.join("\n"));
            self.para_lines.clear();
        }
    }

    fn flush_paragraph(&mut self) {
        self.paragraph_break();
        if self.para_parts.is_empty() {
            return;
        }
        let text = self.para_parts.join("\n\n");
        self.para_parts.clear();
        self.emit(SectionKind::Paragraph, text);
    }

    fn push_list_line(&mut self, line: &str) {
        self.list_lines.push(line.trim_end().to_string());
    }

    fn flush_list(&mut self) {
        if self.list_lines.is_empty() {
            return;
        }
        let text = self.list_lines.join("\n");
        self.list_lines.clear();
        self.emit(SectionKind::List, text);
    }

    fn finish(self) -> ParsedPage {
        ParsedPage {
            trailing_breadcrumbs: self.crumbs.into_iter().map(|(_, t)| t).collect(),
            sections: self.sections,
        }
    }
}
