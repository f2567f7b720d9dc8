use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique chunk identifier.
pub type ChunkId = Uuid;

/// One page of a paginated document, as delivered by the upstream extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInput {
    /// 1-based page number.
    pub page_number: u32,
    /// Raw markdown/OCR text of the page.
    pub raw_text: String,
    /// Ancestor header titles active at the top of the page. May be empty
    /// when the page starts a new top-level section (or the extractor does
    /// not track headings).
    #[serde(default)]
    pub breadcrumb_context: Vec<String>,
}

/// The kind of a parsed section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Header { level: u8 },
    Paragraph,
    List,
    Table,
    Image,
    Code,
}

impl SectionKind {
    /// Protected kinds are emitted atomically and never combined with prose.
    pub fn is_protected(&self) -> bool {
        matches!(self, SectionKind::Table | SectionKind::Image | SectionKind::Code)
    }
}

/// A typed unit of document content produced by the semantic parser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub kind: SectionKind,
    pub text: String,
    /// Ancestor header trail at this point in the document.
    pub breadcrumbs: Vec<String>,
    /// True when the section originated from a protected-block range.
    /// Invariant: a protected section is never subdivided by a later stage.
    pub protected: bool,
    pub page_number: u32,
}

impl Section {
    /// Character count of the section text (Unicode scalars, not bytes).
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// The kind of a finished chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkKind {
    Text,
    Table,
    Image,
    Code,
    /// Should not occur given the flush-before-protected rule; kept so the
    /// kind derivation stays total.
    Mixed,
}

impl ChunkKind {
    /// Stable label used in statistics and serialized output.
    pub fn label(&self) -> &'static str {
        match self {
            ChunkKind::Text => "text",
            ChunkKind::Table => "table",
            ChunkKind::Image => "image",
            ChunkKind::Code => "code",
            ChunkKind::Mixed => "mixed",
        }
    }
}

/// Provenance and sizing metadata attached to every chunk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Trail of the first contributing section (most specific context at
    /// chunk start).
    pub breadcrumbs: Vec<String>,
    pub kind: ChunkKind,
    /// Unicode scalar count of `content`.
    pub char_count: usize,
    pub num_sections: usize,
    /// Min and max page contributing to this chunk.
    pub page_range: (u32, u32),
    pub is_merged: bool,
    /// Set only on chunks produced by the page merger.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merged_from_pages: Option<(u32, u32)>,
}

/// The bounded unit handed downstream for embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub id: ChunkId,
    pub content: String,
    pub metadata: ChunkMetadata,
}

/// Separator inserted between section texts inside one chunk body.
pub const SECTION_SEPARATOR: &str = "\n\n";

impl Chunk {
    /// Build a chunk from one or more ordered sections.
    ///
    /// Shared construction path for the chunking engine and the page merger:
    /// section texts are joined with [`SECTION_SEPARATOR`], breadcrumbs come
    /// from the first section, and the kind is `Text` when every section is
    /// prose, the protected kind for a lone protected section, and `Mixed`
    /// otherwise.
    ///
    /// # Panics
    ///
    /// Panics if `sections` is empty; callers flush only non-empty buffers.
    pub fn from_sections(sections: &[Section]) -> Chunk {
        assert!(!sections.is_empty(), "chunk requires at least one section");

        let content = sections
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(SECTION_SEPARATOR);

        let first = &sections[0];
        let page_min = sections.iter().map(|s| s.page_number).min().unwrap_or(0);
        let page_max = sections.iter().map(|s| s.page_number).max().unwrap_or(0);

        let metadata = ChunkMetadata {
            breadcrumbs: first.breadcrumbs.clone(),
            kind: derive_kind(sections),
            char_count: content.chars().count(),
            num_sections: sections.len(),
            page_range: (page_min, page_max),
            is_merged: false,
            merged_from_pages: None,
        };

        Chunk {
            id: Uuid::new_v4(),
            content,
            metadata,
        }
    }

    /// True for plain prose chunks (the only kind eligible for merging).
    pub fn is_text(&self) -> bool {
        self.metadata.kind == ChunkKind::Text
    }
}

fn derive_kind(sections: &[Section]) -> ChunkKind {
    let all_prose = sections.iter().all(|s| !s.kind.is_protected());
    if all_prose {
        return ChunkKind::Text;
    }
    if sections.len() == 1 {
        return match sections[0].kind {
            SectionKind::Table => ChunkKind::Table,
            SectionKind::Image => ChunkKind::Image,
            SectionKind::Code => ChunkKind::Code,
            _ => ChunkKind::Text,
        };
    }
    ChunkKind::Mixed
}
