//! The parsed document tree consumed by the converter.
//!
//! These types are the input contract: an external parser produces one
//! [`DocumentTree`] per source file, and the converter reads it without
//! ever mutating it. The shape mirrors what structural markup parsers
//! (AsciiDoc, reStructuredText, ...) emit — a titled root, nested
//! sections, block-level content, and inline spans inside paragraphs.
//!
//! With the `cli` feature enabled every type round-trips through serde,
//! so trees can be handed to the converter as JSON files.

/// One parsed input document: a titled root with an ordered block sequence.
///
/// Owned exclusively by one conversion call and read-only throughout it.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
pub struct DocumentTree {
    /// Document title, if the source declared one.
    #[cfg_attr(feature = "cli", serde(default))]
    pub title: Option<String>,
    /// Explicit identifier from the source, if any.
    #[cfg_attr(feature = "cli", serde(default))]
    pub id: Option<String>,
    /// Top-level blocks and sections in source order.
    #[cfg_attr(feature = "cli", serde(default))]
    pub blocks: Vec<Block>,
}

impl DocumentTree {
    /// Create an empty document with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            id: None,
            blocks: Vec::new(),
        }
    }
}

/// A section: a heading with its content and sub-sections.
///
/// Nesting depth is implicit from tree position; there is no level field.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
pub struct Section {
    #[cfg_attr(feature = "cli", serde(default))]
    pub title: Option<String>,
    #[cfg_attr(feature = "cli", serde(default))]
    pub id: Option<String>,
    #[cfg_attr(feature = "cli", serde(default))]
    pub blocks: Vec<Block>,
}

/// A block-level node.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "cli", serde(tag = "type", rename_all = "snake_case"))]
pub enum Block {
    /// A heading-delimited section, possibly containing sub-sections.
    Section(Section),
    /// Verbatim source listing.
    Listing { text: String },
    /// A paragraph of inline spans. Parsers sometimes emit compound
    /// paragraphs carrying nested blocks instead of spans; those render
    /// as their children with no paragraph wrapper.
    Paragraph {
        #[cfg_attr(feature = "cli", serde(default))]
        spans: Vec<Inline>,
        #[cfg_attr(feature = "cli", serde(default))]
        blocks: Vec<Block>,
    },
    /// Content before the first section heading.
    Preamble {
        #[cfg_attr(feature = "cli", serde(default))]
        blocks: Vec<Block>,
    },
    /// An image reference. The target path is required by the DITA rule;
    /// a missing path is a conversion error.
    Image {
        #[cfg_attr(feature = "cli", serde(default))]
        alt: Option<String>,
        #[cfg_attr(feature = "cli", serde(default))]
        path: Option<String>,
        #[cfg_attr(feature = "cli", serde(default))]
        id: Option<String>,
    },
    /// An admonition (note/tip/warning/...) with its label and text.
    Admonition { label: String, text: String },
    /// Raw content passed through untouched.
    Passthrough { text: String },
    /// A block quote.
    Quote {
        #[cfg_attr(feature = "cli", serde(default))]
        blocks: Vec<Block>,
    },
    List(ListNode),
    DescriptionList(DescriptionListNode),
    Table(TableNode),
    /// A block kind the parser adapter recognized but the converter has
    /// no rendering rule for. Always fails conversion with the offending
    /// kind string.
    Unknown { context: String },
}

/// An inline span inside a paragraph.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "cli", serde(tag = "type", rename_all = "snake_case"))]
pub enum Inline {
    /// Plain text, passed through with escaping only.
    Line { text: String },
    Monospaced { text: String },
    Strong { text: String },
    Emphasis { text: String },
    /// Reference to another document in the batch, with an optional
    /// anchor inside it. Resolution happens at render time against the
    /// shared aggregator.
    CrossReference {
        target: String,
        #[cfg_attr(feature = "cli", serde(default))]
        anchor: Option<String>,
        text: String,
    },
    /// Link to an external URL.
    ExternalLink { url: String },
    /// A source callout marker. Rendered empty; the surrounding list
    /// carries the callout content instead.
    Callout { text: String },
}

/// An ordered or unordered list; items carry display text only.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
pub struct ListNode {
    #[cfg_attr(feature = "cli", serde(default))]
    pub items: Vec<String>,
}

/// A description list of term/description entries.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
pub struct DescriptionListNode {
    #[cfg_attr(feature = "cli", serde(default))]
    pub items: Vec<DescriptionEntry>,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
pub struct DescriptionEntry {
    #[cfg_attr(feature = "cli", serde(default))]
    pub terms: Vec<String>,
    pub description: String,
}

/// A table with header, body, and footer row groups.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
pub struct TableNode {
    #[cfg_attr(feature = "cli", serde(default))]
    pub header: Vec<Row>,
    #[cfg_attr(feature = "cli", serde(default))]
    pub body: Vec<Row>,
    #[cfg_attr(feature = "cli", serde(default))]
    pub footer: Vec<Row>,
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
pub struct Row {
    #[cfg_attr(feature = "cli", serde(default))]
    pub cells: Vec<Cell>,
}

/// A table cell: literal text, or a whole embedded document when the
/// source marked the cell as containing markup. Embedded documents
/// recurse through the converter in table mode.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "cli", serde(tag = "type", rename_all = "snake_case"))]
pub enum Cell {
    Text { text: String },
    Document(DocumentTree),
}
