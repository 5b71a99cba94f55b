//! # ditagen
//!
//! Converts parsed document trees (headings, paragraphs, lists, tables,
//! inline markup) into DITA concept topics and DITA maps, across a batch
//! of related documents that may cross-reference each other.
//!
//! Parsing the source markup is out of scope: an external parser hands
//! the converter read-only [`DocumentTree`] values. The converter
//! decides, per document, whether the content stays one self-contained
//! topic or is decomposed into independently addressable topic files
//! plus a map linking them, allocates collision-free identifiers for
//! every addressable node, and resolves cross-document references with a
//! two-pass batch strategy.
//!
//! ## Quick Start
//!
//! ```
//! use ditagen::ast::{Block, DocumentTree, Inline};
//! use ditagen::batch::{BatchConverter, SourceDocument};
//! use ditagen::dita::RenderOptions;
//!
//! let mut tree = DocumentTree::new("Guide");
//! tree.blocks.push(Block::Paragraph {
//!     spans: vec![Inline::Line { text: "hello".into() }],
//!     blocks: vec![],
//! });
//!
//! let mut batch = BatchConverter::new(RenderOptions::default());
//! batch.run(&[SourceDocument::with_stem(tree, "guide")]).unwrap();
//! assert!(batch.aggregator().exists("c-guide.dita"));
//! ```

pub mod ast;
pub mod batch;
pub mod dita;
pub mod error;
pub mod format;

pub use ast::DocumentTree;
pub use batch::{Aggregator, BatchConverter, SourceDocument};
pub use dita::{Conversion, RenderOptions, convert_document};
pub use error::{Error, Result};
