//! Document tree → DITA rendering.
//!
//! This module holds the conversion engine proper. The design separates
//! pure string transformation from batch orchestration:
//!
//! - [`escape`]: idempotent XML escaping, output sanitization, id slugs
//! - [`id`]: per-document collision-free identifier allocation
//! - [`section_tree`]: the transient section hierarchy built during one
//!   document's traversal, used to decide map-vs-topic output shape
//! - [`render`]: the recursive dispatcher that turns one tree into a
//!   concept topic, per-section topics, and (when sections nest) a map
//!
//! The batch layer ([`crate::batch`]) owns the shared aggregator and runs
//! the two conversion passes; everything here operates on one document.

mod escape;
mod id;
mod render;
mod section_tree;

pub use escape::{escape_xml, sanitize, slug};
pub use id::IdRegistry;
pub use render::{Conversion, RenderMode, RenderOptions, convert_document};
pub use section_tree::{SectionTree, VisitedSection};
