//! Batch conversion: the shared output aggregator and the two-pass driver.
//!
//! Cross-references must decide at render time whether their target is a
//! map or a plain topic, and on a first pass the target document may not
//! have been converted yet. The driver therefore runs the whole input
//! set through conversion twice against one shared [`Aggregator`]: after
//! pass one every document's map/topic name is known, and pass two's
//! last-write-wins output is authoritative. This is a fixed two-round
//! scheme, not a fixpoint iteration — a document's own file names never
//! depend on its cross-references, so one round of complete knowledge is
//! enough.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use crate::ast::DocumentTree;
use crate::dita::{self, RenderOptions};
use crate::error::{Error, Result};

/// Registry of rendered output files and referenced resources, shared
/// across every document and both passes of one batch.
///
/// Writes are keyed by output file name; a later write with the same key
/// overwrites the earlier one, which is what makes the second pass
/// authoritative. Values are only ever replaced whole, never patched.
#[derive(Debug, Default)]
pub struct Aggregator {
    documents: BTreeMap<String, String>,
    resources: BTreeSet<String>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store rendered content under an output file name, replacing any
    /// earlier pass's rendering.
    pub fn put(&mut self, name: impl Into<String>, content: String) {
        self.documents.insert(name.into(), content);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.documents.get(name).map(String::as_str)
    }

    /// Existence check used for cross-document reference resolution.
    pub fn exists(&self, name: &str) -> bool {
        self.documents.contains_key(name)
    }

    /// Record a binary resource (image path) referenced by the output.
    pub fn add_resource(&mut self, path: impl Into<String>) {
        self.resources.insert(path.into());
    }

    /// Rendered output files in deterministic (name) order.
    pub fn documents(&self) -> impl Iterator<Item = (&str, &str)> {
        self.documents
            .iter()
            .map(|(name, content)| (name.as_str(), content.as_str()))
    }

    /// Referenced resource paths in deterministic order.
    pub fn resources(&self) -> impl Iterator<Item = &str> {
        self.resources.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Write every rendered document into `dir`, creating it if needed.
    pub fn write_to(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        for (name, content) in &self.documents {
            fs::write(dir.join(name), content)?;
        }
        Ok(())
    }
}

/// One input document paired with the file stem its outputs are named
/// after (the source file's base name, when known).
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub tree: DocumentTree,
    pub stem: Option<String>,
}

impl SourceDocument {
    pub fn new(tree: DocumentTree) -> Self {
        Self { tree, stem: None }
    }

    pub fn with_stem(tree: DocumentTree, stem: impl Into<String>) -> Self {
        Self {
            tree,
            stem: Some(stem.into()),
        }
    }

    /// Name used when reporting a conversion failure for this input.
    fn display_name(&self) -> String {
        self.stem
            .clone()
            .or_else(|| self.tree.title.clone())
            .unwrap_or_else(|| "<untitled>".to_string())
    }
}

/// Runs a document set through conversion twice against a shared
/// aggregator.
#[derive(Debug, Default)]
pub struct BatchConverter {
    aggregator: Aggregator,
    options: RenderOptions,
}

impl BatchConverter {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            aggregator: Aggregator::new(),
            options,
        }
    }

    /// Convert every document, twice, in input order.
    ///
    /// A failure aborts the batch immediately — in particular a pass-one
    /// failure prevents pass two from running against a partially
    /// populated aggregator. The error names the offending input.
    pub fn run(&mut self, documents: &[SourceDocument]) -> Result<()> {
        for _pass in 0..2 {
            for document in documents {
                self.convert_one(document).map_err(|e| Error::Document {
                    name: document.display_name(),
                    source: Box::new(e),
                })?;
            }
        }
        Ok(())
    }

    /// Convert a single document with fresh per-document state.
    ///
    /// A document decomposed into a map already persisted everything it
    /// produces; a flat document's rendered root is persisted here under
    /// the document's own topic name.
    fn convert_one(&mut self, document: &SourceDocument) -> Result<()> {
        let conversion = dita::convert_document(
            &mut self.aggregator,
            &document.tree,
            document.stem.as_deref(),
            &self.options,
        )?;
        if conversion.map_key.is_none() {
            let name = document.stem.as_deref().unwrap_or(&conversion.id);
            self.aggregator.put(format!("c-{name}.dita"), conversion.content);
        }
        Ok(())
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    pub fn into_aggregator(self) -> Aggregator {
        self.aggregator
    }
}
