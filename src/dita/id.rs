//! Per-document identifier allocation.

use std::collections::HashSet;

use super::escape::slug;

/// Registry of identifiers allocated during one document's conversion.
///
/// Identifiers are unique within a single document, not across documents:
/// the registry is cleared when a new document root is entered, and every
/// conversion pass starts from an empty set.
#[derive(Debug, Default)]
pub struct IdRegistry {
    ids: HashSet<String>,
}

impl IdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every allocated identifier. Called at document entry.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Allocate a collision-free identifier for a node.
    ///
    /// The base is the node's explicit identifier when present, otherwise
    /// a slug of its title. A node with neither cannot be addressed and
    /// gets `None`. Collisions resolve by appending an incrementing
    /// suffix to the base until the candidate is unused, so two sibling
    /// "Overview" sections allocate `Overview` and `Overview1`.
    pub fn allocate(&mut self, explicit: Option<&str>, title: Option<&str>) -> Option<String> {
        let base = explicit.map(str::to_string).or_else(|| title.map(slug))?;
        let mut candidate = base.clone();
        let mut suffix = 1;
        while !self.ids.insert(candidate.clone()) {
            candidate = format!("{base}{suffix}");
            suffix += 1;
        }
        Some(candidate)
    }
}
