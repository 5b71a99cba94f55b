//! Transient section hierarchy built during one document's conversion.
//!
//! While the renderer walks a document it records every addressable
//! section here. After the walk, the tree decides the output shape: a
//! root with children means the document becomes a map referencing one
//! topic per section; an empty or single-node tree means the document
//! stays a single self-contained topic.
//!
//! Nodes live in an arena `Vec`; parent links are indices used for
//! cursor navigation only, never for ownership.

/// One section visited during traversal.
#[derive(Debug)]
pub struct VisitedSection {
    /// The collision-free identifier allocated for this section.
    pub id: String,
    pub title: Option<String>,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Arena-backed section hierarchy with a traversal cursor.
///
/// The first section entered becomes the root. Later sections attach as
/// children of the cursor; leaving a section moves the cursor back to
/// its parent, or keeps it at the root when there is none.
#[derive(Debug, Default)]
pub struct SectionTree {
    nodes: Vec<VisitedSection>,
    cursor: Option<usize>,
}

impl SectionTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Index of the root section, if any section was visited.
    pub fn root_index(&self) -> Option<usize> {
        if self.nodes.is_empty() { None } else { Some(0) }
    }

    /// Whether the root exists and has at least one child — the
    /// condition under which the document is decomposed into a map.
    pub fn root_has_children(&self) -> bool {
        self.root_index()
            .is_some_and(|root| !self.nodes[root].children.is_empty())
    }

    pub fn node(&self, index: usize) -> &VisitedSection {
        &self.nodes[index]
    }

    pub fn children(&self, index: usize) -> &[usize] {
        &self.nodes[index].children
    }

    /// Record entry into an addressable section and move the cursor to it.
    pub fn enter(&mut self, id: String, title: Option<String>) {
        let parent = self.cursor;
        let index = self.nodes.len();
        self.nodes.push(VisitedSection {
            id,
            title,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent].children.push(index);
        }
        self.cursor = Some(index);
    }

    /// Record leaving the current section: the cursor moves to its
    /// parent, or stays at the root when leaving the root itself.
    pub fn leave(&mut self) {
        if let Some(current) = self.cursor {
            self.cursor = self.nodes[current].parent.or(Some(current));
        }
    }
}
