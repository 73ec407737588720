use std::collections::HashMap;

use crate::style::cascade::StyleAttrs;

/// One registered definition: the defining element plus the style cascade
/// captured at the moment it was registered.
#[derive(Clone, Copy, Debug)]
pub struct Definition {
    /// The defining element, by document node id.
    pub node_id: roxmltree::NodeId,
    /// Cascaded (still partial) style at definition time.
    pub style: StyleAttrs,
}

/// Id-keyed lookup of elements declared under `<defs>` for reuse via
/// `<use>`.
///
/// Lives for exactly one document walk. Registration is post-order, so a
/// `<use>` can only resolve ids whose subtree the walk has already left;
/// forward references miss.
#[derive(Debug, Default)]
pub struct DefinitionRegistry {
    entries: HashMap<String, Definition>,
}

impl DefinitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `id`. A later registration under the same id replaces the
    /// earlier one.
    pub fn register(&mut self, id: &str, node_id: roxmltree::NodeId, style: StyleAttrs) {
        self.entries
            .insert(id.to_owned(), Definition { node_id, style });
    }

    /// Looks up a reference target, `None` when `id` was never registered.
    pub fn resolve(&self, id: &str) -> Option<Definition> {
        self.entries.get(id).copied()
    }

    /// Number of registered definitions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/registry.rs"]
mod tests;
