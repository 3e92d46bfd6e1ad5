//! The grouped symbol tree produced by the outline assembler.
//!
//! The tree maps directly onto an editor's document-symbol shape: each
//! node exposes a display name, a kind tag, the full range of the
//! construct, the selection range of its significant name, and ordered
//! children. Which icon a kind gets, and what clicking a node does, are
//! the host editor's concern, not this crate's.

use crate::element::OutlineKind;
use crate::point::Location;

/// One node of the outline tree.
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolNode {
    /// Display text — the element's literal.
    pub name: String,
    pub kind: OutlineKind,
    /// Full extent of the construct, module body included.
    pub range: Location,
    /// Extent of just the significant name.
    pub selection_range: Location,
    /// Nested symbols, in source order. Only module nodes have children.
    pub children: Vec<SymbolNode>,
}

impl SymbolNode {
    /// Create a leaf node.
    pub fn new(
        name: impl Into<String>,
        kind: OutlineKind,
        range: Location,
        selection_range: Location,
    ) -> Self {
        SymbolNode {
            name: name.into(),
            kind,
            range,
            selection_range,
            children: Vec::new(),
        }
    }
}

/// An ordered forest of top-level symbols.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolTree {
    pub symbols: Vec<SymbolNode>,
}

impl SymbolTree {
    /// Total number of nodes, children included.
    pub fn node_count(&self) -> usize {
        fn count(nodes: &[SymbolNode]) -> usize {
            nodes.len() + nodes.iter().map(|n| count(&n.children)).sum::<usize>()
        }
        count(&self.symbols)
    }

    /// Returns `true` if the tree has no symbols at all.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::{Location, Point};
    use pretty_assertions::assert_eq;

    fn loc(row: u32) -> Location {
        Location::columns(Point::new(row, 0), 5)
    }

    #[test]
    fn node_count_includes_children() {
        let mut module = SymbolNode::new("mod", OutlineKind::Module, loc(0), loc(0));
        module
            .children
            .push(SymbolNode::new("f", OutlineKind::DefFunc, loc(1), loc(1)));
        module
            .children
            .push(SymbolNode::new("g", OutlineKind::DefFunc, loc(2), loc(2)));
        let tree = SymbolTree {
            symbols: vec![
                module,
                SymbolNode::new("*start", OutlineKind::Label, loc(4), loc(4)),
            ],
        };
        assert_eq!(tree.node_count(), 4);
        assert!(!tree.is_empty());
    }

    #[test]
    fn empty_tree() {
        let tree = SymbolTree::default();
        assert_eq!(tree.node_count(), 0);
        assert!(tree.is_empty());
    }
}
