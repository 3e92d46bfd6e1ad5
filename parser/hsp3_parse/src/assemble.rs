//! Folding the flat element list into the grouped symbol tree.
//!
//! A `module` element opens a grouping scope; a `global` element closes
//! it, extending the group's range to the closer. Everything recognized
//! in between becomes a child of the open group. Outside a group,
//! elements become top-level nodes unless they are masked or are one of
//! the kinds that cannot legally appear at top level.

use hsp3_ir::{
    Location, OutlineElement, OutlineKind, Point, SymbolNode, SymbolTree, Token, TokenRange,
};
use rustc_hash::FxHashSet;
use tracing::debug;

/// Kinds that cannot legally appear outside a module scope. A bare
/// `#global` or `#modfunc` at top level is dropped, never surfaced.
const INVALID_AT_TOP_LEVEL: [OutlineKind; 5] = [
    OutlineKind::Global,
    OutlineKind::ModInit,
    OutlineKind::ModTerm,
    OutlineKind::ModFunc,
    OutlineKind::ModCFunc,
];

/// Caller-supplied assembly configuration.
#[derive(Clone, Debug, Default)]
pub struct AssemblyPolicy {
    /// Element kinds to suppress from the tree entirely.
    pub masks: FxHashSet<OutlineKind>,
    /// What to do with a module group still open at end of input.
    ///
    /// `false` (the default) drops it, as the reference behavior always
    /// did. `true` emits it with its range extended to the last token
    /// before the sentinel.
    pub flush_open_group_at_eof: bool,
}

impl AssemblyPolicy {
    /// A policy masking the given kinds.
    pub fn masking(kinds: impl IntoIterator<Item = OutlineKind>) -> Self {
        AssemblyPolicy {
            masks: kinds.into_iter().collect(),
            flush_open_group_at_eof: false,
        }
    }
}

/// Resolve a token index to its begin point.
fn begin_of(tokens: &[Token<'_>], index: u32) -> Point {
    debug_assert!((index as usize) < tokens.len(), "token index out of range");
    tokens.get(index as usize).map_or(Point::ZERO, |t| t.location.begin)
}

/// Resolve a token index to its end point.
fn end_of(tokens: &[Token<'_>], index: u32) -> Point {
    debug_assert!((index as usize) < tokens.len(), "token index out of range");
    tokens.get(index as usize).map_or(Point::ZERO, |t| t.location.end)
}

/// Resolve a token-index range to a source location.
fn location_of(tokens: &[Token<'_>], range: TokenRange) -> Location {
    Location::new(begin_of(tokens, range.first), end_of(tokens, range.last))
}

/// Build a leaf node from an element.
fn node_from(tokens: &[Token<'_>], element: &OutlineElement) -> SymbolNode {
    SymbolNode::new(
        element.literal.clone(),
        element.kind,
        location_of(tokens, element.entire_range),
        location_of(tokens, element.literal_range),
    )
}

/// Fold the ordered element list into a symbol tree.
///
/// `tokens` must be the same stream the elements were parsed from; the
/// elements' token-index ranges are resolved against it.
pub fn assemble(
    tokens: &[Token<'_>],
    elements: &[OutlineElement],
    policy: &AssemblyPolicy,
) -> SymbolTree {
    let mut symbols = Vec::new();
    let mut group: Option<SymbolNode> = None;

    for element in elements {
        if group.is_some() {
            match element.kind {
                // `global` closes the scope: the group's range grows to
                // cover the closer, and the closer itself is not a node.
                OutlineKind::Global => {
                    if let Some(mut open) = group.take() {
                        open.range = open
                            .range
                            .until(end_of(tokens, element.literal_range.last));
                        symbols.push(open);
                    }
                }
                // Nested module declarations are not represented.
                OutlineKind::Module => {}
                kind if policy.masks.contains(&kind) => {}
                _ => {
                    if let Some(open) = group.as_mut() {
                        open.children.push(node_from(tokens, element));
                    }
                }
            }
        } else if element.kind == OutlineKind::Module {
            group = Some(node_from(tokens, element));
        } else if policy.masks.contains(&element.kind)
            || INVALID_AT_TOP_LEVEL.contains(&element.kind)
        {
            // Dropped: masked, or structurally invalid at top level.
        } else {
            symbols.push(node_from(tokens, element));
        }
    }

    if let Some(mut open) = group.take() {
        if policy.flush_open_group_at_eof {
            // Extend over everything up to the sentinel.
            if tokens.len() >= 2 {
                let last = end_of(tokens, u32::try_from(tokens.len() - 2).unwrap_or(u32::MAX));
                if last > open.range.end {
                    open.range = open.range.until(last);
                }
            }
            symbols.push(open);
        } else {
            debug!(module = %open.name, "dropping module group left open at end of input");
        }
    }

    SymbolTree { symbols }
}

#[cfg(test)]
mod tests {
    use super::{assemble, AssemblyPolicy};
    use crate::grammar::parse_elements;
    use hsp3_ir::{OutlineKind, Point, SymbolTree};
    use hsp3_lexer::tokenize;
    use pretty_assertions::assert_eq;

    fn tree(source: &str, policy: &AssemblyPolicy) -> SymbolTree {
        let tokens = tokenize(source);
        let elements = parse_elements(&tokens);
        assemble(&tokens, &elements, policy)
    }

    fn names(tree: &SymbolTree) -> Vec<(OutlineKind, String)> {
        tree.symbols
            .iter()
            .map(|n| (n.kind, n.name.clone()))
            .collect()
    }

    #[test]
    fn module_groups_its_members_and_global_closes() {
        let tree = tree(
            "#module foo\n#deffunc bar\n#global\n",
            &AssemblyPolicy::default(),
        );
        assert_eq!(names(&tree), vec![(OutlineKind::Module, "foo".to_string())]);
        let module = &tree.symbols[0];
        assert_eq!(module.children.len(), 1);
        assert_eq!(module.children[0].kind, OutlineKind::DefFunc);
        assert_eq!(module.children[0].name, "bar");
        // The range was extended to the `global` closer on row 2; the
        // closer itself is not a node anywhere in the tree.
        assert_eq!(module.range.begin, Point::new(0, 0));
        assert_eq!(module.range.end.row, 2);
        assert_eq!(tree.node_count(), 2);
    }

    #[test]
    fn standalone_deffunc_is_a_valid_top_level_node() {
        let tree = tree("#deffunc solo\n", &AssemblyPolicy::default());
        assert_eq!(names(&tree), vec![(OutlineKind::DefFunc, "solo".to_string())]);
    }

    #[test]
    fn bare_global_at_top_level_is_dropped() {
        let tree = tree("#global\n", &AssemblyPolicy::default());
        assert!(tree.is_empty());
    }

    #[test]
    fn mod_scoped_kinds_are_dropped_at_top_level() {
        let tree = tree(
            "#modinit\n#modterm\n#modfunc f\n#modcfunc g\n",
            &AssemblyPolicy::default(),
        );
        assert!(tree.is_empty());
    }

    #[test]
    fn mod_scoped_kinds_are_kept_inside_a_module() {
        let tree = tree(
            "#module m\n#modinit\n#modfunc f\n#global\n",
            &AssemblyPolicy::default(),
        );
        assert_eq!(tree.symbols.len(), 1);
        let kinds: Vec<_> = tree.symbols[0].children.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![OutlineKind::ModInit, OutlineKind::ModFunc]);
    }

    #[test]
    fn nested_module_declarations_are_skipped() {
        let tree = tree(
            "#module outer\n#module inner\n#deffunc f\n#global\n",
            &AssemblyPolicy::default(),
        );
        assert_eq!(names(&tree), vec![(OutlineKind::Module, "outer".to_string())]);
        assert_eq!(tree.symbols[0].children.len(), 1);
        assert_eq!(tree.symbols[0].children[0].name, "f");
    }

    #[test]
    fn masks_suppress_top_level_nodes() {
        let policy = AssemblyPolicy::masking([OutlineKind::Label]);
        let tree = tree("*start\n#define X 1\n", &policy);
        assert_eq!(names(&tree), vec![(OutlineKind::Define, "X".to_string())]);
    }

    #[test]
    fn masks_suppress_children_too() {
        let policy = AssemblyPolicy::masking([OutlineKind::Label]);
        let tree = tree("#module m\n*inner\n#deffunc f\n#global\n", &policy);
        assert_eq!(tree.symbols[0].children.len(), 1);
        assert_eq!(tree.symbols[0].children[0].kind, OutlineKind::DefFunc);
    }

    #[test]
    fn open_group_is_dropped_at_eof_by_default() {
        let tree = tree("#module m\n#deffunc f\n", &AssemblyPolicy::default());
        // No `#global` closer: the whole group vanishes, f included.
        assert!(tree.is_empty());
    }

    #[test]
    fn open_group_is_flushed_when_the_policy_says_so() {
        let policy = AssemblyPolicy {
            flush_open_group_at_eof: true,
            ..AssemblyPolicy::default()
        };
        let tree = tree("#module m\n#deffunc f int a\n", &policy);
        assert_eq!(names(&tree), vec![(OutlineKind::Module, "m".to_string())]);
        assert_eq!(tree.symbols[0].children.len(), 1);
        // Extended over the deffunc line.
        assert!(tree.symbols[0].range.end.row >= 1);
    }

    #[test]
    fn symbols_around_a_module_stay_ordered() {
        let tree = tree(
            "*boot\n#module m\n#deffunc f\n#global\n*shutdown\n",
            &AssemblyPolicy::default(),
        );
        assert_eq!(
            names(&tree),
            vec![
                (OutlineKind::Label, "*boot".to_string()),
                (OutlineKind::Module, "m".to_string()),
                (OutlineKind::Label, "*shutdown".to_string()),
            ]
        );
    }

    #[test]
    fn selection_range_covers_the_name() {
        let tree = tree("#deffunc handler int x\n", &AssemblyPolicy::default());
        let node = &tree.symbols[0];
        // tokens: # deffunc ' ' handler ...  -> name starts at column 9.
        assert_eq!(node.selection_range.begin, Point::new(0, 9));
        assert_eq!(node.selection_range.end, Point::new(0, 16));
        assert_eq!(node.range.begin, Point::new(0, 0));
    }

    #[test]
    fn empty_source_assembles_to_an_empty_tree() {
        let tree = tree("", &AssemblyPolicy::default());
        assert!(tree.is_empty());
    }
}
