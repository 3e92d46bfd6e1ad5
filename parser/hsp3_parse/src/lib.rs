//! HSP3 grammar layer and outline assembler.
//!
//! This crate turns the lexer's token stream into the symbol tree an
//! editor outline consumes:
//!
//! ```text
//! &str ── hsp3_lexer ──> [Token] ── grammar ──> [OutlineElement] ── assemble ──> SymbolTree
//! ```
//!
//! [`parse_elements`] recognizes the directive and label shapes
//! (`#module`, `#deffunc`, `#define`, `*label`, ...) and never fails —
//! unrecognized input degrades to statement noise, so a broken script
//! still yields the symbols that *are* recognizable. [`assemble`] folds
//! the flat element list into module groups, applying the caller's
//! [`AssemblyPolicy`]. [`outline`] is the end-to-end convenience.
//!
//! Everything here is synchronous, allocation-light, and free of shared
//! state; parses of different buffers may run concurrently without
//! synchronization.

mod assemble;
mod grammar;

pub use assemble::{assemble, AssemblyPolicy};
pub use grammar::parse_elements;

use hsp3_ir::SymbolTree;
use tracing::debug_span;

/// Tokenize, parse, and assemble a full document.
pub fn outline(source: &str, policy: &AssemblyPolicy) -> SymbolTree {
    let span = debug_span!("outline", bytes = source.len());
    let _guard = span.enter();
    let tokens = hsp3_lexer::tokenize(source);
    let elements = parse_elements(&tokens);
    assemble(&tokens, &elements, policy)
}
