//! Shared data model for the HSP3 outline engine.
//!
//! This crate is standalone — it has no `hsp3_*` dependencies, so external
//! tools (editor bridges, formatters, symbol dumpers) can depend on the
//! model without pulling in the lexer or the parser.
//!
//! The model covers the three stages of the pipeline:
//!
//! - [`Point`] / [`Location`] / [`Token`] / [`TokenKind`] — the lexer's
//!   output: a gapless, position-tagged token stream.
//! - [`OutlineElement`] / [`OutlineKind`] / [`TokenRange`] — the grammar
//!   layer's output: flat, ordered structural elements with token-index
//!   ranges.
//! - [`SymbolNode`] / [`SymbolTree`] — the assembler's output: the grouped
//!   symbol tree handed to an editor's outline view.

pub mod element;
pub mod point;
pub mod symbol;
pub mod token;

pub use element::{OutlineElement, OutlineKind, TokenRange};
pub use point::{Location, Point};
pub use symbol::{SymbolNode, SymbolTree};
pub use token::{Token, TokenKind};
