//! Generic backtracking parser-combinator algebra.
//!
//! A small set of primitives — [`satisfy`], [`sequence`], [`choice`],
//! [`option`], [`negation`], [`repetition`], [`map`], [`reshape`],
//! [`lookahead`] — operating over any ordered input sequence. This crate
//! knows nothing about tokens or HSP3; the grammar layer instantiates it
//! over the lexer's token stream, and the test suites instantiate it over
//! plain characters.
//!
//! # Design
//!
//! - **State is the `(input, position)` pair.** [`Input`] is `Copy`;
//!   every parser is a pure function from an input position to a
//!   [`Parsed`] value, and backtracking is just reusing the old copy.
//! - **Failure is a value.** [`Failure`] carries a rule name, a message,
//!   a diagnostic [`Trace`] trail of child attempts, and optionally the
//!   payload of a caught panic. `choice`, `repetition`, `option`, and
//!   `negation` consume failures as ordinary control-flow signals; a
//!   failure only behaves like an error if a caller surfaces one.
//! - **Names are assigned, never inferred.** Each combinator stamps its
//!   `&'static str` name onto the results it produces.
//! - **Callbacks cannot crash the parse.** User code passed to
//!   `satisfy`/`take_if`/`map`/`reshape` runs under `catch_unwind`; a
//!   panic becomes a failure with the payload as `cause`.
//!
//! # Termination
//!
//! [`repetition`] treats a successful sub-parse that consumed no input as
//! a terminating condition, so zero-width matchers cannot loop forever.
//! Everything else consumes input monotonically or is explicitly
//! non-consuming (`option` on failure, `negation`, `lookahead`).

mod combinator;
mod input;
mod result;

pub use combinator::{
    choice, lookahead, many, many1, map, negation, option, repetition, reshape, satisfy,
    sequence, take_if, Parser,
};
pub use input::Input;
pub use result::{Failure, Parsed, Success, Trace, TraceOutcome};
