//! Total, position-accurate tokenizer for HSP3 source text.
//!
//! [`tokenize`] converts a character sequence into an ordered,
//! position-tagged token sequence. It is total and non-failing: every
//! input — the empty string, malformed quotes, unterminated comments —
//! produces a well-formed stream terminated by exactly one
//! [`TokenKind::Eof`](hsp3_ir::TokenKind::Eof) sentinel.
//!
//! # Guarantees
//!
//! - **Losslessness**: concatenating every token's raw text, in order,
//!   reconstructs the input exactly (the sentinel's raw text is empty).
//! - **Gaplessness**: each token's end position equals the next token's
//!   begin position; rows and columns are zero-based, columns counted in
//!   Unicode scalar values.
//! - **Termination**: every recognizer consumes at least one character
//!   (unclaimed characters become single-character `Other` tokens), so
//!   the scan strictly advances.
//!
//! The tokenizer has no shared state; arbitrarily many calls may run
//! concurrently across threads.

mod scanner;
mod source;

pub use source::{Cursor, SourceText};

use hsp3_ir::{Token, TokenKind};
use scanner::Scanner;

/// Tokenize a full source text.
///
/// The returned stream always ends with exactly one `Eof` sentinel.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let source = SourceText::new(text);
    let mut scanner = Scanner::new(source.cursor());
    let mut tokens = Vec::new();
    loop {
        let token = scanner.next_token();
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}
