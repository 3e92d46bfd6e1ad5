//! Tokens produced by the lexer.
//!
//! A token borrows its raw text from the source buffer — the lexer is
//! zero-copy. The concatenation of every token's `raw`, in stream order,
//! reconstructs the input exactly; the one exception is the final
//! [`TokenKind::Eof`] sentinel, whose raw text is empty.

use crate::point::Location;
use std::fmt;

/// Classification of a single token.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    /// End-of-input sentinel. Exactly one per stream, always last,
    /// empty raw text.
    Eof,
    /// A run of one whitespace character class (space, tab, or the
    /// full-width space U+3000). Mixed runs split into one token per
    /// class.
    Space,
    /// `\n`, `\r`, or `\r\n` — always a single token.
    Newline,
    /// `;` / `//` line comment, or a `/* ... */` block comment which may
    /// span lines.
    Comment,
    /// One operator from the fixed punctuation set, greedily including
    /// the two-character forms (`==`, `+=`, `<<`, ...).
    Operator,
    /// One of `[](){}`.
    Bracket,
    /// Integer literal: decimal, `$`/`0x` hex, `%`/`0b` binary, or a
    /// single-quoted character literal.
    Int,
    /// Floating literal (decimal point, exponent, or trailing `f`).
    Double,
    /// The directive marker `#`.
    Sharp,
    /// `"..."` or `{"..."}` string literal; the latter may span lines.
    Str,
    /// Identifier-ish run: anything that is not punctuation, whitespace,
    /// or a leading digit. Unicode letters, symbols, and emoji qualify.
    Literal,
    /// A single character no other recognizer claimed. Guarantees the
    /// lexer always makes forward progress.
    Other,
}

impl TokenKind {
    /// Stable lowercase name, used by dumps and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            TokenKind::Eof => "eof",
            TokenKind::Space => "space",
            TokenKind::Newline => "newline",
            TokenKind::Comment => "comment",
            TokenKind::Operator => "operator",
            TokenKind::Bracket => "bracket",
            TokenKind::Int => "int",
            TokenKind::Double => "double",
            TokenKind::Sharp => "sharp",
            TokenKind::Str => "string",
            TokenKind::Literal => "literal",
            TokenKind::Other => "other",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single token: kind, raw text slice, and source location.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Token<'src> {
    pub kind: TokenKind,
    /// The exact source text of the token. Empty only for the sentinel.
    pub raw: &'src str,
    pub location: Location,
}

impl<'src> Token<'src> {
    /// Create a new token.
    #[inline]
    pub const fn new(kind: TokenKind, raw: &'src str, location: Location) -> Self {
        Token {
            kind,
            raw,
            location,
        }
    }

    /// Kind check.
    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Kind + exact raw text check.
    #[inline]
    pub fn is_raw(&self, kind: TokenKind, raw: &str) -> bool {
        self.kind == kind && self.raw == raw
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {:?}", self.location, self.kind, self.raw)
    }
}
