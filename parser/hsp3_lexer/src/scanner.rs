//! Hand-written scanner producing position-tagged tokens.
//!
//! One recognizer per token family, tried in a fixed order at each cursor
//! position (first match wins, no backtracking across recognizers):
//! newline, directive marker, comment, whitespace, string, number,
//! operator, bracket, identifier, and a single-character "other" fallback
//! that guarantees forward progress. There is no failure mode — every
//! input produces a well-formed token stream.

use crate::source::Cursor;
use hsp3_ir::{Location, Point, Token, TokenKind};

/// Single-pass scanner over a char cursor, with an explicit row/column
/// accumulator updated by each recognized token.
pub(crate) struct Scanner<'a, 'src> {
    cursor: Cursor<'a, 'src>,
    point: Point,
}

impl<'a, 'src> Scanner<'a, 'src> {
    pub(crate) fn new(cursor: Cursor<'a, 'src>) -> Self {
        Scanner {
            cursor,
            point: Point::ZERO,
        }
    }

    /// Produce the next token.
    ///
    /// Returns the [`TokenKind::Eof`] sentinel once the source is
    /// exhausted; calling again after that keeps returning sentinels.
    pub(crate) fn next_token(&mut self) -> Token<'src> {
        let Some(ch) = self.cursor.current() else {
            return self.eof();
        };
        match ch {
            '\n' | '\r' => self.newline(),
            '#' => self.sharp(),
            ';' => self.line_comment(),
            '/' if self.cursor.peek() == Some('/') => self.line_comment(),
            '/' if self.cursor.peek() == Some('*') => self.block_comment(),
            ' ' | '\t' | '\u{3000}' => self.whitespace(ch),
            '"' => self.plain_string(),
            '{' if self.cursor.peek() == Some('"') => self.brace_string(),
            '\'' => self.char_literal(),
            '$' => self.hex_number(),
            '%' => self.bin_number(),
            '0' if matches!(self.cursor.peek(), Some('x' | 'X')) => self.hex_number(),
            '0' if matches!(self.cursor.peek(), Some('b' | 'B')) => self.bin_number(),
            '0'..='9' => self.decimal_number(),
            _ if is_operator_char(ch) => self.operator(ch),
            '[' | ']' | '(' | ')' | '{' | '}' => self.single(TokenKind::Bracket),
            _ if is_ident_start(ch) => self.ident(),
            _ => self.single(TokenKind::Other),
        }
    }

    /// Finish a token whose characters have all been consumed: slice the
    /// raw text, derive the end point, and move the accumulator forward.
    fn finish(&mut self, kind: TokenKind, start: u32, begin: Point) -> Token<'src> {
        let raw = self.cursor.slice(start, self.cursor.pos());
        let end = begin.advanced_by(raw);
        self.point = end;
        Token::new(kind, raw, Location::new(begin, end))
    }

    // ─── Sentinel ───────────────────────────────────────────────────────

    fn eof(&mut self) -> Token<'src> {
        // One column wide with empty raw text; nothing follows the
        // sentinel, so gaplessness is unaffected.
        Token::new(
            TokenKind::Eof,
            "",
            Location::columns(self.point, 1),
        )
    }

    // ─── Newlines & the directive marker ────────────────────────────────

    fn newline(&mut self) -> Token<'src> {
        let start = self.cursor.pos();
        let begin = self.point;
        if self.cursor.current() == Some('\r') {
            self.cursor.advance();
            // CRLF is a single newline token.
            if self.cursor.current() == Some('\n') {
                self.cursor.advance();
            }
        } else {
            self.cursor.advance();
        }
        self.finish(TokenKind::Newline, start, begin)
    }

    fn sharp(&mut self) -> Token<'src> {
        self.single(TokenKind::Sharp)
    }

    /// One-character token of the given kind. Also the "other" fallback,
    /// which is what guarantees the scanner always advances.
    fn single(&mut self, kind: TokenKind) -> Token<'src> {
        let start = self.cursor.pos();
        let begin = self.point;
        self.cursor.advance();
        self.finish(kind, start, begin)
    }

    // ─── Comments ───────────────────────────────────────────────────────

    /// `;` or `//` to end of line. The newline itself is not part of the
    /// comment.
    fn line_comment(&mut self) -> Token<'src> {
        let start = self.cursor.pos();
        let begin = self.point;
        self.cursor.advance(); // ';' or the first '/'
        if self.cursor.prev() == Some('/') {
            self.cursor.advance(); // the second '/'
        }
        while let Some(ch) = self.cursor.current() {
            if ch == '\n' || ch == '\r' {
                break;
            }
            self.cursor.advance();
        }
        self.finish(TokenKind::Comment, start, begin)
    }

    /// `/* ... */`, possibly spanning lines. An unterminated comment runs
    /// to end of input.
    fn block_comment(&mut self) -> Token<'src> {
        let start = self.cursor.pos();
        let begin = self.point;
        self.cursor.advance();
        self.cursor.advance();
        while self.cursor.current().is_some() {
            if self.cursor.prev() == Some('*') && self.cursor.current() == Some('/') {
                break;
            }
            self.cursor.advance();
        }
        self.cursor.advance(); // past the closing '/'
        self.finish(TokenKind::Comment, start, begin)
    }

    // ─── Whitespace ─────────────────────────────────────────────────────

    /// A run of the single whitespace character that opened it. `"  \t"`
    /// is two tokens, not one.
    fn whitespace(&mut self, which: char) -> Token<'src> {
        let start = self.cursor.pos();
        let begin = self.point;
        while self.cursor.current() == Some(which) {
            self.cursor.advance();
        }
        self.finish(TokenKind::Space, start, begin)
    }

    // ─── Strings ────────────────────────────────────────────────────────

    /// `"..."`. A backslash or yen sign escapes exactly one following
    /// character without interpreting it. Unterminated strings run to end
    /// of input.
    fn plain_string(&mut self) -> Token<'src> {
        let start = self.cursor.pos();
        let begin = self.point;
        self.cursor.advance(); // opening quote
        loop {
            if matches!(self.cursor.current(), Some('\\' | '¥')) {
                self.cursor.advance();
                self.cursor.advance();
            }
            match self.cursor.current() {
                Some('"') | None => break,
                _ => self.cursor.advance(),
            }
        }
        self.cursor.advance(); // closing quote
        self.finish(TokenKind::Str, start, begin)
    }

    /// `{"..."}` — the multi-line string form, closed by `"}`.
    fn brace_string(&mut self) -> Token<'src> {
        let start = self.cursor.pos();
        let begin = self.point;
        self.cursor.advance();
        self.cursor.advance();
        loop {
            if matches!(self.cursor.current(), Some('\\' | '¥')) {
                self.cursor.advance();
                self.cursor.advance();
            }
            let closed = self.cursor.prev() == Some('"') && self.cursor.current() == Some('}');
            if closed || self.cursor.current().is_none() {
                self.cursor.advance();
                break;
            }
            self.cursor.advance();
        }
        self.finish(TokenKind::Str, start, begin)
    }

    // ─── Numbers ────────────────────────────────────────────────────────

    /// `'x'` character literal, with `\'` escaping the closing quote.
    fn char_literal(&mut self) -> Token<'src> {
        let start = self.cursor.pos();
        let begin = self.point;
        self.cursor.advance(); // opening quote
        while let Some(ch) = self.cursor.current() {
            if ch == '\'' && self.cursor.prev() != Some('\\') {
                break;
            }
            self.cursor.advance();
        }
        self.cursor.advance(); // closing quote
        self.finish(TokenKind::Int, start, begin)
    }

    /// `$FF` or `0xFF`. A bare prefix with no digits is still an int
    /// token (the grammar does not evaluate values).
    fn hex_number(&mut self) -> Token<'src> {
        let start = self.cursor.pos();
        let begin = self.point;
        if self.cursor.current() == Some('0') {
            self.cursor.advance();
        }
        self.cursor.advance();
        while matches!(self.cursor.current(), Some(ch) if ch.is_ascii_hexdigit()) {
            self.cursor.advance();
        }
        self.finish(TokenKind::Int, start, begin)
    }

    /// `%101` or `0b101`.
    fn bin_number(&mut self) -> Token<'src> {
        let start = self.cursor.pos();
        let begin = self.point;
        if self.cursor.current() == Some('0') {
            self.cursor.advance();
        }
        self.cursor.advance();
        while matches!(self.cursor.current(), Some('0' | '1')) {
            self.cursor.advance();
        }
        self.finish(TokenKind::Int, start, begin)
    }

    /// Decimal integer or float. Tracks "seen exponent", "seen sign",
    /// "seen trailing F", and "seen decimal point" flags; a second
    /// occurrence of any of them stops the scan.
    fn decimal_number(&mut self) -> Token<'src> {
        let start = self.cursor.pos();
        let begin = self.point;
        let mut sign = false;
        let mut exponent = false;
        let mut trailing_f = false;
        let mut dot = false;
        while let Some(ch) = self.cursor.current() {
            if !matches!(ch, '0'..='9' | 'E' | 'e' | 'F' | 'f' | '-' | '+' | '.') {
                break;
            }
            if trailing_f {
                break; // nothing may follow the F suffix
            } else if matches!(ch, 'F' | 'f') {
                trailing_f = true;
            } else if matches!(ch, '-' | '+') {
                // A sign is only valid once, directly inside an exponent.
                if !exponent || sign {
                    break;
                }
                sign = true;
            } else if matches!(ch, 'E' | 'e') {
                if exponent {
                    break;
                }
                exponent = true;
            } else if ch == '.' {
                if dot {
                    break;
                }
                dot = true;
            }
            self.cursor.advance();
        }
        let kind = if dot || exponent || trailing_f {
            TokenKind::Double
        } else {
            TokenKind::Int
        };
        self.finish(kind, start, begin)
    }

    // ─── Operators, brackets, identifiers ───────────────────────────────

    /// Single operator character, with the two-character combinations
    /// recognized greedily.
    fn operator(&mut self, first: char) -> Token<'src> {
        let start = self.cursor.pos();
        let begin = self.point;
        self.cursor.advance();
        if let Some(second) = self.cursor.current() {
            if is_two_char_operator(first, second) {
                self.cursor.advance();
            }
        }
        self.finish(TokenKind::Operator, start, begin)
    }

    /// Identifier-ish run. The leading character may not be a digit, but
    /// digits are allowed afterwards (`foo2`). Unicode letters, symbols,
    /// and emoji all qualify.
    fn ident(&mut self) -> Token<'src> {
        let start = self.cursor.pos();
        let begin = self.point;
        self.cursor.advance();
        while matches!(self.cursor.current(), Some(ch) if is_ident_continue(ch)) {
            self.cursor.advance();
        }
        self.finish(TokenKind::Literal, start, begin)
    }
}

/// The fixed punctuation set. Everything outside it (and outside
/// whitespace) can appear in an identifier.
const fn is_punct(ch: char) -> bool {
    matches!(
        ch,
        '[' | ']'
            | '<'
            | '>'
            | '{'
            | '}'
            | '('
            | ')'
            | '-'
            | '+'
            | '/'
            | '*'
            | '\\'
            | '¥'
            | '&'
            | '#'
            | '$'
            | '%'
            | '^'
            | '!'
            | '?'
            | '.'
            | ','
            | ':'
            | ';'
            | '~'
            | '='
            | '|'
            | '"'
            | '\''
    )
}

fn is_ident_start(ch: char) -> bool {
    !ch.is_ascii_digit() && !ch.is_whitespace() && !is_punct(ch)
}

fn is_ident_continue(ch: char) -> bool {
    !ch.is_whitespace() && !is_punct(ch)
}

const fn is_operator_char(ch: char) -> bool {
    matches!(
        ch,
        '=' | '!' | '+' | '-' | '*' | '/' | '\\' | '<' | '>' | '&' | '|' | '^'
    )
}

const fn is_two_char_operator(first: char, second: char) -> bool {
    matches!(
        (first, second),
        ('=', '=')
            | ('!', '=')
            | ('+', '+')
            | ('+', '=')
            | ('-', '-')
            | ('-', '=')
            | ('*', '=')
            | ('/', '=')
            | ('\\', '=')
            | ('<', '<')
            | ('<', '=')
            | ('>', '>')
            | ('>', '=')
            | ('&', '=')
            | ('|', '=')
            | ('^', '=')
    )
}

#[cfg(test)]
mod tests {
    use crate::tokenize;
    use hsp3_ir::{Point, TokenKind};
    use pretty_assertions::assert_eq;

    /// Collapse a stream into `(kind, raw)` pairs for compact assertions.
    fn kinds(source: &str) -> Vec<(TokenKind, String)> {
        tokenize(source)
            .into_iter()
            .map(|t| (t.kind, t.raw.to_string()))
            .collect()
    }

    use TokenKind::{
        Bracket, Comment, Double, Eof, Int, Literal, Newline, Operator, Other, Sharp, Space, Str,
    };

    fn pairs(expected: &[(TokenKind, &str)]) -> Vec<(TokenKind, String)> {
        expected
            .iter()
            .map(|&(k, r)| (k, r.to_string()))
            .collect()
    }

    // === Newlines ===

    #[test]
    fn lf_cr_crlf_each_one_token() {
        assert_eq!(
            kinds("\n\r\r\n"),
            pairs(&[(Newline, "\n"), (Newline, "\r"), (Newline, "\r\n"), (Eof, "")])
        );
    }

    #[test]
    fn newline_advances_row_and_resets_column() {
        let tokens = tokenize("ab\ncd");
        assert_eq!(tokens[2].location.begin, Point::new(1, 0));
        assert_eq!(tokens[2].location.end, Point::new(1, 2));
    }

    // === Directive marker ===

    #[test]
    fn sharp_is_a_single_token() {
        assert_eq!(
            kinds("#deffunc"),
            pairs(&[(Sharp, "#"), (Literal, "deffunc"), (Eof, "")])
        );
    }

    // === Comments ===

    #[test]
    fn semicolon_comment_to_end_of_line() {
        assert_eq!(
            kinds("; neko\nmes"),
            pairs(&[(Comment, "; neko"), (Newline, "\n"), (Literal, "mes"), (Eof, "")])
        );
    }

    #[test]
    fn slash_slash_comment() {
        assert_eq!(
            kinds("// neko"),
            pairs(&[(Comment, "// neko"), (Eof, "")])
        );
    }

    #[test]
    fn block_comment_single_line() {
        assert_eq!(
            kinds("a/* c */b"),
            pairs(&[(Literal, "a"), (Comment, "/* c */"), (Literal, "b"), (Eof, "")])
        );
    }

    #[test]
    fn block_comment_spans_lines_and_recomputes_position() {
        let tokens = tokenize("/* a\nbb */x");
        assert_eq!(tokens[0].kind, Comment);
        assert_eq!(tokens[0].raw, "/* a\nbb */");
        assert_eq!(tokens[0].location.begin, Point::new(0, 0));
        assert_eq!(tokens[0].location.end, Point::new(1, 5));
        assert_eq!(tokens[1].location.begin, Point::new(1, 5));
    }

    #[test]
    fn unterminated_block_comment_runs_to_eof() {
        assert_eq!(kinds("/* abc"), pairs(&[(Comment, "/* abc"), (Eof, "")]));
    }

    #[test]
    fn tight_block_comment() {
        assert_eq!(kinds("/**/"), pairs(&[(Comment, "/**/"), (Eof, "")]));
    }

    #[test]
    fn lone_slash_is_an_operator() {
        assert_eq!(kinds("a/b"), pairs(&[(Literal, "a"), (Operator, "/"), (Literal, "b"), (Eof, "")]));
    }

    // === Whitespace ===

    #[test]
    fn space_runs_coalesce_per_character_class() {
        assert_eq!(
            kinds("  \t\t\u{3000}"),
            pairs(&[(Space, "  "), (Space, "\t\t"), (Space, "\u{3000}"), (Eof, "")])
        );
    }

    // === Strings ===

    #[test]
    fn plain_string() {
        assert_eq!(kinds("\"hi\""), pairs(&[(Str, "\"hi\""), (Eof, "")]));
    }

    #[test]
    fn escape_consumes_one_following_character() {
        assert_eq!(
            kinds(r#""a\"b""#),
            pairs(&[(Str, r#""a\"b""#), (Eof, "")])
        );
    }

    #[test]
    fn yen_sign_escapes_too() {
        assert_eq!(
            kinds("\"a¥\"b\""),
            pairs(&[(Str, "\"a¥\"b\""), (Eof, "")])
        );
    }

    #[test]
    fn unterminated_string_runs_to_eof() {
        assert_eq!(kinds("\"abc"), pairs(&[(Str, "\"abc"), (Eof, "")]));
    }

    #[test]
    fn brace_string_single_line() {
        assert_eq!(
            kinds("{\"hi\"}"),
            pairs(&[(Str, "{\"hi\"}"), (Eof, "")])
        );
    }

    #[test]
    fn brace_string_spans_lines_and_recomputes_position() {
        let tokens = tokenize("{\"a\nb\"}x");
        assert_eq!(tokens[0].kind, Str);
        assert_eq!(tokens[0].raw, "{\"a\nb\"}");
        assert_eq!(tokens[0].location.begin, Point::new(0, 0));
        assert_eq!(tokens[0].location.end, Point::new(1, 3));
        assert_eq!(tokens[1].raw, "x");
        assert_eq!(tokens[1].location.begin, Point::new(1, 3));
    }

    #[test]
    fn lone_open_brace_is_a_bracket() {
        assert_eq!(kinds("{a}"), pairs(&[(Bracket, "{"), (Literal, "a"), (Bracket, "}"), (Eof, "")]));
    }

    // === Numbers ===

    #[test]
    fn char_literal_is_int() {
        assert_eq!(kinds("'a'"), pairs(&[(Int, "'a'"), (Eof, "")]));
    }

    #[test]
    fn char_literal_with_escaped_quote() {
        assert_eq!(kinds(r"'\''"), pairs(&[(Int, r"'\''"), (Eof, "")]));
    }

    #[test]
    fn hex_forms() {
        assert_eq!(
            kinds("$FF 0x10"),
            pairs(&[(Int, "$FF"), (Space, " "), (Int, "0x10"), (Eof, "")])
        );
    }

    #[test]
    fn bin_forms() {
        assert_eq!(
            kinds("%101 0b11"),
            pairs(&[(Int, "%101"), (Space, " "), (Int, "0b11"), (Eof, "")])
        );
    }

    #[test]
    fn bare_hex_prefix_is_still_an_int() {
        assert_eq!(kinds("$"), pairs(&[(Int, "$"), (Eof, "")]));
    }

    #[test]
    fn decimal_int() {
        assert_eq!(kinds("123"), pairs(&[(Int, "123"), (Eof, "")]));
    }

    #[test]
    fn float_with_dot() {
        assert_eq!(kinds("1.5"), pairs(&[(Double, "1.5"), (Eof, "")]));
    }

    #[test]
    fn float_with_exponent_and_sign() {
        assert_eq!(kinds("1e+5"), pairs(&[(Double, "1e+5"), (Eof, "")]));
    }

    #[test]
    fn float_with_trailing_f() {
        assert_eq!(kinds("1f"), pairs(&[(Double, "1f"), (Eof, "")]));
    }

    #[test]
    fn second_dot_stops_the_scan() {
        assert_eq!(
            kinds("1.2.3"),
            pairs(&[(Double, "1.2"), (Other, "."), (Int, "3"), (Eof, "")])
        );
    }

    #[test]
    fn sign_outside_exponent_stops_the_scan() {
        assert_eq!(
            kinds("1+2"),
            pairs(&[(Int, "1"), (Operator, "+"), (Int, "2"), (Eof, "")])
        );
    }

    #[test]
    fn nothing_follows_the_f_suffix() {
        assert_eq!(
            kinds("1f2"),
            pairs(&[(Double, "1f"), (Int, "2"), (Eof, "")])
        );
    }

    // === Operators & brackets ===

    #[test]
    fn two_char_operators_are_greedy() {
        assert_eq!(
            kinds("== += << >="),
            pairs(&[
                (Operator, "=="),
                (Space, " "),
                (Operator, "+="),
                (Space, " "),
                (Operator, "<<"),
                (Space, " "),
                (Operator, ">="),
                (Eof, ""),
            ])
        );
    }

    #[test]
    fn single_operators() {
        assert_eq!(
            kinds("a=b*c"),
            pairs(&[
                (Literal, "a"),
                (Operator, "="),
                (Literal, "b"),
                (Operator, "*"),
                (Literal, "c"),
                (Eof, ""),
            ])
        );
    }

    #[test]
    fn brackets() {
        assert_eq!(
            kinds("[]()"),
            pairs(&[(Bracket, "["), (Bracket, "]"), (Bracket, "("), (Bracket, ")"), (Eof, "")])
        );
    }

    // === Identifiers & fallback ===

    #[test]
    fn identifier_with_digits_and_at() {
        assert_eq!(kinds("foo2@m"), pairs(&[(Literal, "foo2@m"), (Eof, "")]));
    }

    #[test]
    fn unicode_identifiers() {
        assert_eq!(
            kinds("ねこ \u{1F600}"),
            pairs(&[(Literal, "ねこ"), (Space, " "), (Literal, "\u{1F600}"), (Eof, "")])
        );
    }

    #[test]
    fn leading_digit_does_not_start_an_identifier() {
        assert_eq!(kinds("1abc"), pairs(&[(Int, "1"), (Literal, "abc"), (Eof, "")]));
    }

    #[test]
    fn punctuation_falls_through_to_other() {
        assert_eq!(
            kinds("a, b : c"),
            pairs(&[
                (Literal, "a"),
                (Other, ","),
                (Space, " "),
                (Literal, "b"),
                (Space, " "),
                (Other, ":"),
                (Space, " "),
                (Literal, "c"),
                (Eof, ""),
            ])
        );
    }

    #[test]
    fn lone_yen_sign_is_other() {
        assert_eq!(kinds("¥"), pairs(&[(Other, "¥"), (Eof, "")]));
    }
}
