//! The HSP3 directive/label grammar over the lexer's token stream.
//!
//! Built entirely from the `hsp3_parse_core` primitives. Two token
//! classes get special treatment: "skip" (whitespace + comments, used
//! between statements) and "directive skip" (whitespace + comments +
//! `\`-continued newlines, used inside a directive body so a directive
//! can span lines when explicitly continued).
//!
//! The top-level driver never reports a hard failure for the whole
//! document: unrecognized spans are absorbed by a catch-all alternative,
//! so the result is always a (possibly empty) ordered element list.

use hsp3_ir::{OutlineElement, OutlineKind, Token, TokenKind, TokenRange};
use hsp3_parse_core::{
    choice, many, map, negation, option, reshape, satisfy, sequence, take_if, Failure, Input,
    Parsed, Parser, Success,
};
use tracing::debug;

/// Intermediate value flowing through the grammar.
///
/// The combinator core is generic over one value type per parser; this
/// enum is that type, replacing the untyped payloads a dynamic language
/// would thread through.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Val {
    /// Discarded content (optional groups, directive bodies, noise).
    Null,
    /// A matched token, remembered by kind only.
    Tok(TokenKind),
    /// A matched keyword, lowercased.
    Key(String),
    /// A captured significant name with its token-index range.
    Name { first: u32, last: u32, text: String },
    /// Coalesced insignificant tokens.
    Skip,
    /// A statement separator.
    Sep,
    /// A directive separator (end of a directive's logical line).
    DirSep,
    /// A finished outline element.
    Elem(OutlineElement),
}

type P<'t, 's> = Parser<'t, Token<'s>, Val>;

/// Saturating index conversion; token streams never approach `u32::MAX`.
fn idx(i: usize) -> u32 {
    u32::try_from(i).unwrap_or(u32::MAX)
}

// ─── Token-level matchers ───────────────────────────────────────────────

/// Match one token of the given kind.
fn tok<'t, 's: 't>(kind: TokenKind) -> P<'t, 's> {
    take_if(kind.as_str(), move |t: &Token<'s>| {
        t.is(kind).then_some(Val::Tok(kind))
    })
}

/// Match one token by kind and exact raw text.
fn raw_tok<'t, 's: 't>(
    name: &'static str,
    kind: TokenKind,
    raw: &'static str,
) -> P<'t, 's> {
    take_if(name, move |t: &Token<'s>| {
        t.is_raw(kind, raw).then_some(Val::Tok(kind))
    })
}

/// Match any single token.
fn any_tok<'t, 's: 't>() -> P<'t, 's> {
    take_if("any", |_t: &Token<'s>| Some(Val::Null))
}

/// Match a directive keyword, case-insensitively, by exact spelling.
fn keyword<'t, 's: 't>(word: &'static str) -> P<'t, 's> {
    take_if(word, move |t: &Token<'s>| {
        (t.is(TokenKind::Literal) && t.raw.eq_ignore_ascii_case(word))
            .then(|| Val::Key(word.to_string()))
    })
}

/// Match one of the `deffunc` family keywords, yielding the lowercased
/// spelling (it decides the element kind).
fn deffunc_keyword<'t, 's: 't>() -> P<'t, 's> {
    take_if("deffunc-keyword", |t: &Token<'s>| {
        if !t.is(TokenKind::Literal) {
            return None;
        }
        let lower = t.raw.to_ascii_lowercase();
        matches!(lower.as_str(), "deffunc" | "defcfunc" | "modfunc" | "modcfunc")
            .then_some(Val::Key(lower))
    })
}

/// Match `func` or `cfunc`.
fn func_keyword<'t, 's: 't>() -> P<'t, 's> {
    take_if("func-keyword", |t: &Token<'s>| {
        if !t.is(TokenKind::Literal) {
            return None;
        }
        let lower = t.raw.to_ascii_lowercase();
        matches!(lower.as_str(), "func" | "cfunc").then_some(Val::Key(lower))
    })
}

/// Capture a significant name token (with its index) when `accept`
/// yields its display text.
fn named<'t, 's: 't>(
    name: &'static str,
    accept: impl Fn(&Token<'s>) -> Option<String> + 't,
) -> P<'t, 's> {
    satisfy(name, move |input: Input<'t, Token<'s>>| {
        let Some(token) = input.first() else {
            return Err("input is empty".to_string());
        };
        match accept(token) {
            Some(text) => Ok((
                Val::Name {
                    first: idx(input.pos()),
                    last: idx(input.pos()),
                    text,
                },
                1,
            )),
            None => Err(format!("expected {name}")),
        }
    })
}

/// The significant identifier of a directive or label.
fn ident_name<'t, 's: 't>() -> P<'t, 's> {
    named("name", |t| {
        t.is(TokenKind::Literal).then(|| t.raw.to_string())
    })
}

/// The `#module"name"` string form; the raw text (quotes included) is
/// the display literal.
fn string_name<'t, 's: 't>() -> P<'t, 's> {
    named("module-name", |t| {
        t.is(TokenKind::Str).then(|| t.raw.to_string())
    })
}

// ─── Skips and separators ───────────────────────────────────────────────

/// `\` followed by a newline: an explicit line continuation inside a
/// directive.
fn continuation<'t, 's: 't>() -> P<'t, 's> {
    map(
        "continuation",
        sequence(
            "continuation",
            vec![
                raw_tok("backslash", TokenKind::Operator, "\\"),
                tok(TokenKind::Newline),
            ],
        ),
        |_| Val::Null,
    )
}

/// Insignificant tokens between statements: whitespace and comments.
fn skip<'t, 's: 't>() -> P<'t, 's> {
    map(
        "skip",
        many(
            "skip",
            choice("skip-item", vec![tok(TokenKind::Space), tok(TokenKind::Comment)]),
        ),
        |_| Val::Skip,
    )
}

/// Insignificant tokens inside a directive: whitespace, comments, and
/// continued newlines.
fn dire_skip<'t, 's: 't>() -> P<'t, 's> {
    map(
        "dire-skip",
        many(
            "dire-skip",
            choice(
                "dire-skip-item",
                vec![tok(TokenKind::Space), tok(TokenKind::Comment), continuation()],
            ),
        ),
        |_| Val::Skip,
    )
}

/// Like [`dire_skip`], but must contain at least one actual whitespace
/// token — comments and continuations alone do not separate a keyword
/// from the name that follows it.
fn dire_space<'t, 's: 't>() -> P<'t, 's> {
    reshape(
        "dire-space",
        many(
            "dire-space",
            choice(
                "dire-space-item",
                vec![tok(TokenKind::Space), tok(TokenKind::Comment), continuation()],
            ),
        ),
        |parsed| match parsed {
            Parsed::Success(s) => {
                let has_space = s
                    .value
                    .iter()
                    .any(|v| matches!(v, Val::Tok(TokenKind::Space)));
                if has_space {
                    Parsed::Success(Success {
                        name: "dire-space",
                        value: Val::Skip,
                        begin: s.begin,
                        end: s.end,
                        context: s.context,
                    })
                } else {
                    Parsed::Failure(Failure::new(
                        "dire-space",
                        "expected whitespace",
                        s.begin,
                    ))
                }
            }
            Parsed::Failure(f) => Parsed::Failure(f),
        },
    )
}

/// A statement separator: optional skip, then end-of-input, newline,
/// colon, or a curly brace.
fn separator<'t, 's: 't>() -> P<'t, 's> {
    map(
        "separator",
        sequence(
            "separator",
            vec![
                skip(),
                choice(
                    "separator-token",
                    vec![
                        tok(TokenKind::Eof),
                        tok(TokenKind::Newline),
                        raw_tok("colon", TokenKind::Other, ":"),
                        raw_tok("open-brace", TokenKind::Bracket, "{"),
                        raw_tok("close-brace", TokenKind::Bracket, "}"),
                    ],
                ),
            ],
        ),
        |_| Val::Sep,
    )
}

/// A directive separator: optional skip, then end-of-input or a (real,
/// uncontinued) newline.
fn dire_separator<'t, 's: 't>() -> P<'t, 's> {
    map(
        "dire-separator",
        sequence(
            "dire-separator",
            vec![
                skip(),
                choice(
                    "dire-separator-token",
                    vec![tok(TokenKind::Eof), tok(TokenKind::Newline)],
                ),
            ],
        ),
        |_| Val::DirSep,
    )
}

/// The trailing body of a directive: everything up to (but not
/// including) the next directive separator, discarded except for its
/// extent. The separator itself stays unconsumed; statement noise
/// handling eats it.
fn directive_body<'t, 's: 't>() -> P<'t, 's> {
    let item = map(
        "body-item",
        sequence(
            "body-item",
            vec![
                map("not-separator", negation("not-separator", dire_separator()), |()| {
                    Val::Null
                }),
                dire_skip(),
                any_tok(),
            ],
        ),
        |_| Val::Null,
    );
    map("body", many("body", item), |_| Val::Null)
}

// ─── Element construction ───────────────────────────────────────────────

/// First captured name at the top level of a sequence's values.
fn find_name(values: &[Val]) -> Option<(u32, u32, &str)> {
    values.iter().find_map(|v| match v {
        Val::Name { first, last, text } => Some((*first, *last, text.as_str())),
        _ => None,
    })
}

/// First matched keyword at the top level of a sequence's values.
fn find_key(values: &[Val]) -> Option<&str> {
    values.iter().find_map(|v| match v {
        Val::Key(text) => Some(text.as_str()),
        _ => None,
    })
}

/// Wrap a directive sequence: on success, build the outline element from
/// the captured name and the consumed token range.
fn rule<'t, 's: 't>(
    label: &'static str,
    steps: Vec<P<'t, 's>>,
    build: impl Fn(&[Val], TokenRange) -> Option<OutlineElement> + 't,
) -> P<'t, 's> {
    reshape(label, sequence(label, steps), move |parsed| match parsed {
        Parsed::Success(s) => {
            let entire = TokenRange::new(idx(s.begin), idx(s.end.saturating_sub(1)));
            match build(&s.value, entire) {
                Some(element) => Parsed::Success(Success {
                    name: label,
                    value: Val::Elem(element),
                    begin: s.begin,
                    end: s.end,
                    context: s.context,
                }),
                None => Parsed::Failure(Failure::new(label, "no name captured", s.begin)),
            }
        }
        Parsed::Failure(f) => Parsed::Failure(f),
    })
}

/// Build the standard element shape: literal from the captured name,
/// kind either fixed or resolved from the matched keyword.
fn standard_element(
    kind: Option<OutlineKind>,
    values: &[Val],
    entire: TokenRange,
) -> Option<OutlineElement> {
    let (first, last, text) = find_name(values)?;
    let kind = match kind {
        Some(kind) => kind,
        None => OutlineKind::from_name(find_key(values)?)?,
    };
    Some(OutlineElement::new(
        kind,
        text,
        TokenRange::new(first, last),
        entire,
    ))
}

/// `#global` / `#modinit` / `#modterm` have no name of their own; the
/// marker-plus-keyword pair is captured as the literal range and the
/// keyword doubles as display text.
fn marker_name<'t, 's: 't>(label: &'static str, word: &'static str) -> P<'t, 's> {
    reshape(
        label,
        sequence(label, vec![tok(TokenKind::Sharp), keyword(word)]),
        move |parsed| match parsed {
            Parsed::Success(s) => Parsed::Success(Success {
                name: label,
                value: Val::Name {
                    first: idx(s.begin),
                    last: idx(s.end.saturating_sub(1)),
                    text: word.to_string(),
                },
                begin: s.begin,
                end: s.end,
                context: s.context,
            }),
            Parsed::Failure(f) => Parsed::Failure(f),
        },
    )
}

/// Optional qualifier: a keyword followed by required whitespace,
/// discarded.
fn qualifier<'t, 's: 't>(word: &'static str) -> P<'t, 's> {
    map(
        "qualifier",
        option(
            "qualifier",
            map(
                "qualifier-body",
                sequence("qualifier-body", vec![keyword(word), dire_space()]),
                |_| Val::Null,
            ),
        ),
        |v| v.unwrap_or(Val::Null),
    )
}

// ─── Directive rules ────────────────────────────────────────────────────

/// `#module name ...` / `#module"name" ...`
fn dire_module<'t, 's: 't>() -> P<'t, 's> {
    let ident_form = map(
        "module-ident",
        sequence("module-ident", vec![dire_space(), ident_name()]),
        |mut v| v.swap_remove(1),
    );
    let string_form = map(
        "module-string",
        sequence("module-string", vec![dire_skip(), string_name()]),
        |mut v| v.swap_remove(1),
    );
    rule(
        "module",
        vec![
            tok(TokenKind::Sharp),
            keyword("module"),
            choice("module-name-form", vec![ident_form, string_form]),
            directive_body(),
        ],
        |values, entire| standard_element(Some(OutlineKind::Module), values, entire),
    )
}

/// `#global` — closes the open module scope. Unlike the other
/// directives it consumes its separator.
fn dire_global<'t, 's: 't>() -> P<'t, 's> {
    rule(
        "global",
        vec![
            marker_name("global-marker", "global"),
            dire_skip(),
            dire_separator(),
        ],
        |values, entire| standard_element(Some(OutlineKind::Global), values, entire),
    )
}

/// `#deffunc` / `#defcfunc` / `#modfunc` / `#modcfunc`, with an optional
/// `local` qualifier.
fn dire_deffunc<'t, 's: 't>() -> P<'t, 's> {
    rule(
        "deffunc",
        vec![
            tok(TokenKind::Sharp),
            deffunc_keyword(),
            dire_space(),
            qualifier("local"),
            ident_name(),
            directive_body(),
        ],
        |values, entire| standard_element(None, values, entire),
    )
}

/// `#modinit ...`
fn dire_modinit<'t, 's: 't>() -> P<'t, 's> {
    rule(
        "modinit",
        vec![marker_name("modinit-marker", "modinit"), directive_body()],
        |values, entire| standard_element(Some(OutlineKind::ModInit), values, entire),
    )
}

/// `#modterm ...`
fn dire_modterm<'t, 's: 't>() -> P<'t, 's> {
    rule(
        "modterm",
        vec![marker_name("modterm-marker", "modterm"), directive_body()],
        |values, entire| standard_element(Some(OutlineKind::ModTerm), values, entire),
    )
}

/// `#define [global] [ctype] name[(params)] ...`
fn dire_define<'t, 's: 't>() -> P<'t, 's> {
    // Macro parameter list: balanced to the first ')'.
    let param_item = map(
        "param-item",
        sequence(
            "param-item",
            vec![
                map(
                    "not-close-paren",
                    negation(
                        "not-close-paren",
                        raw_tok("close-paren", TokenKind::Bracket, ")"),
                    ),
                    |()| Val::Null,
                ),
                any_tok(),
            ],
        ),
        |_| Val::Null,
    );
    let params = map(
        "macro-params",
        option(
            "macro-params",
            map(
                "macro-params-body",
                sequence(
                    "macro-params-body",
                    vec![
                        raw_tok("open-paren", TokenKind::Bracket, "("),
                        map("params", many("params", param_item), |_| Val::Null),
                        raw_tok("close-paren", TokenKind::Bracket, ")"),
                    ],
                ),
                |_| Val::Null,
            ),
        ),
        |v| v.unwrap_or(Val::Null),
    );
    rule(
        "define",
        vec![
            tok(TokenKind::Sharp),
            keyword("define"),
            dire_space(),
            qualifier("global"),
            qualifier("ctype"),
            ident_name(),
            params,
            directive_body(),
        ],
        |values, entire| standard_element(Some(OutlineKind::Define), values, entire),
    )
}

/// `#const [global] [double] name ...`
fn dire_const<'t, 's: 't>() -> P<'t, 's> {
    rule(
        "const",
        vec![
            tok(TokenKind::Sharp),
            keyword("const"),
            dire_space(),
            qualifier("global"),
            qualifier("double"),
            ident_name(),
            directive_body(),
        ],
        |values, entire| standard_element(Some(OutlineKind::Const), values, entire),
    )
}

/// `#enum [global] name ...`
fn dire_enum<'t, 's: 't>() -> P<'t, 's> {
    rule(
        "enum",
        vec![
            tok(TokenKind::Sharp),
            keyword("enum"),
            dire_space(),
            qualifier("global"),
            ident_name(),
            directive_body(),
        ],
        |values, entire| standard_element(Some(OutlineKind::Enum), values, entire),
    )
}

/// `#func` / `#cfunc`, with an optional `global` qualifier.
fn dire_func<'t, 's: 't>() -> P<'t, 's> {
    rule(
        "func",
        vec![
            tok(TokenKind::Sharp),
            func_keyword(),
            dire_space(),
            qualifier("global"),
            ident_name(),
            directive_body(),
        ],
        |values, entire| standard_element(None, values, entire),
    )
}

/// `#cmd name ...`
fn dire_cmd<'t, 's: 't>() -> P<'t, 's> {
    rule(
        "cmd",
        vec![
            tok(TokenKind::Sharp),
            keyword("cmd"),
            dire_space(),
            ident_name(),
            directive_body(),
        ],
        |values, entire| standard_element(Some(OutlineKind::Cmd), values, entire),
    )
}

// ─── Labels, noise, and the driver ──────────────────────────────────────

/// `*name` followed by a separator. The element covers exactly the
/// asterisk and the name; its display literal is `*name`.
fn label<'t, 's: 't>() -> P<'t, 's> {
    let core = rule(
        "label-core",
        vec![raw_tok("asterisk", TokenKind::Operator, "*"), ident_name()],
        |values, entire| {
            let (_, _, text) = find_name(values)?;
            Some(OutlineElement::new(
                OutlineKind::Label,
                format!("*{text}"),
                entire,
                entire,
            ))
        },
    );
    map(
        "label",
        sequence("label", vec![skip(), core, separator()]),
        |mut v| v.swap_remove(1),
    )
}

/// One directive of any shape, with leading skip, tried in a fixed
/// order.
fn directive<'t, 's: 't>() -> P<'t, 's> {
    let with_skip = |p: P<'t, 's>| {
        map(
            "directive",
            sequence("directive", vec![skip(), p]),
            |mut v: Vec<Val>| v.swap_remove(1),
        )
    };
    choice(
        "directive",
        vec![
            with_skip(dire_module()),
            with_skip(dire_global()),
            with_skip(dire_deffunc()),
            with_skip(dire_modinit()),
            with_skip(dire_modterm()),
            with_skip(dire_define()),
            with_skip(dire_const()),
            with_skip(dire_enum()),
            with_skip(dire_func()),
            with_skip(dire_cmd()),
        ],
    )
}

/// The catch-all: any run of tokens up to and including the next
/// separator, discarded. This is what keeps the driver total on
/// malformed input.
fn any_statement<'t, 's: 't>() -> P<'t, 's> {
    let noise_item = map(
        "noise-item",
        sequence(
            "noise-item",
            vec![
                map("not-separator", negation("not-separator", separator()), |()| {
                    Val::Null
                }),
                any_tok(),
            ],
        ),
        |_| Val::Null,
    );
    map(
        "statement-noise",
        sequence(
            "statement-noise",
            vec![
                map("noise", many("noise", noise_item), |_| Val::Null),
                separator(),
            ],
        ),
        |_| Val::Null,
    )
}

/// Run the grammar over a token stream, returning recognized elements in
/// source order.
///
/// Never fails: unrecognized spans are silently absorbed as statement
/// noise, so malformed input degrades to fewer elements, not an error.
pub fn parse_elements<'s>(tokens: &[Token<'s>]) -> Vec<OutlineElement> {
    let statement = many(
        "statement",
        choice(
            "statement-item",
            vec![directive(), label(), any_statement()],
        ),
    );
    let elements: Vec<OutlineElement> = match statement.parse(Input::new(tokens)) {
        Parsed::Success(s) => s
            .value
            .into_iter()
            .filter_map(|v| match v {
                Val::Elem(element) => Some(element),
                _ => None,
            })
            .collect(),
        // Unreachable: a zero-minimum repetition cannot fail. Degrade to
        // an empty outline rather than surfacing an error.
        Parsed::Failure(_) => Vec::new(),
    };
    debug!(
        tokens = tokens.len(),
        elements = elements.len(),
        "parsed outline elements"
    );
    elements
}

#[cfg(test)]
mod tests {
    use super::parse_elements;
    use hsp3_ir::{OutlineKind, TokenRange};
    use hsp3_lexer::tokenize;
    use pretty_assertions::assert_eq;

    fn elements(source: &str) -> Vec<(OutlineKind, String)> {
        parse_elements(&tokenize(source))
            .into_iter()
            .map(|e| (e.kind, e.literal))
            .collect()
    }

    // === Labels ===

    #[test]
    fn label_element() {
        let tokens = tokenize("*start\n");
        let parsed = parse_elements(&tokens);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].kind, OutlineKind::Label);
        assert_eq!(parsed[0].literal, "*start");
        // Exactly the asterisk and the name.
        assert_eq!(parsed[0].literal_range, TokenRange::new(0, 1));
        assert_eq!(parsed[0].entire_range, TokenRange::new(0, 1));
    }

    #[test]
    fn label_without_trailing_newline() {
        assert_eq!(elements("*start"), vec![(OutlineKind::Label, "*start".into())]);
    }

    #[test]
    fn label_followed_by_colon_statement() {
        assert_eq!(
            elements("*main : mes \"hi\"\n"),
            vec![(OutlineKind::Label, "*main".into())]
        );
    }

    #[test]
    fn indented_label() {
        assert_eq!(elements("  *start\n"), vec![(OutlineKind::Label, "*start".into())]);
    }

    // === Directives: basic shapes ===

    #[test]
    fn define_element_with_ranges() {
        let tokens = tokenize("#define GREETING \"hi\"\n");
        let parsed = parse_elements(&tokens);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].kind, OutlineKind::Define);
        assert_eq!(parsed[0].literal, "GREETING");
        // tokens: # define ' ' GREETING ' ' "hi" \n eof
        assert_eq!(parsed[0].literal_range, TokenRange::new(3, 3));
        // Marker through body end; the newline is not part of the body.
        assert_eq!(parsed[0].entire_range, TokenRange::new(0, 5));
    }

    #[test]
    fn deffunc_family_resolves_kind_from_keyword() {
        assert_eq!(
            elements("#deffunc a\n#defcfunc b\n#modfunc c\n#modcfunc d\n"),
            vec![
                (OutlineKind::DefFunc, "a".into()),
                (OutlineKind::DefCFunc, "b".into()),
                (OutlineKind::ModFunc, "c".into()),
                (OutlineKind::ModCFunc, "d".into()),
            ]
        );
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(
            elements("#DefFunc Foo\n#CONST BAR 1\n"),
            vec![
                (OutlineKind::DefFunc, "Foo".into()),
                (OutlineKind::Const, "BAR".into()),
            ]
        );
    }

    #[test]
    fn func_and_cfunc() {
        assert_eq!(
            elements("#func f \"f\"\n#cfunc global g \"g\"\n"),
            vec![
                (OutlineKind::Func, "f".into()),
                (OutlineKind::CFunc, "g".into()),
            ]
        );
    }

    #[test]
    fn cmd_directive() {
        assert_eq!(elements("#cmd neko 0x10\n"), vec![(OutlineKind::Cmd, "neko".into())]);
    }

    #[test]
    fn enum_with_global_qualifier() {
        assert_eq!(
            elements("#enum global E = 1\n"),
            vec![(OutlineKind::Enum, "E".into())]
        );
    }

    #[test]
    fn const_with_qualifiers() {
        assert_eq!(
            elements("#const global double PI 3.14159\n"),
            vec![(OutlineKind::Const, "PI".into())]
        );
    }

    #[test]
    fn deffunc_with_local_qualifier() {
        assert_eq!(
            elements("#deffunc local helper int a\n"),
            vec![(OutlineKind::DefFunc, "helper".into())]
        );
    }

    #[test]
    fn define_with_macro_params() {
        assert_eq!(
            elements("#define ctype max(%1,%2) ((%1)>(%2)?(%1):(%2))\n"),
            vec![(OutlineKind::Define, "max".into())]
        );
    }

    // === Modules ===

    #[test]
    fn module_with_identifier_name() {
        assert_eq!(elements("#module foo\n"), vec![(OutlineKind::Module, "foo".into())]);
    }

    #[test]
    fn module_with_string_name_keeps_quotes() {
        assert_eq!(
            elements("#module\"foo\"\n"),
            vec![(OutlineKind::Module, "\"foo\"".into())]
        );
    }

    #[test]
    fn module_with_variable_list() {
        assert_eq!(
            elements("#module m a, b, c\n"),
            vec![(OutlineKind::Module, "m".into())]
        );
    }

    #[test]
    fn global_element() {
        let tokens = tokenize("#global\n");
        let parsed = parse_elements(&tokens);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].kind, OutlineKind::Global);
        assert_eq!(parsed[0].literal, "global");
        // The sharp and the keyword.
        assert_eq!(parsed[0].literal_range, TokenRange::new(0, 1));
    }

    #[test]
    fn modinit_and_modterm() {
        assert_eq!(
            elements("#modinit\n#modterm\n"),
            vec![
                (OutlineKind::ModInit, "modinit".into()),
                (OutlineKind::ModTerm, "modterm".into()),
            ]
        );
    }

    // === Continued lines ===

    #[test]
    fn directive_spans_continued_lines() {
        let source = "#deffunc f \\\nint a\nmes\n";
        let tokens = tokenize(source);
        let parsed = parse_elements(&tokens);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].literal, "f");
        // The body extends past the continued newline.
        let entire_last = parsed[0].entire_range.last as usize;
        assert!(tokens[entire_last].location.begin.row >= 1);
    }

    // === Degradation ===

    #[test]
    fn garbage_is_absorbed_as_statement_noise() {
        assert_eq!(
            elements("foo bar #invalidword\n#deffunc ok\n"),
            vec![(OutlineKind::DefFunc, "ok".into())]
        );
    }

    #[test]
    fn unknown_directive_produces_nothing() {
        assert_eq!(elements("#include \"file.as\"\n"), vec![]);
    }

    #[test]
    fn directive_without_required_whitespace_is_noise() {
        // A comment alone does not separate the keyword from the name.
        assert_eq!(elements("#deffunc/*x*/name\n"), vec![]);
    }

    #[test]
    fn directive_without_name_is_noise() {
        assert_eq!(elements("#deffunc\n"), vec![]);
    }

    #[test]
    fn empty_input_yields_no_elements() {
        assert_eq!(elements(""), vec![]);
    }

    #[test]
    fn plain_code_yields_no_elements() {
        assert_eq!(elements("mes \"hello\"\nrepeat 3\nloop\n"), vec![]);
    }

    #[test]
    fn elements_appear_in_source_order() {
        assert_eq!(
            elements("*a\n#define X 1\n*b\n#deffunc f\n"),
            vec![
                (OutlineKind::Label, "*a".into()),
                (OutlineKind::Define, "X".into()),
                (OutlineKind::Label, "*b".into()),
                (OutlineKind::DefFunc, "f".into()),
            ]
        );
    }

    #[test]
    fn comment_before_directive_is_skipped() {
        assert_eq!(
            elements("; header\n#define X 1\n"),
            vec![(OutlineKind::Define, "X".into())]
        );
    }

    #[test]
    fn crlf_sources_parse_identically() {
        assert_eq!(
            elements("#module m\r\n#deffunc f\r\n#global\r\n"),
            vec![
                (OutlineKind::Module, "m".into()),
                (OutlineKind::DefFunc, "f".into()),
                (OutlineKind::Global, "global".into()),
            ]
        );
    }
}
