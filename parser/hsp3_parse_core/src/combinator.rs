//! The combinator primitives.
//!
//! Every combinator is a pure function from `(input, position)` to a
//! [`Parsed`] value; none mutate their input. Each parser carries a
//! `&'static str` name assigned at construction — the name identifies
//! which rule produced a result and is never inferred.
//!
//! User-supplied callbacks (`satisfy` tests, `map`/`reshape` transforms)
//! run under [`std::panic::catch_unwind`]: a misbehaving grammar rule
//! becomes an ordinary [`Failure`] carrying the panic payload as `cause`,
//! never a crash of the whole parse.

use crate::input::Input;
use crate::result::{Failure, Parsed, Success};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

/// A named parser over elements of type `I`, producing values of type `V`.
///
/// Parsers are cheap to clone (the behavior is reference-counted) and are
/// composed with the free functions in this module.
pub struct Parser<'t, I, V> {
    name: &'static str,
    run: Rc<dyn Fn(Input<'t, I>) -> Parsed<V> + 't>,
}

impl<'t, I, V> Clone for Parser<'t, I, V> {
    fn clone(&self) -> Self {
        Parser {
            name: self.name,
            run: Rc::clone(&self.run),
        }
    }
}

impl<'t, I, V> Parser<'t, I, V> {
    /// Wrap a raw parse function. The building block every combinator
    /// below is made of; grammars can use it directly for bespoke rules.
    pub fn new(
        name: &'static str,
        run: impl Fn(Input<'t, I>) -> Parsed<V> + 't,
    ) -> Self {
        Parser {
            name,
            run: Rc::new(run),
        }
    }

    /// The name assigned at construction.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run this parser at the given input position.
    pub fn parse(&self, input: Input<'t, I>) -> Parsed<V> {
        (self.run)(input)
    }
}

/// Render a panic payload as text for the `cause` field.
fn panic_text(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}

/// Build a parser from a test callback.
///
/// The test receives the input and reports either a value plus the number
/// of elements it consumed, or a failure message. It is not invoked at
/// all when the input is exhausted — that is the standard "input is
/// empty" failure. A panicking test is caught and converted into a
/// failure with the payload as `cause`.
pub fn satisfy<'t, I, V>(
    name: &'static str,
    test: impl Fn(Input<'t, I>) -> Result<(V, usize), String> + 't,
) -> Parser<'t, I, V> {
    Parser::new(name, move |input| {
        if input.is_empty() {
            return Parsed::Failure(Failure::empty_input(name, input.pos()));
        }
        match catch_unwind(AssertUnwindSafe(|| test(input))) {
            Ok(Ok((value, consumed))) => {
                Parsed::success(name, value, input.pos(), input.pos() + consumed)
            }
            Ok(Err(message)) => Parsed::Failure(Failure::new(name, message, input.pos())),
            Err(payload) => Parsed::Failure(Failure {
                name,
                message: "test callback panicked".to_string(),
                at: input.pos(),
                context: Vec::new(),
                cause: Some(panic_text(payload.as_ref())),
            }),
        }
    })
}

/// Single-element `satisfy`: consume one element iff `accept` yields a
/// value for it.
pub fn take_if<'t, I, V>(
    name: &'static str,
    accept: impl Fn(&'t I) -> Option<V> + 't,
) -> Parser<'t, I, V> {
    satisfy(name, move |input| {
        let Some(item) = input.first() else {
            // Unreachable: satisfy rejects empty input before the test.
            return Err("input is empty".to_string());
        };
        match accept(item) {
            Some(value) => Ok((value, 1)),
            None => Err("element did not match".to_string()),
        }
    })
}

/// Apply each parser in order; all must succeed.
///
/// On failure at step `k`, the result is a failure citing `k` and the
/// step's name, with a context trail of every attempt up to and including
/// the failing one. On success, the value is the ordered list of each
/// step's value.
pub fn sequence<'t, I, V: 't>(
    name: &'static str,
    steps: Vec<Parser<'t, I, V>>,
) -> Parser<'t, I, Vec<V>> {
    Parser::new(name, move |input| {
        let begin = input.pos();
        let mut current = input;
        let mut values = Vec::with_capacity(steps.len());
        let mut context = Vec::with_capacity(steps.len());
        for (index, step) in steps.iter().enumerate() {
            match step.parse(current) {
                Parsed::Success(s) => {
                    context.push(s.trace());
                    current = current.at_pos(s.end);
                    values.push(s.value);
                }
                Parsed::Failure(f) => {
                    context.push(f.trace());
                    return Parsed::Failure(Failure {
                        name,
                        message: format!(
                            "step {index} ({}) failed: {}",
                            step.name(),
                            f.message
                        ),
                        at: f.at,
                        context,
                        cause: f.cause,
                    });
                }
            }
        }
        Parsed::Success(Success {
            name,
            value: values,
            begin,
            end: current.pos(),
            context,
        })
    })
}

/// Try each parser against the same starting position, short-circuiting
/// on the first success (which is returned unchanged, child name and
/// all). If every alternative fails, the result is a generic failure
/// whose context trail records every attempt.
pub fn choice<'t, I, V: 't>(
    name: &'static str,
    alternatives: Vec<Parser<'t, I, V>>,
) -> Parser<'t, I, V> {
    Parser::new(name, move |input| {
        let mut context = Vec::new();
        for alternative in &alternatives {
            match alternative.parse(input) {
                success @ Parsed::Success(_) => return success,
                Parsed::Failure(f) => context.push(f.trace()),
            }
        }
        Parsed::Failure(Failure {
            name,
            message: format!("no alternative matched ({} tried)", context.len()),
            at: input.pos(),
            context,
            cause: None,
        })
    })
}

/// Never fails: `p`'s success becomes `Some(value)`, `p`'s failure
/// becomes `None` with the input unconsumed.
pub fn option<'t, I, V: 't>(name: &'static str, p: Parser<'t, I, V>) -> Parser<'t, I, Option<V>> {
    Parser::new(name, move |input| match p.parse(input) {
        Parsed::Success(s) => {
            let trace = s.trace();
            Parsed::Success(Success {
                name,
                value: Some(s.value),
                begin: s.begin,
                end: s.end,
                context: vec![trace],
            })
        }
        Parsed::Failure(f) => Parsed::Success(Success {
            name,
            value: None,
            begin: input.pos(),
            end: input.pos(),
            context: vec![f.trace()],
        }),
    })
}

/// Succeeds (with a null value, consuming nothing) iff `p` fails.
///
/// Empty input is rejected outright — it is a failure, not a vacuous
/// success, which keeps `negation(negation(p))` rejecting empty input
/// exactly like `negation(p)` does.
pub fn negation<'t, I, V: 't>(name: &'static str, p: Parser<'t, I, V>) -> Parser<'t, I, ()> {
    Parser::new(name, move |input| {
        if input.is_empty() {
            return Parsed::Failure(Failure::empty_input(name, input.pos()));
        }
        match p.parse(input) {
            Parsed::Success(s) => Parsed::Failure(Failure {
                name,
                message: format!("negated parser ({}) matched", s.name),
                at: input.pos(),
                context: vec![s.trace()],
                cause: None,
            }),
            Parsed::Failure(f) => Parsed::Success(Success {
                name,
                value: (),
                begin: input.pos(),
                end: input.pos(),
                context: vec![f.trace()],
            }),
        }
    })
}

/// Non-consuming guard: succeeds (with a null value, consuming nothing)
/// iff `p` succeeds here.
pub fn lookahead<'t, I, V: 't>(name: &'static str, p: Parser<'t, I, V>) -> Parser<'t, I, ()> {
    Parser::new(name, move |input| match p.parse(input) {
        Parsed::Success(s) => Parsed::Success(Success {
            name,
            value: (),
            begin: input.pos(),
            end: input.pos(),
            context: vec![s.trace()],
        }),
        Parsed::Failure(f) => Parsed::Failure(Failure {
            name,
            message: format!("lookahead ({}) failed: {}", f.name, f.message),
            at: input.pos(),
            context: vec![f.trace()],
            cause: f.cause,
        }),
    })
}

/// Apply `p` repeatedly, collecting values, until it fails or `max`
/// repetitions are reached. Succeeds iff the repetition count is at
/// least `min`.
///
/// A successful sub-parse that consumed no input is treated as a
/// terminating condition: its value is discarded, the input stays where
/// it was, and collection stops. Without this check a zero-width matcher
/// would loop forever.
pub fn repetition<'t, I, V: 't>(
    name: &'static str,
    p: Parser<'t, I, V>,
    min: usize,
    max: Option<usize>,
) -> Parser<'t, I, Vec<V>> {
    Parser::new(name, move |input| {
        let begin = input.pos();
        let mut current = input;
        let mut values = Vec::new();
        let mut context = Vec::new();
        while max.is_none_or(|cap| values.len() < cap) {
            match p.parse(current) {
                Parsed::Success(s) => {
                    context.push(s.trace());
                    if s.end == current.pos() {
                        break; // zero-advance success: stop collecting
                    }
                    current = current.at_pos(s.end);
                    values.push(s.value);
                }
                Parsed::Failure(f) => {
                    context.push(f.trace());
                    break;
                }
            }
        }
        if values.len() < min {
            return Parsed::Failure(Failure {
                name,
                message: format!(
                    "matched {} time(s), expected at least {min}",
                    values.len()
                ),
                at: begin,
                context,
                cause: None,
            });
        }
        Parsed::Success(Success {
            name,
            value: values,
            begin,
            end: current.pos(),
            context,
        })
    })
}

/// `repetition` with no bounds: zero or more.
pub fn many<'t, I, V: 't>(name: &'static str, p: Parser<'t, I, V>) -> Parser<'t, I, Vec<V>> {
    repetition(name, p, 0, None)
}

/// `repetition` requiring at least one match.
pub fn many1<'t, I, V: 't>(name: &'static str, p: Parser<'t, I, V>) -> Parser<'t, I, Vec<V>> {
    repetition(name, p, 1, None)
}

/// Replace a success value with `f(value)`. Failures pass through
/// untouched; a panicking `f` becomes a failure with the payload as
/// `cause`.
pub fn map<'t, I, V: 't, W>(
    name: &'static str,
    p: Parser<'t, I, V>,
    f: impl Fn(V) -> W + 't,
) -> Parser<'t, I, W> {
    Parser::new(name, move |input| match p.parse(input) {
        Parsed::Success(s) => match catch_unwind(AssertUnwindSafe(|| f(s.value))) {
            Ok(value) => Parsed::Success(Success {
                name,
                value,
                begin: s.begin,
                end: s.end,
                context: s.context,
            }),
            Err(payload) => Parsed::Failure(Failure {
                name,
                message: "transform callback panicked".to_string(),
                at: s.begin,
                context: s.context,
                cause: Some(panic_text(payload.as_ref())),
            }),
        },
        Parsed::Failure(f) => Parsed::Failure(f),
    })
}

/// Post-process the *full* result — success or failure — into a complete
/// replacement result. Used to re-label a sub-parser's identity, to
/// flatten a compound value while keeping its consumed range, or to turn
/// a structurally-successful match into a failure on a semantic check.
///
/// A panicking `f` becomes a failure with the payload as `cause`.
pub fn reshape<'t, I, V: 't, W>(
    name: &'static str,
    p: Parser<'t, I, V>,
    f: impl Fn(Parsed<V>) -> Parsed<W> + 't,
) -> Parser<'t, I, W> {
    Parser::new(name, move |input| {
        let result = p.parse(input);
        match catch_unwind(AssertUnwindSafe(|| f(result))) {
            Ok(reshaped) => reshaped,
            Err(payload) => Parsed::Failure(Failure {
                name,
                message: "reshape callback panicked".to_string(),
                at: input.pos(),
                context: Vec::new(),
                cause: Some(panic_text(payload.as_ref())),
            }),
        }
    })
}
