//! Parse results as a proper sum type.
//!
//! [`Parsed`] is either a [`Success`] or a [`Failure`]; there are no
//! optional "maybe it worked" fields to forget to check. A failure is a
//! first-class value, not an exception — `choice` consumes it to try the
//! next alternative, `repetition` consumes it to stop collecting, and
//! `option`/`negation` invert or absorb it. Only if a caller decides to
//! surface one does it act as an error ([`Failure`] implements
//! [`std::error::Error`]).
//!
//! Every composite result also carries a [`Trace`] trail of the child
//! attempts that produced it. The trail is purely diagnostic: nothing in
//! the engine reads it back for control flow.

use std::fmt;
use thiserror::Error;

/// How one child attempt ended, as recorded in a [`Trace`].
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum TraceOutcome {
    Matched,
    Failed,
}

/// Diagnostic snapshot of one parse attempt.
///
/// A `Trace` deliberately drops the typed value — keeping the full child
/// result would force every composite to be generic over every child's
/// value type. What remains is exactly what a "why did this not parse"
/// report needs: rule name, outcome, the input range involved, the
/// failure message if any, and the child's own trail.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Trace {
    pub name: &'static str,
    pub outcome: TraceOutcome,
    /// Position where the attempt started.
    pub begin: usize,
    /// Position after the attempt (equal to `begin` for failures and
    /// non-consuming successes).
    pub end: usize,
    /// Failure message, if the attempt failed.
    pub message: Option<String>,
    /// The attempt's own context trail.
    pub children: Vec<Trace>,
}

impl Trace {
    fn render(&self, depth: usize, out: &mut String) {
        for _ in 0..depth {
            out.push_str("  ");
        }
        let mark = match self.outcome {
            TraceOutcome::Matched => "+",
            TraceOutcome::Failed => "-",
        };
        out.push_str(&format!("{mark} {} [{}..{}]", self.name, self.begin, self.end));
        if let Some(message) = &self.message {
            out.push_str(&format!(": {message}"));
        }
        out.push('\n');
        for child in &self.children {
            child.render(depth + 1, out);
        }
    }
}

/// A successful parse: the produced value plus the consumed range.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Success<V> {
    /// The rule that produced this result. Assigned by the combinator
    /// itself, never inferred.
    pub name: &'static str,
    pub value: V,
    /// Position where the match started.
    pub begin: usize,
    /// Position of the next unconsumed element (exclusive end).
    pub end: usize,
    /// Diagnostic trail of child attempts.
    pub context: Vec<Trace>,
}

impl<V> Success<V> {
    /// Diagnostic snapshot of this success.
    pub fn trace(&self) -> Trace {
        Trace {
            name: self.name,
            outcome: TraceOutcome::Matched,
            begin: self.begin,
            end: self.end,
            message: None,
            children: self.context.clone(),
        }
    }
}

/// A failed parse: rule name, human-readable message, the position the
/// failure applies to, the diagnostic trail, and — when a user-supplied
/// callback panicked — the captured panic payload as `cause`.
#[derive(Clone, Eq, PartialEq, Debug, Error)]
#[error("{name}: {message}")]
pub struct Failure {
    pub name: &'static str,
    pub message: String,
    /// Position where the failing attempt started.
    pub at: usize,
    /// Diagnostic trail of child attempts, the failing one included.
    pub context: Vec<Trace>,
    /// Panic payload text from a misbehaving callback, if that is what
    /// produced this failure.
    pub cause: Option<String>,
}

impl Failure {
    /// A bare failure with no context trail.
    pub fn new(name: &'static str, message: impl Into<String>, at: usize) -> Self {
        Failure {
            name,
            message: message.into(),
            at,
            context: Vec::new(),
            cause: None,
        }
    }

    /// The standard failure for parsers that need at least one element.
    pub fn empty_input(name: &'static str, at: usize) -> Self {
        Failure::new(name, "input is empty", at)
    }

    /// Diagnostic snapshot of this failure.
    pub fn trace(&self) -> Trace {
        Trace {
            name: self.name,
            outcome: TraceOutcome::Failed,
            begin: self.at,
            end: self.at,
            message: Some(self.message.clone()),
            children: self.context.clone(),
        }
    }

    /// Multi-line report: the failure line followed by the indented
    /// context trail.
    pub fn report(&self) -> String {
        let mut out = format!("{self}\n");
        if let Some(cause) = &self.cause {
            out.push_str(&format!("cause: {cause}\n"));
        }
        for trace in &self.context {
            trace.render(1, &mut out);
        }
        out
    }
}

/// The outcome of running a parser.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Parsed<V> {
    Success(Success<V>),
    Failure(Failure),
}

impl<V> Parsed<V> {
    /// Construct a success.
    pub fn success(name: &'static str, value: V, begin: usize, end: usize) -> Self {
        Parsed::Success(Success {
            name,
            value,
            begin,
            end,
            context: Vec::new(),
        })
    }

    /// Returns `true` for the success variant.
    pub fn is_success(&self) -> bool {
        matches!(self, Parsed::Success(_))
    }

    /// Diagnostic snapshot of either variant.
    pub fn trace(&self) -> Trace {
        match self {
            Parsed::Success(s) => s.trace(),
            Parsed::Failure(f) => f.trace(),
        }
    }

    /// Unwrap into a `Result`, for callers at the edge of the engine.
    pub fn into_result(self) -> Result<Success<V>, Failure> {
        match self {
            Parsed::Success(s) => Ok(s),
            Parsed::Failure(f) => Err(f),
        }
    }
}

impl<V: fmt::Debug> fmt::Display for Parsed<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parsed::Success(s) => {
                write!(f, "{}: matched [{}..{}] {:?}", s.name, s.begin, s.end, s.value)
            }
            Parsed::Failure(e) => write!(f, "{e}"),
        }
    }
}
