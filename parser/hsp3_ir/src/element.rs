//! Flat outline elements emitted by the grammar layer.
//!
//! An element records *which* structural construct was recognized, its
//! display literal, and two token-index ranges: `literal_range` covers
//! just the significant name, `entire_range` covers the whole directive
//! including its body extent. Indices refer into the token stream the
//! grammar was run over; the assembler resolves them back to source
//! positions.

use std::fmt;

/// Kind of a recognized outline element.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OutlineKind {
    Label,
    Module,
    Global,
    Define,
    Const,
    Enum,
    DefFunc,
    DefCFunc,
    ModFunc,
    ModCFunc,
    ModInit,
    ModTerm,
    Func,
    CFunc,
    Cmd,
}

impl OutlineKind {
    /// Every kind, in declaration order.
    pub const ALL: [OutlineKind; 15] = [
        OutlineKind::Label,
        OutlineKind::Module,
        OutlineKind::Global,
        OutlineKind::Define,
        OutlineKind::Const,
        OutlineKind::Enum,
        OutlineKind::DefFunc,
        OutlineKind::DefCFunc,
        OutlineKind::ModFunc,
        OutlineKind::ModCFunc,
        OutlineKind::ModInit,
        OutlineKind::ModTerm,
        OutlineKind::Func,
        OutlineKind::CFunc,
        OutlineKind::Cmd,
    ];

    /// Stable lowercase name — the same spelling the directive keyword
    /// uses in source, and the spelling mask configuration accepts.
    pub const fn as_str(self) -> &'static str {
        match self {
            OutlineKind::Label => "label",
            OutlineKind::Module => "module",
            OutlineKind::Global => "global",
            OutlineKind::Define => "define",
            OutlineKind::Const => "const",
            OutlineKind::Enum => "enum",
            OutlineKind::DefFunc => "deffunc",
            OutlineKind::DefCFunc => "defcfunc",
            OutlineKind::ModFunc => "modfunc",
            OutlineKind::ModCFunc => "modcfunc",
            OutlineKind::ModInit => "modinit",
            OutlineKind::ModTerm => "modterm",
            OutlineKind::Func => "func",
            OutlineKind::CFunc => "cfunc",
            OutlineKind::Cmd => "cmd",
        }
    }

    /// Parse a kind from its lowercase name. Case-insensitive.
    pub fn from_name(name: &str) -> Option<OutlineKind> {
        OutlineKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for OutlineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An inclusive range of token indices: `first..=last`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenRange {
    pub first: u32,
    pub last: u32,
}

impl TokenRange {
    /// Create a new range.
    ///
    /// # Contract
    ///
    /// `first <= last`. A single-token range has `first == last`.
    #[inline]
    pub const fn new(first: u32, last: u32) -> Self {
        TokenRange { first, last }
    }

    /// A range covering exactly one token.
    #[inline]
    pub const fn single(index: u32) -> Self {
        TokenRange {
            first: index,
            last: index,
        }
    }
}

impl fmt::Display for TokenRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.first, self.last)
    }
}

/// One recognized structural unit, immutable after creation.
///
/// Created once per grammar-rule match, consumed by the assembler, then
/// discarded — there is no shared ownership beyond a single parse pass.
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutlineElement {
    pub kind: OutlineKind,
    /// Display text: the function/constant name, `*label`, or the module
    /// name (raw, quotes included for the `#module"name"` form).
    pub literal: String,
    /// Token indices of just the significant name.
    pub literal_range: TokenRange,
    /// Token indices of the whole construct, marker to body end.
    pub entire_range: TokenRange,
}

impl OutlineElement {
    /// Create a new element.
    pub fn new(
        kind: OutlineKind,
        literal: impl Into<String>,
        literal_range: TokenRange,
        entire_range: TokenRange,
    ) -> Self {
        OutlineElement {
            kind,
            literal: literal.into(),
            literal_range,
            entire_range,
        }
    }
}

impl fmt::Display for OutlineElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:?} literal={} entire={}",
            self.kind, self.literal, self.literal_range, self.entire_range
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn kind_names_round_trip() {
        for kind in OutlineKind::ALL {
            assert_eq!(OutlineKind::from_name(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn from_name_is_case_insensitive() {
        assert_eq!(
            OutlineKind::from_name("DefFunc"),
            Some(OutlineKind::DefFunc)
        );
        assert_eq!(OutlineKind::from_name("MODULE"), Some(OutlineKind::Module));
    }

    #[test]
    fn from_name_rejects_unknown() {
        assert_eq!(OutlineKind::from_name("deffun"), None);
        assert_eq!(OutlineKind::from_name(""), None);
    }

    #[test]
    fn element_display() {
        let elm = OutlineElement::new(
            OutlineKind::Label,
            "*start",
            TokenRange::new(0, 1),
            TokenRange::new(0, 1),
        );
        assert_eq!(
            format!("{elm}"),
            "label \"*start\" literal=0..=1 entire=0..=1"
        );
    }
}
