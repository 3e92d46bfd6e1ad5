//! Source positions as (row, column) pairs.
//!
//! Rows and columns are both zero-based. Columns count Unicode scalar
//! values, not bytes — a 4-byte emoji advances the column by one. Rows
//! advance only at line breaks (`\n`, `\r`, or `\r\n`, which counts as a
//! single break).

use std::fmt;

/// A zero-based (row, column) position in the source text.
///
/// Layout: 8 bytes total.
///
/// # Invariant
///
/// `column` is measured in Unicode scalar values from the start of the
/// row, never in bytes.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub row: u32,
    pub column: u32,
}

impl Point {
    /// The origin position (row 0, column 0).
    pub const ZERO: Point = Point { row: 0, column: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(row: u32, column: u32) -> Self {
        Point { row, column }
    }

    /// Returns the point `columns` scalar values to the right, same row.
    #[inline]
    #[must_use]
    pub const fn right(self, columns: u32) -> Point {
        Point {
            row: self.row,
            column: self.column + columns,
        }
    }

    /// Returns the position reached by reading `text` starting at `self`.
    ///
    /// Walks the text one scalar value at a time: `\n`, `\r`, and `\r\n`
    /// (as a single break) advance the row and reset the column to zero;
    /// every other scalar advances the column by one.
    ///
    /// This is the single source of truth for multi-line token end
    /// positions — block comments and `{"..."}` strings both use it.
    #[must_use]
    pub fn advanced_by(self, text: &str) -> Point {
        let mut point = self;
        let mut chars = text.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '\n' => {
                    point.row += 1;
                    point.column = 0;
                }
                '\r' => {
                    // \r\n is one line break, not two.
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    point.row += 1;
                    point.column = 0;
                }
                _ => point.column += 1,
            }
        }
        point
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

/// A half-open source region: `begin` is the first character's position,
/// `end` is the position just past the last character.
///
/// Multi-line tokens (block comments, `{"..."}` strings) carry
/// `begin.row < end.row`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub begin: Point,
    pub end: Point,
}

impl Location {
    /// Create a new location.
    #[inline]
    pub const fn new(begin: Point, end: Point) -> Self {
        Location { begin, end }
    }

    /// A single-row location starting at `begin` and spanning `columns`
    /// scalar values.
    #[inline]
    pub const fn columns(begin: Point, columns: u32) -> Self {
        Location {
            begin,
            end: begin.right(columns),
        }
    }

    /// Replace the end point, keeping the begin point.
    #[inline]
    #[must_use]
    pub const fn until(self, end: Point) -> Location {
        Location {
            begin: self.begin,
            end,
        }
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}-{:?}", self.begin, self.end)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.begin, self.end)
    }
}

// Size assertions to prevent accidental regressions.
#[cfg(target_pointer_width = "64")]
const _: () = {
    assert!(std::mem::size_of::<Point>() == 8);
    assert!(std::mem::size_of::<Location>() == 16);
};

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn right_moves_along_the_row() {
        let p = Point::new(3, 5);
        assert_eq!(p.right(4), Point::new(3, 9));
        assert_eq!(p.right(0), p);
    }

    #[test]
    fn advanced_by_single_line() {
        let p = Point::new(2, 4).advanced_by("hello");
        assert_eq!(p, Point::new(2, 9));
    }

    #[test]
    fn advanced_by_counts_scalars_not_bytes() {
        // Emoji is 4 bytes but a single scalar value.
        let p = Point::ZERO.advanced_by("a\u{1F600}b");
        assert_eq!(p, Point::new(0, 3));
    }

    #[test]
    fn advanced_by_lf() {
        let p = Point::new(0, 7).advanced_by("ab\ncd");
        assert_eq!(p, Point::new(1, 2));
    }

    #[test]
    fn advanced_by_crlf_is_one_break() {
        let p = Point::ZERO.advanced_by("ab\r\ncd");
        assert_eq!(p, Point::new(1, 2));
    }

    #[test]
    fn advanced_by_lone_cr() {
        let p = Point::ZERO.advanced_by("ab\rcd");
        assert_eq!(p, Point::new(1, 2));
    }

    #[test]
    fn advanced_by_empty_is_identity() {
        let p = Point::new(9, 9);
        assert_eq!(p.advanced_by(""), p);
    }

    #[test]
    fn advanced_by_trailing_newline() {
        let p = Point::ZERO.advanced_by("abc\n");
        assert_eq!(p, Point::new(1, 0));
    }

    #[test]
    fn location_columns() {
        let loc = Location::columns(Point::new(1, 2), 3);
        assert_eq!(loc.begin, Point::new(1, 2));
        assert_eq!(loc.end, Point::new(1, 5));
    }

    #[test]
    fn location_until_replaces_end() {
        let loc = Location::columns(Point::new(0, 0), 2).until(Point::new(4, 1));
        assert_eq!(loc.begin, Point::ZERO);
        assert_eq!(loc.end, Point::new(4, 1));
    }

    #[test]
    fn display_forms() {
        assert_eq!(format!("{}", Point::new(1, 2)), "1:2");
        let loc = Location::new(Point::new(0, 1), Point::new(2, 3));
        assert_eq!(format!("{loc}"), "0:1-2:3");
    }

    #[test]
    fn point_ordering_is_row_major() {
        assert!(Point::new(1, 9) < Point::new(2, 0));
        assert!(Point::new(2, 1) < Point::new(2, 4));
    }
}
