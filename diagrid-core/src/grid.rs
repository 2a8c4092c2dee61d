//! The uniform-width character grid and its visited bitmap.
//!
//! Construction normalizes raw input into a rectangle:
//!
//! 1. the input is split on `\n`; the line count is the grid height;
//! 2. each line must be valid UTF-8 (the error names the offending line);
//! 3. horizontal tabs are expanded to the next tab stop, or pass through as
//!    a single column when the tab width is zero;
//! 4. the width is the widest line in Unicode scalar values; shorter lines
//!    are right-padded with spaces.
//!
//! The visited bitmap is scanner state: a cell is marked when a path or
//! text object claims it. Unvisiting a cell that is not visited is an
//! internal inconsistency and panics.

use crate::error::{ParseError, ParseErrorKind, ParseResult};
use crate::glyph::Glyph;
use crate::point::Point;

/// The parsed character matrix plus the scanners' visited bitmap.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<char>,
    visited: Vec<bool>,
}

impl Grid {
    /// Build a grid from raw bytes, expanding tabs to `tab_width` columns.
    ///
    /// # Errors
    ///
    /// Returns [`ParseErrorKind::InvalidUtf8`] naming the 1-based line when
    /// any line fails UTF-8 validation.
    pub fn new(data: &[u8], tab_width: usize) -> ParseResult<Self> {
        let mut lines = Vec::new();
        for (i, raw) in data.split(|&b| b == b'\n').enumerate() {
            let line = std::str::from_utf8(raw).map_err(|e| {
                ParseError::new(ParseErrorKind::InvalidUtf8, format!("invalid UTF-8: {e}"))
                    .with_line(i + 1)
            })?;
            lines.push(expand_tabs(line, tab_width));
        }

        let height = lines.len();
        let width = lines.iter().map(Vec::len).max().unwrap_or(0);

        let mut cells = vec![' '; width * height];
        for (y, line) in lines.iter().enumerate() {
            cells[y * width..y * width + line.len()].copy_from_slice(line);
        }

        Ok(Self {
            width,
            height,
            cells,
            visited: vec![false; width * height],
        })
    }

    /// Grid width in cells.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// The glyph at `p`. Panics when `p` is out of bounds.
    #[must_use]
    pub fn at(&self, p: Point) -> Glyph {
        Glyph(self.cells[self.index(p)])
    }

    #[must_use]
    pub fn is_visited(&self, p: Point) -> bool {
        self.visited[self.index(p)]
    }

    pub fn visit(&mut self, p: Point) {
        let i = self.index(p);
        self.visited[i] = true;
    }

    /// Give a cell back to the pool of unclaimed cells, so that another
    /// path may enter it from a different side.
    pub fn unvisit(&mut self, p: Point) {
        let i = self.index(p);
        assert!(self.visited[i], "internal error: unvisiting {p}");
        self.visited[i] = false;
    }

    #[must_use]
    pub const fn can_left(&self, p: Point) -> bool {
        p.x > 0
    }

    #[must_use]
    pub const fn can_right(&self, p: Point) -> bool {
        p.x + 1 < self.width
    }

    #[must_use]
    pub const fn can_up(&self, p: Point) -> bool {
        p.y > 0
    }

    #[must_use]
    pub const fn can_down(&self, p: Point) -> bool {
        p.y + 1 < self.height
    }

    fn index(&self, p: Point) -> usize {
        assert!(
            p.x < self.width && p.y < self.height,
            "internal error: {p} outside {}x{} grid",
            self.width,
            self.height
        );
        p.y * self.width + p.x
    }
}

/// Expand horizontal tabs to the next multiple of `tab_width` columns.
/// A width of zero disables expansion: tabs pass through as one column.
fn expand_tabs(line: &str, tab_width: usize) -> Vec<char> {
    let mut out = Vec::with_capacity(line.len());
    for c in line.chars() {
        if c == '\t' && tab_width > 0 {
            let pad = tab_width - out.len() % tab_width;
            for _ in 0..pad {
                out.push(' ');
            }
        } else {
            out.push(c);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- construction --

    #[test]
    fn empty_input() {
        let g = Grid::new(b"", 8).unwrap();
        assert_eq!(g.width(), 0);
        assert_eq!(g.height(), 1);
    }

    #[test]
    fn ragged_lines_are_padded() {
        let g = Grid::new(b"ab\nabcd\na", 8).unwrap();
        assert_eq!(g.width(), 4);
        assert_eq!(g.height(), 3);
        assert_eq!(g.at(Point::new(2, 0)), Glyph(' '));
        assert_eq!(g.at(Point::new(3, 1)), Glyph('d'));
        assert_eq!(g.at(Point::new(3, 2)), Glyph(' '));
    }

    #[test]
    fn width_counts_scalar_values_not_bytes() {
        let g = Grid::new("héé\nab".as_bytes(), 8).unwrap();
        assert_eq!(g.width(), 3);
        assert_eq!(g.at(Point::new(1, 0)), Glyph('é'));
    }

    #[test]
    fn invalid_utf8_names_the_line() {
        let err = Grid::new(b"ok\n\xff\xfe\nok", 8).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidUtf8);
        assert_eq!(err.line, Some(2));
    }

    // -- tab expansion --

    #[test]
    fn tab_expands_to_next_stop() {
        let g = Grid::new(b"\tx", 4).unwrap();
        assert_eq!(g.width(), 5);
        assert_eq!(g.at(Point::new(4, 0)), Glyph('x'));

        let g = Grid::new(b"ab\tx", 4).unwrap();
        assert_eq!(g.at(Point::new(2, 0)), Glyph(' '));
        assert_eq!(g.at(Point::new(4, 0)), Glyph('x'));
    }

    #[test]
    fn tab_at_stop_advances_a_full_stop() {
        let g = Grid::new(b"abcd\tx", 4).unwrap();
        assert_eq!(g.at(Point::new(8, 0)), Glyph('x'));
    }

    #[test]
    fn zero_tab_width_disables_expansion() {
        let g = Grid::new(b"\tx", 0).unwrap();
        assert_eq!(g.width(), 2);
        assert_eq!(g.at(Point::new(1, 0)), Glyph('x'));
    }

    // -- visited bitmap --

    #[test]
    fn visit_and_unvisit() {
        let mut g = Grid::new(b"ab", 8).unwrap();
        let p = Point::new(1, 0);
        assert!(!g.is_visited(p));
        g.visit(p);
        assert!(g.is_visited(p));
        g.unvisit(p);
        assert!(!g.is_visited(p));
    }

    #[test]
    #[should_panic(expected = "unvisiting")]
    fn unvisit_unvisited_panics() {
        let mut g = Grid::new(b"ab", 8).unwrap();
        g.unvisit(Point::new(0, 0));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn out_of_bounds_access_panics() {
        let g = Grid::new(b"ab", 8).unwrap();
        let _ = g.at(Point::new(2, 0));
    }

    // -- edge movement --

    #[test]
    fn movement_bounds() {
        let g = Grid::new(b"abc\ndef", 8).unwrap();
        assert!(!g.can_left(Point::new(0, 0)));
        assert!(g.can_left(Point::new(1, 0)));
        assert!(g.can_right(Point::new(1, 0)));
        assert!(!g.can_right(Point::new(2, 0)));
        assert!(!g.can_up(Point::new(0, 0)));
        assert!(g.can_down(Point::new(0, 0)));
        assert!(!g.can_down(Point::new(0, 1)));
    }
}
