//! Grid points and renderer hints.

use std::fmt;

// ---------------------------------------------------------------------------
// Render hints
// ---------------------------------------------------------------------------

/// A suggestion to the renderer about how a point should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Hint {
    /// Nothing special about this point.
    #[default]
    None,
    /// A corner that should be drawn as a quadratic curve.
    RoundedCorner,
    /// The point carries an SVG `marker-start` arrowhead.
    StartMarker,
    /// The point carries an SVG `marker-end` arrowhead.
    EndMarker,
    /// A strike-through marker on a line.
    Tick,
    /// A filled dot on a line.
    Dot,
}

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A cell coordinate in the grid, `(0, 0)` at the top-left, plus a render
/// hint. Points are by-value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: usize,
    pub y: usize,
    pub hint: Hint,
}

impl Point {
    /// A point with no hint.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            hint: Hint::None,
        }
    }

    /// Whether two points address the same grid cell, hints aside.
    #[must_use]
    pub const fn same_cell(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Step direction
// ---------------------------------------------------------------------------

/// The direction of a single step between two adjacent points.
///
/// Horizontal and vertical steps do not distinguish their sense (left vs
/// right, up vs down): a straight run read in either order is the same
/// direction, and a U-turn along the same axis is not a corner. Diagonal
/// steps keep all four compass variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Horizontal,
    Vertical,
    SouthEast,
    SouthWest,
    NorthWest,
    NorthEast,
}

impl Direction {
    /// Classify the step from `from` to `to`, or `None` when the points are
    /// not adjacent.
    #[must_use]
    pub fn between(from: Point, to: Point) -> Option<Self> {
        let dx = to.x as i64 - from.x as i64;
        let dy = to.y as i64 - from.y as i64;
        match (dx, dy) {
            (-1 | 1, 0) => Some(Self::Horizontal),
            (0, -1 | 1) => Some(Self::Vertical),
            (1, 1) => Some(Self::SouthEast),
            (-1, 1) => Some(Self::SouthWest),
            (-1, -1) => Some(Self::NorthWest),
            (1, -1) => Some(Self::NorthEast),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
