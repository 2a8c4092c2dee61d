//! Diagram objects: open paths, closed polygons, and text runs.
//!
//! All three variants share one representation: an ordered, contiguous
//! point list plus the derived corner list. For a polygon the corners are
//! its geometric vertices; for a text run the points are the cells holding
//! its characters.

use std::fmt;

use crate::grid::Grid;
use crate::point::{Direction, Hint, Point};

// ---------------------------------------------------------------------------
// Object
// ---------------------------------------------------------------------------

/// What an [`Object`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// An open polyline.
    Path,
    /// A closed path.
    Polygon,
    /// A run of literal characters.
    Text,
}

/// A single object recovered from the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    kind: ObjectKind,
    points: Vec<Point>,
    corners: Vec<Point>,
    dashed: bool,
    chars: String,
    tag: Option<String>,
}

impl Object {
    /// Finalize a scanned point list into an object.
    ///
    /// Derives everything the renderer needs: arrow markers on the end
    /// points, the corner list and closedness, tick/dot/rounded-corner
    /// hints, the dashed flag, and the textual view of the run.
    pub(crate) fn seal(mut points: Vec<Point>, is_text: bool, grid: &Grid) -> Self {
        assert!(!points.is_empty(), "internal error: sealing an empty object");

        if grid.at(points[0]).is_arrow() {
            points[0].hint = Hint::StartMarker;
        }
        let last = points.len() - 1;
        if grid.at(points[last]).is_arrow() {
            points[last].hint = Hint::EndMarker;
        }

        let (mut corners, closed) = points_to_corners(&points);

        let mut chars = String::with_capacity(points.len());
        let mut dashed = false;
        for i in 0..points.len() {
            let glyph = grid.at(points[i]);
            if !is_text {
                if glyph.is_tick() {
                    points[i].hint = Hint::Tick;
                } else if glyph.is_dot() {
                    points[i].hint = Hint::Dot;
                }
                if glyph.is_dashed() {
                    dashed = true;
                }
                if glyph.is_rounded_corner() {
                    for corner in &mut corners {
                        if corner.same_cell(&points[i]) {
                            corner.hint = Hint::RoundedCorner;
                            points[i].hint = Hint::RoundedCorner;
                        }
                    }
                }
            }
            chars.push(glyph.0);
        }

        let kind = if is_text {
            ObjectKind::Text
        } else if closed {
            ObjectKind::Polygon
        } else {
            ObjectKind::Path
        };

        Self {
            kind,
            points,
            corners,
            dashed,
            chars,
            tag: None,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Every grid cell this object occupies, in walk order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The points at which the walk changes direction.
    #[must_use]
    pub fn corners(&self) -> &[Point] {
        &self.corners
    }

    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self.kind, ObjectKind::Polygon)
    }

    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self.kind, ObjectKind::Text)
    }

    /// Whether any cell of the object was a dashed-edge character.
    #[must_use]
    pub const fn is_dashed(&self) -> bool {
        self.dashed
    }

    /// The character content of a text run; `None` for paths and polygons.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        if self.is_text() {
            Some(&self.chars)
        } else {
            None
        }
    }

    /// The tag bound to this object, if any.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub(crate) fn set_tag(&mut self, tag: &str) {
        self.tag = Some(tag.to_owned());
    }

    /// Even-odd crossing test over the polygon's corner list, valid for
    /// convex and concave polygons alike. Always false for open paths and
    /// text.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        if !self.is_closed() {
            return false;
        }

        let px = p.x as f64;
        let py = p.y as f64;
        let mut inside = false;

        let n = self.corners.len();
        let mut j = n - 1;
        for i in 0..n {
            let (xi, yi) = (self.corners[i].x as f64, self.corners[i].y as f64);
            let (xj, yj) = (self.corners[j].x as f64, self.corners[j].y as f64);
            if ((yi < py && yj >= py) || (yj < py && yi >= py)) && (xi <= px || xj <= px) {
                if xi + (py - yi) / (yj - yi) * (xj - xi) < px {
                    inside = !inside;
                }
            }
            j = i;
        }

        inside
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_text() {
            write!(f, "Text{{{} {:?}}}", self.points[0], self.chars)
        } else {
            write!(f, "Path{{{}}}", self.points[0])
        }
    }
}

// ---------------------------------------------------------------------------
// Corner extraction
// ---------------------------------------------------------------------------

/// Extract the corners of a contiguous point list and decide whether the
/// list closes into a polygon.
///
/// A list closes when the step from its last point back to its first
/// continues the final walking direction along a horizontal, vertical, or
/// northeast step. Discovery always proceeds clockwise from the top-left
/// most point, so northeast is the only diagonal that can close.
///
/// Panics on a list whose consecutive points are not adjacent; the
/// scanners never produce one.
pub(crate) fn points_to_corners(points: &[Point]) -> (Vec<Point>, bool) {
    // Fewer than three points can neither turn nor close.
    if points.len() < 3 {
        return (points.to_vec(), false);
    }

    let step = |from: Point, to: Point| {
        Direction::between(from, to)
            .unwrap_or_else(|| panic!("internal error: discontiguous points {from} -> {to}"))
    };

    let mut out = vec![points[0]];
    let mut dir = step(points[0], points[1]);
    for i in 2..points.len() {
        let next = step(points[i - 1], points[i]);
        if next != dir {
            out.push(points[i - 1]);
            dir = next;
        }
    }

    let last = points[points.len() - 1];
    let closed = matches!(
        Direction::between(last, points[0]),
        Some(d @ (Direction::Horizontal | Direction::Vertical | Direction::NorthEast)) if d == dir
    );
    if !closed {
        out.push(last);
    }

    (out, closed)
}

// ---------------------------------------------------------------------------
// Containment queries
// ---------------------------------------------------------------------------

/// Indices of the closed polygons in `objects` containing `p`, ordered
/// outermost first.
///
/// Nesting is judged by the top-left corner: a polygon whose first corner
/// is strictly greater on both axes than the running maximum is strictly
/// more nested than everything found so far.
pub(crate) fn enclosing_indices(objects: &[Object], p: Point) -> Vec<usize> {
    let mut out = Vec::new();
    let mut max_x = -1i64;
    let mut max_y = -1i64;
    for (i, o) in objects.iter().enumerate() {
        if !o.is_closed() {
            continue;
        }
        let tl = o.corners()[0];
        if o.contains(p) && tl.x as i64 > max_x && tl.y as i64 > max_y {
            out.push(i);
            max_x = tl.x as i64;
            max_y = tl.y as i64;
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
