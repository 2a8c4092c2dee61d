//! Grid scanning: path discovery and text extraction.
//!
//! Two passes run over the grid in row-major order.
//!
//! The first pass performs a recursive depth-first search from every
//! unvisited cell that can start a path. The search claims cells through
//! the visited bitmap as it walks, forks at junctions, and finalizes an
//! object per terminal branch. Depth-first order matters: a closed polygon
//! is recognized when the deepest branch walks the full circuit and comes
//! back to rest directly below its starting cell.
//!
//! The second pass reads text runs rightward from every remaining cell
//! that can start text. A small state machine rides along to recognize
//! `[tag]` references and `[tag]: {json}` definitions and bind them to
//! objects and to the canvas options.

use crate::error::ParseResult;
use crate::grid::Grid;
use crate::object::{enclosing_indices, Object};
use crate::options::{parse_tag_definition, OptionsMap};
use crate::point::Point;

// ---------------------------------------------------------------------------
// Pass one: paths
// ---------------------------------------------------------------------------

/// Discover every path and polygon in the grid.
pub(crate) fn scan_paths(grid: &mut Grid) -> Vec<Object> {
    let mut objects = Vec::new();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let p = Point::new(x, y);
            if grid.is_visited(p) || !grid.at(p).is_path_start() {
                continue;
            }
            // A start cell may fan out into several connected paths, open
            // or closed; the search returns all of them.
            grid.visit(p);
            let found = scan_path(grid, vec![p]);
            for obj in &found {
                // Cells released by dead-end backtracking may still sit in
                // a finished object; reclaim every point it owns.
                for &q in obj.points() {
                    grid.visit(q);
                }
            }
            objects.extend(found);
        }
    }
    objects
}

/// Extend the partial path `points` in every direction it can go, and
/// return the objects completed beneath it.
fn scan_path(grid: &mut Grid, points: Vec<Point>) -> Vec<Object> {
    let cur = points[points.len() - 1];
    let next = reachable_neighbours(grid, cur);

    if next.is_empty() {
        if points.len() == 1 {
            // A lone cell is not a path. Release it so another path may
            // enter from a different side.
            grid.unvisit(cur);
            return Vec::new();
        }
        return vec![Object::seal(points, false, grid)];
    }

    // Arriving directly below the start cell closes a circuit. An open
    // line may still spawn from the closing corner, so keep scanning from
    // here with a fresh path.
    if cur.x == points[0].x && cur.y == points[0].y + 1 {
        let mut out = vec![Object::seal(points, false, grid)];
        out.extend(scan_path(grid, vec![cur]));
        return out;
    }

    let mut out = Vec::new();
    for n in next {
        // A sibling branch may have claimed the cell since the neighbour
        // list was computed.
        if grid.is_visited(n) {
            continue;
        }
        grid.visit(n);
        let mut extended = points.clone();
        extended.push(n);
        out.extend(scan_path(grid, extended));
    }
    out
}

/// The unvisited neighbours that can continue a path through `pos`:
/// orthogonal steps where both cells support the axis, and diagonal steps
/// admitted by the glyph transition rule.
fn reachable_neighbours(grid: &Grid, pos: Point) -> Vec<Point> {
    assert!(
        grid.is_visited(pos),
        "internal error: expanding unvisited cell {pos}"
    );

    let ch = grid.at(pos);
    let mut out = Vec::new();

    if ch.can_horizontal() {
        let mut step = |n: Point| {
            if !grid.is_visited(n) && grid.at(n).can_horizontal() {
                out.push(n);
            }
        };
        if grid.can_left(pos) {
            step(Point::new(pos.x - 1, pos.y));
        }
        if grid.can_right(pos) {
            step(Point::new(pos.x + 1, pos.y));
        }
    }

    if ch.can_vertical() {
        let mut step = |n: Point| {
            if !grid.is_visited(n) && grid.at(n).can_vertical() {
                out.push(n);
            }
        };
        if grid.can_up(pos) {
            step(Point::new(pos.x, pos.y - 1));
        }
        if grid.can_down(pos) {
            step(Point::new(pos.x, pos.y + 1));
        }
    }

    {
        let mut step = |n: Point| {
            if !grid.is_visited(n) && grid.at(n).can_diagonal_from(ch) {
                out.push(n);
            }
        };
        if grid.can_up(pos) {
            if grid.can_left(pos) {
                step(Point::new(pos.x - 1, pos.y - 1));
            }
            if grid.can_right(pos) {
                step(Point::new(pos.x + 1, pos.y - 1));
            }
        }
        if grid.can_down(pos) {
            if grid.can_left(pos) {
                step(Point::new(pos.x - 1, pos.y + 1));
            }
            if grid.can_right(pos) {
                step(Point::new(pos.x + 1, pos.y + 1));
            }
        }
    }

    out
}

// ---------------------------------------------------------------------------
// Pass two: text
// ---------------------------------------------------------------------------

/// Tag recognition state, riding along the text scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagState {
    /// No tag seen; plain text.
    Plain,
    /// Between `[` and `]`, accumulating the tag name.
    InTag,
    /// Past `]`: a tag reference unless a `:` follows.
    Reference,
    /// Past `]:`, accumulating the JSON body.
    Definition,
    /// Bracket syntax seen but not completed; plain text after all.
    Abandoned,
}

/// Extract every text run from the cells the path pass left unclaimed,
/// binding tags as they are found.
pub(crate) fn scan_texts(
    grid: &mut Grid,
    objects: &mut Vec<Object>,
    options: &mut OptionsMap,
) -> ParseResult<()> {
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let p = Point::new(x, y);
            if grid.is_visited(p) || !grid.at(p).is_text_start() {
                continue;
            }
            if let Some(obj) = scan_text(grid, objects, options, p)? {
                for &q in obj.points() {
                    grid.visit(q);
                }
                objects.push(obj);
            }
        }
    }
    Ok(())
}

/// Read one text run rightward from `start`.
///
/// The run stops at a visited cell (collision with a path), at a
/// non-printable character, or after three consecutive spaces. Trailing
/// whitespace is trimmed; a run that trims to nothing yields `None`.
fn scan_text(
    grid: &Grid,
    objects: &mut Vec<Object>,
    options: &mut OptionsMap,
    start: Point,
) -> ParseResult<Option<Object>> {
    let mut points = vec![start];
    let mut space_streak = 0;
    let mut cur = start;

    let mut state = TagState::Plain;
    let mut tag = String::new();
    let mut tag_end = start;
    let mut json = String::new();

    while grid.can_right(cur) {
        if cur.x == start.x && grid.at(cur).is_tag_open() {
            state = TagState::InTag;
        } else if state == TagState::InTag && grid.at(cur).is_tag_close() {
            state = TagState::Reference;
            tag_end = cur;
        }

        cur.x += 1;
        if grid.is_visited(cur) {
            // Ran into a previously identified path.
            break;
        }
        let ch = grid.at(cur);
        if !ch.is_text_cont() {
            break;
        }

        if matches!(state, TagState::Plain | TagState::Abandoned) && ch.is_space() {
            space_streak += 1;
            if space_streak > 2 {
                break;
            }
        } else {
            space_streak = 0;
        }

        match state {
            TagState::InTag => {
                if !ch.is_tag_close() {
                    tag.push(ch.0);
                }
            }
            TagState::Reference => {
                if ch.is_tag_sep() {
                    state = TagState::Definition;
                } else if !ch.is_space() {
                    state = TagState::Abandoned;
                }
            }
            TagState::Definition => json.push(ch.0),
            TagState::Plain | TagState::Abandoned => {}
        }

        points.push(cur);
    }

    let mut obj = Object::seal(points, true, grid);

    match state {
        TagState::Reference => {
            // A reference labels both the text itself and the polygon the
            // text sits in, so rendering keys colour the container while
            // control keys reach the text.
            let enclosing = enclosing_indices(objects, start);
            if let Some(&i) = enclosing
                .iter()
                .rev()
                .find(|&&i| objects[i].contains(tag_end))
            {
                objects[i].set_tag(&tag);
            }
            obj.set_tag(&tag);
        }
        TagState::Definition => {
            // A coordinate tag targets the object whose first corner sits
            // at the named cell.
            if let Some((x, y)) = parse_tag_coordinates(&tag) {
                let target = Point::new(x, y);
                if let Some(o) = objects
                    .iter_mut()
                    .find(|o| o.corners()[0].same_cell(&target))
                {
                    o.set_tag(&tag);
                }
            }
            let opts = parse_tag_definition(&tag, &json).map_err(|e| e.with_line(start.y + 1))?;
            options.insert(tag.clone(), opts);
            // The definition text keeps its tag so `a2s:delref` can
            // suppress its own rendering.
            obj.set_tag(&tag);
        }
        TagState::Plain | TagState::InTag | TagState::Abandoned => {}
    }

    // Trim trailing whitespace off the run.
    let mut n = obj.points().len();
    while n > 0 && grid.at(obj.points()[n - 1]).is_space() {
        n -= 1;
    }
    if n == 0 {
        return Ok(None);
    }
    if n < obj.points().len() {
        let trimmed = obj.points()[..n].to_vec();
        let tag = obj.tag().map(str::to_owned);
        obj = Object::seal(trimmed, true, grid);
        if let Some(t) = tag {
            obj.set_tag(&t);
        }
    }
    Ok(Some(obj))
}

/// Parse an `X,Y` coordinate tag into grid column and row.
fn parse_tag_coordinates(tag: &str) -> Option<(usize, usize)> {
    let (x, y) = tag.split_once(',')?;
    let x = x.trim().parse().ok()?;
    let y = y.trim().parse().ok()?;
    Some((x, y))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
