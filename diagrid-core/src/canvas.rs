//! The parsed canvas: the parser entry point and its result.


use crate::error::ParseResult;
use crate::grid::Grid;
use crate::object::{enclosing_indices, Object};
use crate::options::OptionsMap;
use crate::point::Point;
use crate::scan;

/// Parse a diagram into a [`Canvas`].
///
/// Tabs expand to `tab_width` columns; a width of zero lets tabs pass
/// through as a single column.
///
/// # Errors
///
/// Fails on invalid UTF-8 and on malformed tag definitions. No partial
/// result is exposed on error.
pub fn parse(data: &[u8], tab_width: usize) -> ParseResult<Canvas> {
    let mut grid = Grid::new(data, tab_width)?;

    let mut objects = scan::scan_paths(&mut grid);
    let mut options = OptionsMap::new();
    scan::scan_texts(&mut grid, &mut objects, &mut options)?;

    // Paths and polygons before text, then top-most, then left-most. The
    // sort is stable, so objects sharing a first point keep discovery
    // order.
    objects.sort_by(|l, r| {
        l.is_text()
            .cmp(&r.is_text())
            .then(l.points()[0].y.cmp(&r.points()[0].y))
            .then(l.points()[0].x.cmp(&r.points()[0].x))
    });

    Ok(Canvas {
        width: grid.width(),
        height: grid.height(),
        objects,
        options,
    })
}

/// The finalized result of a parse: grid dimensions, the sorted object
/// list, and the tag options map. Immutable once built.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    objects: Vec<Object>,
    options: OptionsMap,
}

impl Canvas {
    /// Grid dimensions in cells, `(width, height)`.
    #[must_use]
    pub const fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// All objects, sorted: non-text first, then by the first point's row,
    /// then column.
    #[must_use]
    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    /// The tag options parsed from `[tag]: {json}` definitions.
    #[must_use]
    pub const fn options(&self) -> &OptionsMap {
        &self.options
    }

    /// The closed polygons containing `p`, innermost first.
    #[must_use]
    pub fn enclosing_objects(&self, p: Point) -> Vec<&Object> {
        enclosing_indices(&self.objects, p)
            .into_iter()
            .rev()
            .map(|i| &self.objects[i])
            .collect()
    }
}
