//! SVG renderer for parsed diagrams.
//!
//! Converts a [`Canvas`] into an SVG [`Document`] using the `svg` crate.
//!
//! Key design points:
//! - Grid cells map to `scale_x` by `scale_y` pixel boxes; a point renders
//!   at the center of its cell.
//! - Objects render in three passes in canvas order: closed polygons,
//!   open paths, then text. Polygons go first so their fill never hides a
//!   line.
//! - Rounded corners become quadratic Bezier curves through the corner
//!   cell; the curve only comes out right because polygons are discovered
//!   clockwise.
//! - Tag options pass through as element attributes, except the `a2s:`
//!   control keys: `a2s:label` replaces a text run's content, `a2s:delref`
//!   suppresses the tagged text entirely, and `a2s:link` wraps the element
//!   in an anchor.

use diagrid_core::object::Object;
use diagrid_core::options::{self, OptionSet, Value};
use diagrid_core::point::{Hint, Point};
use diagrid_core::Canvas;
use svg::node::element::{Anchor, Circle, Definitions, Group, Line, Marker, Path as SvgPath, Text as SvgText};
use svg::Document;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Options controlling SVG output.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Horizontal pixels per grid cell. Default: 9.
    pub scale_x: f64,
    /// Vertical pixels per grid cell. Default: 16.
    pub scale_y: f64,
    /// Font stack for text runs.
    pub font_family: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale_x: 9.0,
            scale_y: 16.0,
            font_family:
                "Consolas,Monaco,Anonymous Pro,Anonymous,Bitstream Sans Mono,monospace".to_owned(),
        }
    }
}

/// Render a [`Canvas`] to an SVG [`Document`] with default options.
#[must_use]
pub fn render(canvas: &Canvas) -> Document {
    render_with_options(canvas, &RenderOptions::default())
}

/// Render a [`Canvas`] to an SVG string.
#[must_use]
pub fn render_to_string(canvas: &Canvas) -> String {
    render(canvas).to_string()
}

/// Render a [`Canvas`] to an SVG [`Document`].
#[must_use]
pub fn render_with_options(canvas: &Canvas, opts: &RenderOptions) -> Document {
    let (w, h) = canvas.size();
    let width = w as f64 * opts.scale_x + 10.0;
    let height = h as f64 * opts.scale_y + 10.0;

    let mut closed = Group::new()
        .set("id", "closed")
        .set("stroke", "#000")
        .set("stroke-width", 2)
        .set("fill", "none");
    let mut lines = Group::new()
        .set("id", "lines")
        .set("stroke", "#000")
        .set("stroke-width", 2)
        .set("fill", "none");
    let mut text = Group::new()
        .set("id", "text")
        .set("fill", "#000")
        .set("stroke", "none")
        .set(
            "style",
            format!(
                "font-family:{};font-size:{}px",
                opts.font_family,
                fmt_coord(0.95 * opts.scale_y)
            ),
        );

    for obj in canvas.objects() {
        let tag_options = obj.tag().and_then(|t| canvas.options().get(t));
        if obj.is_text() {
            if let Some(node) = render_text(obj, tag_options, opts) {
                text = add_in_anchor(text, node, tag_options);
            }
        } else if obj.is_closed() {
            closed = add_in_anchor(closed, render_polygon(obj, tag_options, opts), tag_options);
        } else {
            lines = add_in_anchor(lines, render_line(obj, tag_options, opts), tag_options);
        }
    }

    Document::new()
        .set("xmlns", "http://www.w3.org/2000/svg")
        .set("xmlns:xlink", "http://www.w3.org/1999/xlink")
        .set("version", "1.1")
        .set("width", format!("{}px", fmt_coord(width)))
        .set("height", format!("{}px", fmt_coord(height)))
        .add(arrow_defs())
        .add(closed)
        .add(lines)
        .add(text)
}

// ---------------------------------------------------------------------------
// Markers
// ---------------------------------------------------------------------------

/// Arrowhead definitions. `Pointer` points along the path direction and
/// serves `marker-end`; `iPointer` is its mirror for `marker-start`, where
/// the head must point away from the line.
fn arrow_defs() -> Definitions {
    let pointer = Marker::new()
        .set("id", "Pointer")
        .set("viewBox", "0 0 10 10")
        .set("refX", 5)
        .set("refY", 5)
        .set("markerUnits", "strokeWidth")
        .set("markerWidth", 8)
        .set("markerHeight", 7)
        .set("orient", "auto")
        .add(SvgPath::new().set("d", "M 0 0 L 10 5 L 0 10 z"));
    let inverted = Marker::new()
        .set("id", "iPointer")
        .set("viewBox", "0 0 10 10")
        .set("refX", 5)
        .set("refY", 5)
        .set("markerUnits", "strokeWidth")
        .set("markerWidth", 8)
        .set("markerHeight", 7)
        .set("orient", "auto")
        .add(SvgPath::new().set("d", "M 10 0 L 10 10 L 0 5 z"));
    Definitions::new().add(pointer).add(inverted)
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// The pixel center of a grid cell.
fn cell_center(p: Point, opts: &RenderOptions) -> (f64, f64) {
    (
        p.x as f64 * opts.scale_x + opts.scale_x / 2.0,
        p.y as f64 * opts.scale_y + opts.scale_y / 2.0,
    )
}

/// Offset used to approach a rounded corner before curving through it.
const CURVE_OFFSET: f64 = 10.0;

/// Build the `d` attribute through a corner list. Rounded corners emit a
/// line to an approach point followed by a quadratic curve through the
/// corner; everything else is straight lines.
fn corners_to_d(corners: &[Point], close: bool, opts: &RenderOptions) -> String {
    let mut d = String::new();
    let n = corners.len();

    for (i, corner) in corners.iter().enumerate() {
        let (cx, cy) = cell_center(*corner, opts);
        if corner.hint == Hint::RoundedCorner {
            let prev = if i == 0 { corners[n - 1] } else { corners[i - 1] };
            let next = corners[(i + 1) % n];
            let (px, py) = cell_center(prev, opts);
            let (nx, ny) = cell_center(next, opts);

            // Pull the entry and exit points toward the neighbours along
            // the axis each leg runs on.
            let (sx, sy) = if px == cx {
                (cx, if py < cy { cy - CURVE_OFFSET } else { cy + CURVE_OFFSET })
            } else {
                (if px < cx { cx - CURVE_OFFSET } else { cx + CURVE_OFFSET }, cy)
            };
            let (ex, ey) = if nx == cx {
                (cx, if ny < cy { cy - CURVE_OFFSET } else { cy + CURVE_OFFSET })
            } else {
                (if nx < cx { cx - CURVE_OFFSET } else { cx + CURVE_OFFSET }, cy)
            };

            if i == 0 {
                d.push_str(&format!("M {} {} ", fmt_coord(sx), fmt_coord(sy)));
            } else {
                d.push_str(&format!("L {} {} ", fmt_coord(sx), fmt_coord(sy)));
            }
            d.push_str(&format!(
                "Q {} {} {} {} ",
                fmt_coord(cx),
                fmt_coord(cy),
                fmt_coord(ex),
                fmt_coord(ey)
            ));
        } else if i == 0 {
            d.push_str(&format!("M {} {} ", fmt_coord(cx), fmt_coord(cy)));
        } else {
            d.push_str(&format!("L {} {} ", fmt_coord(cx), fmt_coord(cy)));
        }
    }

    if close {
        d.push('Z');
    }
    d.trim_end().to_owned()
}

// ---------------------------------------------------------------------------
// Individual object renderers
// ---------------------------------------------------------------------------

fn render_polygon(obj: &Object, tag_options: Option<&OptionSet>, opts: &RenderOptions) -> SvgPath {
    let d = corners_to_d(obj.corners(), true, opts);
    let mut el = SvgPath::new().set("d", d);

    // Unfilled polygons default to white so stacked shapes occlude.
    if lookup(tag_options, "fill").is_none() {
        el = el.set("fill", "#fff");
    }
    if obj.is_dashed() {
        el = el.set("stroke-dasharray", "5 5");
    }
    apply_pass_through(el, tag_options)
}

fn render_line(obj: &Object, tag_options: Option<&OptionSet>, opts: &RenderOptions) -> Group {
    let d = corners_to_d(obj.corners(), false, opts);
    let mut el = SvgPath::new().set("d", d);

    if obj.is_dashed() {
        el = el.set("stroke-dasharray", "5 5");
    }
    if obj.points()[0].hint == Hint::StartMarker {
        el = el.set("marker-start", "url(#iPointer)");
    }
    if obj.points().last().map(|p| p.hint) == Some(Hint::EndMarker) {
        el = el.set("marker-end", "url(#Pointer)");
    }
    el = apply_pass_through(el, tag_options);

    let mut group = Group::new().add(el);
    for p in obj.points() {
        let (x, y) = cell_center(*p, opts);
        match p.hint {
            Hint::Dot => {
                group = group.add(
                    Circle::new()
                        .set("cx", fmt_coord(x))
                        .set("cy", fmt_coord(y))
                        .set("r", 3)
                        .set("fill", "#000"),
                );
            }
            Hint::Tick => {
                group = group
                    .add(tick_stroke(x - 4.0, y - 4.0, x + 4.0, y + 4.0))
                    .add(tick_stroke(x + 4.0, y - 4.0, x - 4.0, y + 4.0));
            }
            _ => {}
        }
    }
    group
}

fn tick_stroke(x1: f64, y1: f64, x2: f64, y2: f64) -> Line {
    Line::new()
        .set("x1", fmt_coord(x1))
        .set("y1", fmt_coord(y1))
        .set("x2", fmt_coord(x2))
        .set("y2", fmt_coord(y2))
        .set("stroke-width", 1)
}

fn render_text(
    obj: &Object,
    tag_options: Option<&OptionSet>,
    opts: &RenderOptions,
) -> Option<SvgText> {
    // A truthy delref hides the tagged text (reference or definition)
    // while the options it carries live on elsewhere.
    if lookup(tag_options, options::DELREF_KEY).is_some_and(Value::is_truthy) {
        return None;
    }

    let content = match lookup(tag_options, options::LABEL_KEY) {
        Some(Value::String(label)) => label.clone(),
        Some(other) => other.to_attribute(),
        None => obj.text().unwrap_or_default().to_owned(),
    };

    let p = obj.points()[0];
    let x = p.x as f64 * opts.scale_x;
    let y = (p.y as f64 + 0.75) * opts.scale_y;
    let el = SvgText::new(escape_text(&content))
        .set("x", fmt_coord(x))
        .set("y", fmt_coord(y));
    Some(apply_pass_through(el, tag_options))
}

// ---------------------------------------------------------------------------
// Option helpers
// ---------------------------------------------------------------------------

fn lookup<'a>(tag_options: Option<&'a OptionSet>, key: &str) -> Option<&'a Value> {
    tag_options.and_then(|o| o.get(key))
}

/// Copy every rendering key onto the element; control keys stay behind.
fn apply_pass_through<T: svg::Node>(mut el: T, tag_options: Option<&OptionSet>) -> T {
    if let Some(opts) = tag_options {
        for (key, value) in opts.iter() {
            if options::is_control_key(key) {
                continue;
            }
            el.assign(key, value.to_attribute());
        }
    }
    el
}

/// Wrap a node in an anchor when the tag carries `a2s:link`.
fn add_in_anchor<T: svg::Node>(group: Group, el: T, tag_options: Option<&OptionSet>) -> Group {
    if let Some(Value::String(href)) = lookup(tag_options, options::LINK_KEY) {
        group.add(Anchor::new().set("xlink:href", href.as_str()).add(el))
    } else {
        group.add(el)
    }
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Format a pixel coordinate, trimming a trailing `.0`.
fn fmt_coord(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v}")
    }
}

/// Minimal XML text escaping for text content.
fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn render_str(input: &str) -> String {
        let canvas = diagrid_core::parse(input.as_bytes(), 8).expect("parse");
        render_to_string(&canvas)
    }

    #[test]
    fn empty_canvas_renders_a_document() {
        let out = render_str("");
        assert!(out.contains("<svg"), "{out}");
        assert!(out.contains("Pointer"), "{out}");
    }

    #[test]
    fn box_renders_closed_white_path() {
        let out = render_str("+-+\n| |\n+-+");
        assert!(out.contains("Z\""), "missing closepath: {out}");
        assert!(out.contains("fill=\"#fff\""), "missing default fill: {out}");
    }

    #[test]
    fn rounded_box_renders_curves() {
        let out = render_str(".-.\n| |\n'-'");
        assert!(out.contains('Q'), "missing quadratic curve: {out}");
    }

    #[test]
    fn dashed_line_renders_dasharray() {
        let out = render_str(" ====== ");
        assert!(out.contains("stroke-dasharray"), "{out}");
    }

    #[test]
    fn arrows_render_markers() {
        let out = render_str(" <----> ");
        assert!(out.contains("marker-start=\"url(#iPointer)\""), "{out}");
        assert!(out.contains("marker-end=\"url(#Pointer)\""), "{out}");
    }

    #[test]
    fn ticks_and_dots_render_shapes() {
        let out = render_str(" --x--o-- ");
        assert!(out.contains("<line"), "missing tick lines: {out}");
        assert!(out.contains("<circle"), "missing dot circle: {out}");
    }

    #[test]
    fn text_renders_escaped() {
        let out = render_str("R&D a<b");
        assert!(out.contains("R&amp;D a&lt;b"), "{out}");
    }

    #[test]
    fn fill_option_passes_through() {
        let out = render_str("+--+\n|  |\n+--+\n\n[0,0]: {\"fill\":\"red\"}");
        assert!(out.contains("fill=\"red\""), "{out}");
        assert!(!out.contains("a2s:"), "control keys must not leak: {out}");
    }

    #[test]
    fn delref_suppresses_definition_text() {
        let out = render_str(
            "+---+\n|[a]|\n+---+\n\n[a]: {\"fill\":\"red\",\"a2s:delref\":1}",
        );
        assert!(!out.contains("delref"), "{out}");
        assert!(!out.contains("[a]"), "tagged text must not render: {out}");
        assert!(out.contains("fill=\"red\""), "{out}");
    }

    #[test]
    fn label_replaces_text() {
        let out = render_str("+---+\n|[a]|\n+---+\n\n[a]: {\"a2s:label\":\"Hello\",\"a2s:delref\":\"\"}");
        assert!(out.contains("Hello"), "{out}");
        assert!(!out.contains("[a]"), "{out}");
    }

    #[test]
    fn link_wraps_in_anchor() {
        let out = render_str(
            "+---+\n|[a]|\n+---+\n\n[a]: {\"a2s:link\":\"https://example.com\",\"a2s:delref\":1}",
        );
        assert!(out.contains("<a"), "{out}");
        assert!(out.contains("xlink:href=\"https://example.com\""), "{out}");
    }
}
