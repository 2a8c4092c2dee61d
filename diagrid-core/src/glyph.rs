//! Character classification for the diagram grid.
//!
//! Every grid cell is classified through a set of role predicates that the
//! scanners consult. A single character can satisfy several roles at once
//! (`x` is a horizontal edge, a vertical edge, and a tick marker), so these
//! are predicates rather than a partition.
//!
//! | Predicate | Members |
//! |---|---|
//! | `is_corner` | `.` `'` `+` |
//! | `is_rounded_corner` | `.` `'` |
//! | `is_horizontal` | `-` `=` `x` `o` |
//! | `is_vertical` | `\|` `:` `x` `o` |
//! | `is_dashed` | `=` `:` |
//! | `is_tick` / `is_dot` | `x` / `o` |
//! | `is_arrow_horizontal` | `<` `>` |
//! | `is_arrow_vertical` | `^` `v` |
//! | `is_diagonal` | `/` `\` |
//! | `is_tag_open` / `is_tag_close` / `is_tag_sep` | `[` / `]` / `:` |

/// A single character from the grid, wrapped for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph(pub char);

impl Glyph {
    #[must_use]
    pub const fn is_corner(self) -> bool {
        matches!(self.0, '.' | '\'' | '+')
    }

    /// A corner drawn as a quadratic curve rather than an angle.
    #[must_use]
    pub const fn is_rounded_corner(self) -> bool {
        matches!(self.0, '.' | '\'')
    }

    /// Part of a horizontal edge. Ticks and dots are edge material too:
    /// they sit in the middle of lines.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self.0, '-' | '=' | 'x' | 'o')
    }

    /// Part of a vertical edge.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self.0, '|' | ':' | 'x' | 'o')
    }

    /// An edge character that renders with a dash pattern.
    #[must_use]
    pub const fn is_dashed(self) -> bool {
        matches!(self.0, '=' | ':')
    }

    #[must_use]
    pub const fn is_tick(self) -> bool {
        self.0 == 'x'
    }

    #[must_use]
    pub const fn is_dot(self) -> bool {
        self.0 == 'o'
    }

    #[must_use]
    pub const fn is_arrow_left(self) -> bool {
        self.0 == '<'
    }

    #[must_use]
    pub const fn is_arrow_horizontal(self) -> bool {
        self.is_arrow_left() || self.0 == '>'
    }

    #[must_use]
    pub const fn is_arrow_up(self) -> bool {
        self.0 == '^'
    }

    #[must_use]
    pub const fn is_arrow_vertical(self) -> bool {
        self.is_arrow_up() || self.0 == 'v'
    }

    #[must_use]
    pub const fn is_arrow(self) -> bool {
        self.is_arrow_horizontal() || self.is_arrow_vertical()
    }

    /// A diagonal running from lower-left to upper-right.
    #[must_use]
    pub const fn is_diagonal_ne(self) -> bool {
        self.0 == '/'
    }

    /// A diagonal running from upper-left to lower-right.
    #[must_use]
    pub const fn is_diagonal_se(self) -> bool {
        self.0 == '\\'
    }

    #[must_use]
    pub const fn is_diagonal(self) -> bool {
        self.is_diagonal_ne() || self.is_diagonal_se()
    }

    #[must_use]
    pub const fn is_tag_open(self) -> bool {
        self.0 == '['
    }

    #[must_use]
    pub const fn is_tag_close(self) -> bool {
        self.0 == ']'
    }

    #[must_use]
    pub const fn is_tag_sep(self) -> bool {
        self.0 == ':'
    }

    /// Any character that can start path discovery. A path is discovered
    /// once, at its tail: `<` and `^` qualify but `>` and `v` do not, so a
    /// directed line is not found a second time from its head. Ticks and
    /// dots never start a path; they are only crossed mid-line.
    #[must_use]
    pub const fn is_path_start(self) -> bool {
        (self.is_corner()
            || self.is_horizontal()
            || self.is_vertical()
            || self.is_arrow_left()
            || self.is_arrow_up()
            || self.is_diagonal())
            && !self.is_tick()
            && !self.is_dot()
    }

    /// Can a path pass through this cell horizontally?
    #[must_use]
    pub const fn can_horizontal(self) -> bool {
        self.is_horizontal() || self.is_corner() || self.is_arrow_horizontal()
    }

    /// Can a path pass through this cell vertically?
    #[must_use]
    pub const fn can_vertical(self) -> bool {
        self.is_vertical() || self.is_corner() || self.is_arrow_vertical()
    }

    /// Can a path step diagonally from `from` onto this cell?
    ///
    /// Orthogonal material (edges, corners, arrows) may only enter or leave
    /// a diagonal run through an actual diagonal character; within a run the
    /// diagonal may hand over to any path material.
    #[must_use]
    pub const fn can_diagonal_from(self, from: Self) -> bool {
        if from.is_arrow_vertical() || from.is_corner() {
            return self.is_diagonal();
        }
        if from.is_diagonal() {
            return self.is_diagonal()
                || self.is_corner()
                || self.is_arrow_vertical()
                || self.is_horizontal()
                || self.is_vertical();
        }
        if from.is_horizontal() || from.is_vertical() {
            return self.is_diagonal();
        }
        false
    }

    /// Any character that can start a text run: a tag bracket, a letter, a
    /// digit, or a symbol.
    #[must_use]
    pub fn is_text_start(self) -> bool {
        self.is_tag_open() || self.0.is_alphanumeric() || is_symbol(self.0)
    }

    /// Any printable character continues a text run.
    #[must_use]
    pub fn is_text_cont(self) -> bool {
        self.0 == ' ' || (!self.0.is_control() && !self.0.is_whitespace())
    }

    #[must_use]
    pub fn is_space(self) -> bool {
        self.0.is_whitespace()
    }
}

/// Unicode symbol-category membership, exact for ASCII and Latin-1.
///
/// Above U+00FF this covers the blocks that plausibly appear in diagrams
/// (currency, arrows, mathematical operators, technical and geometric
/// symbols) rather than the full `S*` categories.
fn is_symbol(c: char) -> bool {
    match c {
        '$' | '+' | '<' | '=' | '>' | '^' | '`' | '|' | '~' => true,
        '\u{a2}'..='\u{a6}'
        | '\u{a8}'
        | '\u{a9}'
        | '\u{ac}'
        | '\u{ae}'
        | '\u{af}'
        | '\u{b0}'
        | '\u{b1}'
        | '\u{b4}'
        | '\u{b8}'
        | '\u{d7}'
        | '\u{f7}' => true,
        '\u{20a0}'..='\u{20cf}'
        | '\u{2190}'..='\u{21ff}'
        | '\u{2200}'..='\u{23ff}'
        | '\u{25a0}'..='\u{25ff}'
        | '\u{2600}'..='\u{27bf}' => true,
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn g(c: char) -> Glyph {
        Glyph(c)
    }

    // -- path material --

    #[test]
    fn corners() {
        for c in ['.', '\'', '+'] {
            assert!(g(c).is_corner(), "{c}");
        }
        assert!(g('.').is_rounded_corner());
        assert!(g('\'').is_rounded_corner());
        assert!(!g('+').is_rounded_corner());
        assert!(!g('#').is_corner());
    }

    #[test]
    fn edges() {
        for c in ['-', '=', 'x', 'o'] {
            assert!(g(c).is_horizontal(), "{c}");
        }
        for c in ['|', ':', 'x', 'o'] {
            assert!(g(c).is_vertical(), "{c}");
        }
        assert!(!g('-').is_vertical());
        assert!(!g('|').is_horizontal());
    }

    #[test]
    fn dashed_edges() {
        assert!(g('=').is_dashed());
        assert!(g(':').is_dashed());
        assert!(!g('-').is_dashed());
        assert!(!g('|').is_dashed());
    }

    #[test]
    fn ticks_and_dots() {
        assert!(g('x').is_tick());
        assert!(g('o').is_dot());
        assert!(!g('X').is_tick());
        assert!(!g('O').is_dot());
    }

    #[test]
    fn arrows() {
        assert!(g('<').is_arrow_left());
        assert!(!g('>').is_arrow_left());
        assert!(g('>').is_arrow_horizontal());
        assert!(g('^').is_arrow_up());
        assert!(g('v').is_arrow_vertical());
        assert!(!g('v').is_arrow_up());
        assert!(g('<').is_arrow());
        assert!(!g('V').is_arrow());
    }

    // -- path start asymmetry --

    #[test]
    fn path_starts_at_the_tail_only() {
        for c in ['+', '.', '\'', '-', '=', '|', ':', '<', '^', '/', '\\'] {
            assert!(g(c).is_path_start(), "{c}");
        }
        // Heads of directed lines are found by walking, never by starting.
        assert!(!g('>').is_path_start());
        assert!(!g('v').is_path_start());
        // Ticks and dots are edge material but never path starts.
        assert!(!g('x').is_path_start());
        assert!(!g('o').is_path_start());
    }

    #[test]
    fn traversal_capability() {
        assert!(g('+').can_horizontal());
        assert!(g('+').can_vertical());
        assert!(g('<').can_horizontal());
        assert!(!g('<').can_vertical());
        assert!(g('^').can_vertical());
        assert!(!g('^').can_horizontal());
        assert!(g('x').can_horizontal());
        assert!(g('x').can_vertical());
        assert!(!g(' ').can_horizontal());
    }

    // -- diagonal transitions --

    #[test]
    fn diagonal_from_corner_or_vertical_arrow() {
        assert!(g('/').can_diagonal_from(g('+')));
        assert!(g('\\').can_diagonal_from(g('v')));
        assert!(!g('-').can_diagonal_from(g('+')));
        assert!(!g('+').can_diagonal_from(g('^')));
    }

    #[test]
    fn diagonal_run_can_hand_over() {
        for c in ['/', '\\', '+', '.', '^', 'v', '-', '|'] {
            assert!(g(c).can_diagonal_from(g('/')), "{c}");
        }
        assert!(!g(' ').can_diagonal_from(g('/')));
        assert!(!g('>').can_diagonal_from(g('/')));
    }

    #[test]
    fn diagonal_from_orthogonal_edge() {
        assert!(g('/').can_diagonal_from(g('-')));
        assert!(g('\\').can_diagonal_from(g('|')));
        assert!(!g('|').can_diagonal_from(g('-')));
    }

    #[test]
    fn no_diagonal_from_text() {
        assert!(!g('/').can_diagonal_from(g('a')));
        assert!(!g('/').can_diagonal_from(g(' ')));
    }

    // -- text classification --

    #[test]
    fn text_start() {
        assert!(g('a').is_text_start());
        assert!(g('Z').is_text_start());
        assert!(g('0').is_text_start());
        assert!(g('[').is_text_start());
        assert!(g('$').is_text_start());
        assert!(g('é').is_text_start());
        assert!(g('°').is_text_start());
        assert!(g('→').is_text_start());
        assert!(!g(' ').is_text_start());
        assert!(!g('-').is_text_start());
        assert!(!g('(').is_text_start());
    }

    #[test]
    fn text_continuation() {
        assert!(g('a').is_text_cont());
        assert!(g(' ').is_text_cont());
        assert!(g('-').is_text_cont());
        assert!(g('(').is_text_cont());
        assert!(!g('\u{0}').is_text_cont());
        assert!(!g('\t').is_text_cont());
    }

    #[test]
    fn whitespace() {
        assert!(g(' ').is_space());
        assert!(g('\u{a0}').is_space());
        assert!(!g('a').is_space());
    }
}
