use std::collections::BTreeMap;

/// Height of every rendered banner.
pub const MATRIX_ROWS: usize = 12;
/// Columns past this index are not stored; the cursor keeps moving.
pub const MATRIX_COLUMNS: usize = 1 << 16;

pub(crate) const CR: u8 = 0x0D;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    /// Painted CP437 byte with colour attributes (foreground 0-15, background 0-7).
    /// `blink` is attribute bit 7. ANSI output does not use it; it is kept for
    /// matrix consumers that draw their own cells.
    Char { ch: u8, fg: u8, bg: u8, blink: bool },
    /// Carriage return inside a glyph body; occupies a column but carries no content
    LineBreak,
}

/// Fixed height grid with sparse rows. Columns are created as the cursor
/// reaches them, gaps stay unset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderMatrix {
    rows: [BTreeMap<usize, Cell>; MATRIX_ROWS],
}

impl RenderMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[BTreeMap<usize, Cell>; MATRIX_ROWS] {
        &self.rows
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row)?.get(&col)
    }

    /// Highest populated column of `row`.
    pub fn last_column(&self, row: usize) -> Option<usize> {
        self.rows.get(row)?.keys().next_back().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(BTreeMap::is_empty)
    }

    fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if col >= MATRIX_COLUMNS {
            return;
        }
        if let Some(r) = self.rows.get_mut(row) {
            r.insert(col, cell);
        }
    }
}

/// Cursor state for one render call. Positions are 1-based.
#[derive(Debug)]
pub struct GlyphCursor {
    pos_x: usize,
    pos_y: usize,
    char_pos_x: usize,
    fg: u8,
    bg: u8,
    blink: bool,
    matrix: RenderMatrix,
}

impl Default for GlyphCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphCursor {
    pub fn new() -> Self {
        Self {
            pos_x: 1,
            pos_y: 1,
            char_pos_x: 1,
            fg: 0,
            bg: 0,
            blink: false,
            matrix: RenderMatrix::new(),
        }
    }

    pub fn pos_x(&self) -> usize {
        self.pos_x
    }

    pub fn pos_y(&self) -> usize {
        self.pos_y
    }

    pub fn char_pos_x(&self) -> usize {
        self.char_pos_x
    }

    pub fn set_colors(&mut self, fg: u8, bg: u8, blink: bool) {
        self.fg = fg;
        self.bg = bg;
        self.blink = blink;
    }

    /// Paint `ch` at the cursor. A carriage return is stored as a line break
    /// and moves the cursor to the start column of the next row.
    pub fn paint(&mut self, ch: u8) {
        let (row, col) = (self.pos_y - 1, self.pos_x - 1);
        if ch == CR {
            self.matrix.set(row, col, Cell::LineBreak);
            self.pos_x = self.char_pos_x;
            self.pos_y += 1;
        } else {
            self.matrix.set(
                row,
                col,
                Cell::Char {
                    ch,
                    fg: self.fg,
                    bg: self.bg,
                    blink: self.blink,
                },
            );
            self.pos_x = self.pos_x.saturating_add(1);
        }
    }

    pub fn advance_space(&mut self, width: usize) {
        self.pos_x = self.pos_x.saturating_add(width);
        self.char_pos_x = self.pos_x;
    }

    /// Moves to the origin of the next glyph after one started at `origin_x`.
    pub fn finish_glyph(&mut self, origin_x: usize, max_width: usize, spacing: usize) {
        self.pos_y = 1;
        self.pos_x = origin_x.saturating_add(max_width).saturating_add(spacing);
        self.char_pos_x = self.pos_x;
    }

    pub fn matrix(&self) -> &RenderMatrix {
        &self.matrix
    }

    pub fn into_matrix(self) -> RenderMatrix {
        self.matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ch(ch: u8) -> Cell {
        Cell::Char {
            ch,
            fg: 0,
            bg: 0,
            blink: false,
        }
    }

    #[test]
    fn paint_advances_column() {
        let mut c = GlyphCursor::new();
        c.paint(b'a');
        c.paint(b'b');
        assert_eq!(c.pos_x(), 3);
        assert_eq!(c.matrix().get(0, 0), Some(&ch(b'a')));
        assert_eq!(c.matrix().get(0, 1), Some(&ch(b'b')));
    }

    #[test]
    fn carriage_return_wraps_to_char_origin() {
        let mut c = GlyphCursor::new();
        c.advance_space(3);
        c.paint(b'a');
        c.paint(CR);
        c.paint(b'b');
        assert_eq!(c.pos_y(), 2);
        assert_eq!(c.pos_x(), 5);
        assert_eq!(c.matrix().get(0, 4), Some(&Cell::LineBreak));
        assert_eq!(c.matrix().get(1, 3), Some(&ch(b'b')));
    }

    #[test]
    fn rows_below_matrix_are_dropped() {
        let mut c = GlyphCursor::new();
        for _ in 0..MATRIX_ROWS {
            c.paint(CR);
        }
        c.paint(b'x');
        assert_eq!(c.pos_y(), MATRIX_ROWS + 1);
        assert!(c.matrix().rows().iter().all(|r| r.values().all(|v| *v == Cell::LineBreak)));
    }

    #[test]
    fn finish_glyph_resets_row() {
        let mut c = GlyphCursor::new();
        c.paint(CR);
        c.finish_glyph(1, 4, 2);
        assert_eq!((c.pos_x(), c.pos_y(), c.char_pos_x()), (7, 1, 7));
    }

    #[test]
    fn huge_advances_saturate() {
        let mut c = GlyphCursor::new();
        c.advance_space(usize::MAX);
        assert_eq!(c.pos_x(), usize::MAX);
        c.paint(b'x');
        c.finish_glyph(c.pos_x(), 3, usize::MAX);
        assert_eq!(c.pos_x(), usize::MAX);
        assert!(c.matrix().is_empty());
    }

    #[test]
    fn columns_past_limit_are_dropped() {
        let mut c = GlyphCursor::new();
        c.advance_space(MATRIX_COLUMNS - 1);
        c.paint(b'a');
        c.paint(b'b');
        assert_eq!(c.matrix().last_column(0), Some(MATRIX_COLUMNS - 1));
        assert_eq!(c.pos_x(), MATRIX_COLUMNS + 2);
    }

    #[test]
    fn last_column_is_highest_key() {
        let mut c = GlyphCursor::new();
        c.advance_space(5);
        c.paint(b'x');
        assert_eq!(c.matrix().last_column(0), Some(5));
        assert_eq!(c.matrix().last_column(1), None);
    }
}
