//! Serialises a [`RenderMatrix`] to ANSI text.
use crate::{
    cp437,
    glyph::{Cell, RenderMatrix, MATRIX_ROWS},
    header::FontType,
};

const RESET: &[u8] = b"\x1b[0m";

/// Foreground colour index to SGR code (PC attribute order).
const FG_SGR: [u8; 16] = [30, 34, 32, 36, 31, 35, 33, 37, 90, 94, 92, 96, 91, 95, 93, 97];
/// Background colour index to SGR code.
const BG_SGR: [u8; 8] = [40, 44, 42, 46, 41, 45, 43, 47];

/// `ESC[{bg};{fg}m` for a colour pair.
pub fn sgr(fg: u8, bg: u8) -> String {
    format!(
        "\x1b[{};{}m",
        BG_SGR[(bg & 0x07) as usize],
        FG_SGR[(fg & 0x0F) as usize]
    )
}

/// Last escape written to the output.
#[derive(Copy, Clone, PartialEq, Eq)]
enum Emitted {
    Nothing,
    Reset,
    Color(u8, u8),
}

pub struct AnsiComposer {
    font_type: FontType,
    transcode: bool,
}

impl AnsiComposer {
    pub fn new(font_type: FontType, transcode: bool) -> Self {
        Self {
            font_type,
            transcode,
        }
    }

    /// Rows whose highest column is 0 are left out, even when that column
    /// holds a character. Downstream output depends on this shape.
    pub fn compose(&self, matrix: &RenderMatrix) -> Vec<u8> {
        let color = self.font_type == FontType::Color;
        let mut out = Vec::new();
        let mut last = Emitted::Nothing;
        // most recent colour seen on a character cell, kept across rows
        let mut pending: Option<(u8, u8)> = None;

        for row in 0..MATRIX_ROWS {
            let Some(last_col) = matrix.last_column(row) else {
                continue;
            };
            if last_col == 0 {
                continue;
            }
            for col in 0..=last_col {
                match matrix.get(row, col) {
                    None => {
                        out.extend_from_slice(RESET);
                        out.push(b' ');
                        last = Emitted::Reset;
                    }
                    Some(Cell::LineBreak) => {
                        let pending_on_black = matches!(pending, Some((_, 0)));
                        if color && !pending_on_black && last != Emitted::Reset {
                            out.extend_from_slice(RESET);
                            last = Emitted::Reset;
                        }
                        out.push(b' ');
                    }
                    Some(&Cell::Char { ch, fg, bg, .. }) => {
                        if color {
                            pending = Some((fg, bg));
                            if last != Emitted::Color(fg, bg) {
                                out.extend_from_slice(sgr(fg, bg).as_bytes());
                                last = Emitted::Color(fg, bg);
                            }
                        }
                        if self.transcode {
                            cp437::transcode_into(ch, &mut out);
                        } else {
                            out.push(ch);
                        }
                    }
                }
            }
            out.extend_from_slice(RESET);
            out.push(b'\n');
            last = Emitted::Reset;
        }
        out
    }
}
