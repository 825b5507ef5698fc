//! Text layout: drives a [`GlyphCursor`] over the glyphs of a string.
use tracing::{trace, warn};

use crate::{
    glyph::{GlyphCursor, RenderMatrix, CR},
    header::{FontHeader, FontType},
};

const BLOCK_FG: u8 = 15;
const BLOCK_BG: u8 = 0;
/// Glyph bodies start after the width byte and one reserved byte.
const GLYPH_BODY: usize = 2;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderOptions {
    /// Columns inserted between two glyphs.
    pub letter_spacing: usize,
    /// Columns a space character advances.
    pub space_width: usize,
    /// Recode glyph bytes from CP437 to UTF-8 on output.
    pub transcode: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            letter_spacing: 2,
            space_width: 5,
            transcode: false,
        }
    }
}

impl RenderOptions {
    pub fn utf8() -> Self {
        Self {
            transcode: true,
            ..Self::default()
        }
    }
}

pub struct TextLayout<'a> {
    header: &'a FontHeader,
    block: &'a [u8],
    options: &'a RenderOptions,
}

impl<'a> TextLayout<'a> {
    pub fn new(header: &'a FontHeader, block: &'a [u8], options: &'a RenderOptions) -> Self {
        Self {
            header,
            block,
            options,
        }
    }

    /// Lay out `text` byte by byte into a fresh matrix.
    pub fn run(&self, text: &[u8]) -> RenderMatrix {
        let mut cursor = GlyphCursor::new();
        if self.header.font_type() == FontType::Block {
            cursor.set_colors(BLOCK_FG, BLOCK_BG, false);
        }
        for &b in text {
            match b {
                b'!'..=b'}' => self.glyph(&mut cursor, b),
                b' ' => cursor.advance_space(self.options.space_width),
                _ => {}
            }
        }
        cursor.into_matrix()
    }

    fn glyph(&self, cursor: &mut GlyphCursor, ch: u8) {
        let Some(offset) = self.header.glyph_offset(ch) else {
            trace!(ch, "no glyph");
            return;
        };
        let offset = offset as usize;
        let Some(&max_width) = self.block.get(offset) else {
            warn!(ch, offset, block_len = self.block.len(), "glyph offset outside block");
            return;
        };
        let origin_x = cursor.pos_x();
        let body = self.block.get(offset + GLYPH_BODY..).unwrap_or_default();
        match self.header.font_type() {
            FontType::Color => paint_color(cursor, body),
            FontType::Block => paint_block(cursor, body),
            // rejected when the header is built
            FontType::Outline | FontType::Unknown => return,
        }
        cursor.finish_glyph(origin_x, max_width as usize, self.options.letter_spacing);
    }
}

/// `(char, attribute)` pairs up to a NUL. A carriage return is a single byte
/// and leaves the current colours alone.
fn paint_color(cursor: &mut GlyphCursor, body: &[u8]) {
    let mut n = 0;
    while let Some(&ch) = body.get(n) {
        match ch {
            0 => break,
            CR => {
                cursor.paint(ch);
                n += 1;
            }
            _ => {
                let Some(&attr) = body.get(n + 1) else {
                    break;
                };
                cursor.set_colors(attr % 16, (attr >> 4) & 0x07, attr & 0x80 != 0);
                cursor.paint(ch);
                n += 2;
            }
        }
    }
}

fn paint_block(cursor: &mut GlyphCursor, body: &[u8]) {
    for &ch in body.iter().take_while(|&&b| b != 0) {
        cursor.paint(ch);
    }
}

/// Lay out `text` with the given font.
pub fn layout(
    header: &FontHeader,
    block: &[u8],
    text: &[u8],
    options: &RenderOptions,
) -> RenderMatrix {
    TextLayout::new(header, block, options).run(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{glyph::Cell, header::ABSENT_GLYPH, header::CHAR_TABLE_SIZE};

    fn font(type_byte: u8, glyphs: &[(u8, &[u8])]) -> (FontHeader, Vec<u8>) {
        let mut offsets = [ABSENT_GLYPH; CHAR_TABLE_SIZE];
        let mut block = Vec::new();
        for (ch, data) in glyphs {
            offsets[(*ch - 33) as usize] = block.len() as u16;
            block.extend_from_slice(data);
        }
        let header =
            FontHeader::new([0; 12], type_byte, 0, block.len() as u16, offsets).unwrap();
        (header, block)
    }

    #[test]
    fn color_glyph_decodes_attributes() {
        let (h, b) = font(2, &[(b'A', &[1, 1, b'A', 0x1F, 0][..])]);
        let m = layout(&h, &b, b"A", &RenderOptions::default());
        assert_eq!(
            m.get(0, 0),
            Some(&Cell::Char {
                ch: b'A',
                fg: 15,
                bg: 1,
                blink: false
            })
        );
    }

    #[test]
    fn color_carriage_return_consumes_one_byte() {
        let (h, b) = font(2, &[(b'A', &[2, 2, b'x', 0x4E, CR, b'y', 0x07, 0][..])]);
        let m = layout(&h, &b, b"A", &RenderOptions::default());
        assert_eq!(m.get(0, 1), Some(&Cell::LineBreak));
        assert_eq!(
            m.get(1, 0),
            Some(&Cell::Char {
                ch: b'y',
                fg: 7,
                bg: 0,
                blink: false
            })
        );
    }

    #[test]
    fn blink_bit_is_split_from_background() {
        let (h, b) = font(2, &[(b'A', &[1, 1, b'A', 0xC3, 0][..])]);
        let m = layout(&h, &b, b"A", &RenderOptions::default());
        assert_eq!(
            m.get(0, 0),
            Some(&Cell::Char {
                ch: b'A',
                fg: 3,
                bg: 4,
                blink: true
            })
        );
    }

    #[test]
    fn block_glyph_uses_fixed_colors() {
        let (h, b) = font(1, &[(b'B', &[2, 2, b'#', b'#', CR, b'#', 0][..])]);
        let m = layout(&h, &b, b"B", &RenderOptions::default());
        for cell in m.rows().iter().flat_map(|r| r.values()) {
            if let Cell::Char { fg, bg, .. } = cell {
                assert_eq!((*fg, *bg), (15, 0));
            }
        }
        assert_eq!(m.last_column(0), Some(2));
        assert_eq!(m.last_column(1), Some(0));
    }

    #[test]
    fn glyphs_advance_by_width_plus_spacing() {
        let (h, b) = font(1, &[(b'A', &[3, 1, b'a', 0][..])]);
        let opts = RenderOptions {
            letter_spacing: 1,
            ..Default::default()
        };
        let m = layout(&h, &b, b"AA", &opts);
        assert!(m.get(0, 0).is_some());
        assert!(m.get(0, 4).is_some());
        assert_eq!(m.last_column(0), Some(4));
    }

    #[test]
    fn space_and_absent_glyphs() {
        let (h, b) = font(1, &[(b'A', &[1, 1, b'a', 0][..])]);
        let m = layout(&h, &b, b"Z A", &RenderOptions::default());
        // 'Z' is absent, the space moves 5 columns
        assert_eq!(m.last_column(0), Some(5));
        assert_eq!(m.rows()[0].len(), 1);
    }

    #[test]
    fn tilde_and_control_bytes_are_ignored() {
        let (h, b) = font(1, &[(b'~', &[1, 1, b'~', 0][..])]);
        let m = layout(&h, &b, b"~\t\x7f", &RenderOptions::default());
        assert!(m.is_empty());
    }

    #[test]
    fn offset_outside_block_is_skipped() {
        let (base, b) = font(1, &[(b'A', &[1, 1, b'a', 0][..])]);
        let mut offsets = *base.letters_offsets();
        offsets[(b'B' - 33) as usize] = 200;
        let h = FontHeader::new([0; 12], 1, 0, b.len() as u16, offsets).unwrap();
        let m = layout(&h, &b, b"BA", &RenderOptions::default());
        assert_eq!(m.last_column(0), Some(0));
    }

    #[test]
    fn unterminated_body_stops_at_block_end() {
        let (h, b) = font(2, &[(b'A', &[2, 1, b'a', 0x07, b'b'][..])]);
        let m = layout(&h, &b, b"A", &RenderOptions::default());
        assert_eq!(m.last_column(0), Some(0));
    }
}
