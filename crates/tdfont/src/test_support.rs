//! Test support utilities for tdfont.
//!
//! Builds synthetic TDF buffers so tests and benchmarks don't depend on
//! font files shipped with the crate. Not part of the stable API.

use crate::header::{ABSENT_GLYPH, CHAR_TABLE_SIZE, FONT_NAME_LEN};

const THE_DRAW_FONT_ID: &[u8; 18] = b"TheDraw FONTS file";
const CTRL_Z: u8 = 0x1A;
const FONT_INDICATOR: u32 = 0xFF00_AA55;

struct FontDef {
    name: String,
    type_byte: u8,
    spacing: u8,
    glyphs: Vec<(u8, u8, Vec<u8>)>,
}

/// Writes TDF containers the way TheDraw lays them out.
///
/// ```
/// use tdfont::test_support::TdfBuilder;
///
/// let bytes = TdfBuilder::new()
///     .font("Demo", 2)
///     .glyph(b'A', 1, &[b'A', 0x1F])
///     .build();
/// let file = tdfont::FontFile::from_bytes(&bytes).unwrap();
/// assert_eq!(file.len(), 1);
/// ```
#[derive(Default)]
pub struct TdfBuilder {
    fonts: Vec<FontDef>,
    terminator: bool,
}

impl TdfBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new font record. `type_byte` is written as is, so
    /// unsupported types can be produced too.
    pub fn font(mut self, name: &str, type_byte: u8) -> Self {
        self.fonts.push(FontDef {
            name: name.to_string(),
            type_byte,
            spacing: 1,
            glyphs: Vec::new(),
        });
        self
    }

    /// Header letter spacing of the current font.
    pub fn spacing(mut self, spacing: u8) -> Self {
        if let Some(f) = self.fonts.last_mut() {
            f.spacing = spacing;
        }
        self
    }

    /// Adds a glyph to the current font. `body` is everything after the
    /// width and reserved bytes; the NUL terminator is appended.
    pub fn glyph(mut self, ch: u8, width: u8, body: &[u8]) -> Self {
        if let Some(f) = self.fonts.last_mut() {
            f.glyphs.push((ch, width, body.to_vec()));
        }
        self
    }

    /// Append the trailing NUL some bundles end with.
    pub fn with_terminator(mut self) -> Self {
        self.terminator = true;
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.push(THE_DRAW_FONT_ID.len() as u8 + 1);
        out.extend(THE_DRAW_FONT_ID);
        out.push(CTRL_Z);
        for f in &self.fonts {
            let mut lookup = [ABSENT_GLYPH; CHAR_TABLE_SIZE];
            let mut block = Vec::new();
            for (ch, width, body) in &f.glyphs {
                if let Some(slot) = ch.checked_sub(b'!').and_then(|i| lookup.get_mut(i as usize)) {
                    *slot = block.len() as u16;
                }
                let lines = body.iter().filter(|&&b| b == 0x0D).count() as u8 + 1;
                block.push(*width);
                block.push(lines);
                block.extend(body);
                block.push(0);
            }
            out.extend(u32::to_le_bytes(FONT_INDICATOR));
            out.push(FONT_NAME_LEN as u8);
            let mut name = [0u8; FONT_NAME_LEN];
            for (dst, src) in name.iter_mut().zip(f.name.bytes()) {
                *dst = src;
            }
            out.extend(name);
            out.extend([0, 0, 0, 0]);
            out.push(f.type_byte);
            out.push(f.spacing);
            out.extend(u16::to_le_bytes(block.len() as u16));
            for off in lookup {
                out.extend(u16::to_le_bytes(off));
            }
            out.extend(block);
        }
        if self.terminator {
            out.push(0);
        }
        out
    }
}
