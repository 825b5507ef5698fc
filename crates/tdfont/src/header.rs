//! Per-font metadata decoded from a TDF record header.
use crate::{
    cp437,
    error::{FontError, Result},
};

pub const FONT_NAME_LEN: usize = 12;
/// Number of entries in the glyph offset table: printable `!`..`~`.
pub const CHAR_TABLE_SIZE: usize = 94;
/// Offset table value marking a character without glyph.
pub const ABSENT_GLYPH: u16 = 0xFFFF;

const FIRST_CHAR: u8 = b'!';

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FontType {
    Outline,
    Block,
    Color,
    Unknown,
}

impl FontType {
    pub fn from_byte(b: u8) -> Self {
        match b {
            0 => FontType::Outline,
            1 => FontType::Block,
            2 => FontType::Color,
            _ => FontType::Unknown,
        }
    }
}

#[derive(Clone, Debug)]
pub struct FontHeader {
    name: [u8; FONT_NAME_LEN],
    font_type: FontType,
    /// Spacing stored in the file. Informational only; rendering uses the
    /// caller supplied `RenderOptions::letter_spacing`.
    pub letter_spacing: u8,
    pub block_size: u16,
    letters_offsets: [u16; CHAR_TABLE_SIZE],
}

impl FontHeader {
    /// Builds a header, rejecting font types that cannot be rendered.
    pub fn new(
        name: [u8; FONT_NAME_LEN],
        type_byte: u8,
        letter_spacing: u8,
        block_size: u16,
        letters_offsets: [u16; CHAR_TABLE_SIZE],
    ) -> Result<Self> {
        let font_type = match FontType::from_byte(type_byte) {
            FontType::Outline => return Err(FontError::UnsupportedFontType),
            FontType::Unknown => return Err(FontError::UnknownFontType(type_byte)),
            t => t,
        };
        Ok(Self {
            name,
            font_type,
            letter_spacing,
            block_size,
            letters_offsets,
        })
    }

    pub fn font_type(&self) -> FontType {
        self.font_type
    }

    pub fn raw_name(&self) -> &[u8; FONT_NAME_LEN] {
        &self.name
    }

    /// Display name: bytes up to the first NUL, decoded from CP437.
    pub fn name(&self) -> String {
        self.name
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| cp437::to_char(b))
            .collect()
    }

    pub fn letters_offsets(&self) -> &[u16; CHAR_TABLE_SIZE] {
        &self.letters_offsets
    }

    /// Offset of the glyph for `ch` inside the glyph block, `None` when the
    /// character is outside the table or marked absent.
    pub fn glyph_offset(&self, ch: u8) -> Option<u16> {
        let idx = ch.checked_sub(FIRST_CHAR)? as usize;
        match self.letters_offsets.get(idx) {
            Some(&ABSENT_GLYPH) | None => None,
            Some(&off) => Some(off),
        }
    }

    pub fn defined_glyphs(&self) -> usize {
        self.letters_offsets
            .iter()
            .filter(|&&o| o != ABSENT_GLYPH)
            .count()
    }
}
