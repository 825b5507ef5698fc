//! TDF container parsing.
//!
//! A TheDraw font file starts with a 20 byte signature block, followed by
//! one record per font:
//!
//! ```text
//! +0   indicator (55 AA 00 FF) / name length
//! +25  name (12 bytes)
//! +41  font type       +42 letter spacing
//! +43  block size (LE16)
//! +45  94 glyph offsets (LE16 each)
//! +233 glyph block (block size bytes)
//! ```
//!
//! Record offsets are relative to a cursor that starts at 0, so the first
//! record's fields land right after the signature. The next record begins
//! `212 + block_size + 1` bytes later.
use std::io::Read;

use tracing::debug;

use crate::{
    error::{FontError, Result},
    header::{FontHeader, CHAR_TABLE_SIZE, FONT_NAME_LEN},
};

const NAME_OFFSET: usize = 25;
const TYPE_OFFSET: usize = 41;
const SPACING_OFFSET: usize = 42;
const BLOCK_SIZE_OFFSET: usize = 43;
const TABLE_OFFSET: usize = 45;
const DATA_OFFSET: usize = 233;
const RECORD_HEADER_LEN: usize = 212;
const RECORD_PADDING: usize = 1;
const MIN_REMAINING: usize = 20;

/// All fonts of one TDF file. Immutable once parsed.
#[derive(Clone, Debug, Default)]
pub struct FontFile {
    headers: Vec<FontHeader>,
    glyph_blocks: Vec<Vec<u8>>,
}

impl FontFile {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut o = 0usize;
        let mut file = FontFile::default();
        while o + MIN_REMAINING < bytes.len() {
            if bytes[o + MIN_REMAINING..].iter().all(|&b| b == 0) {
                // bundle terminator
                break;
            }
            let font_id = file.headers.len();
            if o + DATA_OFFSET > bytes.len() {
                return Err(FontError::Format(format!(
                    "tdf: truncated header for font {font_id} at offset {o}"
                )));
            }
            let mut name = [0u8; FONT_NAME_LEN];
            name.copy_from_slice(&bytes[o + NAME_OFFSET..o + NAME_OFFSET + FONT_NAME_LEN]);
            let type_byte = bytes[o + TYPE_OFFSET];
            let spacing = bytes[o + SPACING_OFFSET];
            let block_size = read_u16_le(bytes, o + BLOCK_SIZE_OFFSET);
            let mut offsets = [0u16; CHAR_TABLE_SIZE];
            for (i, entry) in offsets.iter_mut().enumerate() {
                *entry = read_u16_le(bytes, o + TABLE_OFFSET + i * 2);
            }
            let header = FontHeader::new(name, type_byte, spacing, block_size, offsets)?;

            let start = o + DATA_OFFSET;
            let end = start + block_size as usize;
            if end > bytes.len() {
                return Err(FontError::Format(format!(
                    "tdf: glyph block of font {font_id} ends at {end}, file has {} bytes",
                    bytes.len()
                )));
            }
            debug!(
                font_id,
                name = %header.name(),
                font_type = ?header.font_type(),
                block_size,
                "parsed tdf font record"
            );
            file.headers.push(header);
            file.glyph_blocks.push(bytes[start..end].to_vec());
            o += RECORD_HEADER_LEN + block_size as usize + RECORD_PADDING;
        }
        Ok(file)
    }

    pub fn read<R: Read>(reader: R) -> Result<Self> {
        let mut buf = Vec::new();
        let mut reader = reader;
        reader.read_to_end(&mut buf)?;
        Self::from_bytes(&buf)
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn headers(&self) -> &[FontHeader] {
        &self.headers
    }

    pub fn header(&self, font_id: usize) -> Option<&FontHeader> {
        self.headers.get(font_id)
    }

    pub fn glyph_block(&self, font_id: usize) -> Option<&[u8]> {
        self.glyph_blocks.get(font_id).map(Vec::as_slice)
    }

    /// Iterate over all fonts, yielding `(font_id, header, glyph block)`.
    pub fn fonts(&self) -> impl Iterator<Item = (usize, &FontHeader, &[u8])> {
        self.headers
            .iter()
            .zip(self.glyph_blocks.iter())
            .enumerate()
            .map(|(id, (h, b))| (id, h, b.as_slice()))
    }
}

/// Parses a complete TDF buffer.
pub fn load_font_file(bytes: &[u8]) -> Result<FontFile> {
    FontFile::from_bytes(bytes)
}

fn read_u16_le(bytes: &[u8], at: usize) -> u16 {
    bytes[at] as u16 | ((bytes[at + 1] as u16) << 8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TdfBuilder;

    #[test]
    fn empty_and_short_buffers_yield_no_fonts() {
        assert!(FontFile::from_bytes(&[]).unwrap().is_empty());
        assert!(FontFile::from_bytes(&[0x13; 20]).unwrap().is_empty());
    }

    #[test]
    fn truncated_header_is_format_error() {
        let mut bytes = TdfBuilder::new().font("A", 2).build();
        bytes.truncate(100);
        assert!(matches!(
            FontFile::from_bytes(&bytes),
            Err(FontError::Format(_))
        ));
    }

    #[test]
    fn block_past_end_is_format_error() {
        let mut bytes = TdfBuilder::new()
            .font("A", 2)
            .glyph(b'A', 1, &[b'A', 0x0F])
            .build();
        bytes.pop();
        assert!(matches!(
            FontFile::from_bytes(&bytes),
            Err(FontError::Format(_))
        ));
    }

    #[test]
    fn trailing_terminator_is_ignored() {
        let bytes = TdfBuilder::new()
            .font("A", 1)
            .glyph(b'A', 1, b"A")
            .with_terminator()
            .build();
        assert_eq!(FontFile::from_bytes(&bytes).unwrap().len(), 1);
    }

    #[test]
    fn outline_font_fails_whole_load() {
        let bytes = TdfBuilder::new().font("ok", 2).font("outline", 0).build();
        assert!(matches!(
            FontFile::from_bytes(&bytes),
            Err(FontError::UnsupportedFontType)
        ));
    }

    #[test]
    fn read_from_stream() {
        let bytes = TdfBuilder::new().font("Stream", 1).build();
        let file = FontFile::read(std::io::Cursor::new(bytes)).unwrap();
        assert_eq!(file.header(0).unwrap().name(), "Stream");
    }
}
