use crate::{
    ansi::AnsiComposer,
    error::{FontError, Result},
    glyph::RenderMatrix,
    header::{FontHeader, FontType},
    layout::{RenderOptions, TextLayout},
    tdf::FontFile,
};

/// One font of a [`FontFile`]: its header and glyph block.
///
/// Rendering allocates a fresh cursor and matrix per call, so a `Font` (and
/// the file it borrows from) can be shared between threads.
#[derive(Copy, Clone, Debug)]
pub struct Font<'a> {
    id: usize,
    header: &'a FontHeader,
    block: &'a [u8],
}

impl<'a> Font<'a> {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn header(&self) -> &'a FontHeader {
        self.header
    }

    pub fn glyph_block(&self) -> &'a [u8] {
        self.block
    }

    pub fn name(&self) -> String {
        self.header.name()
    }

    pub fn font_type(&self) -> FontType {
        self.header.font_type()
    }

    pub fn has_char(&self, ch: u8) -> bool {
        self.header.glyph_offset(ch).is_some()
    }

    pub fn layout(&self, text: impl AsRef<[u8]>, options: &RenderOptions) -> RenderMatrix {
        TextLayout::new(self.header, self.block, options).run(text.as_ref())
    }

    /// Render `text` to ANSI output. Glyph bytes are raw CP437 unless
    /// `options.transcode` is set, in which case the output is UTF-8.
    pub fn render(&self, text: impl AsRef<[u8]>, options: &RenderOptions) -> Vec<u8> {
        let matrix = self.layout(text, options);
        AnsiComposer::new(self.font_type(), options.transcode).compose(&matrix)
    }

    /// Render `text` to a UTF-8 `String`, transcoding regardless of
    /// `options.transcode`.
    pub fn render_to_string(&self, text: impl AsRef<[u8]>, options: &RenderOptions) -> String {
        let matrix = self.layout(text, options);
        let bytes = AnsiComposer::new(self.font_type(), true).compose(&matrix);
        // every byte was either ASCII escape text or transcoded to UTF-8
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl FontFile {
    pub fn font(&self, font_id: usize) -> Result<Font<'_>> {
        match (self.header(font_id), self.glyph_block(font_id)) {
            (Some(header), Some(block)) => Ok(Font {
                id: font_id,
                header,
                block,
            }),
            _ => Err(FontError::UnknownFont(font_id)),
        }
    }
}

/// Render `text` with font `font_id` of `file`.
pub fn render(
    file: &FontFile,
    font_id: usize,
    text: impl AsRef<[u8]>,
    options: &RenderOptions,
) -> Result<Vec<u8>> {
    Ok(file.font(font_id)?.render(text, options))
}

/// Like [`render`], always producing UTF-8.
pub fn render_to_string(
    file: &FontFile,
    font_id: usize,
    text: impl AsRef<[u8]>,
    options: &RenderOptions,
) -> Result<String> {
    Ok(file.font(font_id)?.render_to_string(text, options))
}
