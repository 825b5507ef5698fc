use std::io::{self, Write};

use tdfont::{FontFile, FontType};

/// Writes rendered output as is; raw CP437 bytes must not go through `print!`.
pub fn write_banner(out: &[u8]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    lock.write_all(out)?;
    lock.flush()
}

fn type_label(t: FontType) -> &'static str {
    match t {
        FontType::Block => "block",
        FontType::Color => "color",
        FontType::Outline => "outline",
        FontType::Unknown => "unknown",
    }
}

/// One line per font: id, name, type, header spacing, block size, glyph count.
pub fn describe(file: &FontFile) -> String {
    let mut out = String::new();
    if file.is_empty() {
        out.push_str("no fonts in file\n");
        return out;
    }
    if file.len() > 1 {
        out.push_str(&format!("TDF bundle: {} fonts\n", file.len()));
    }
    for (id, header, _) in file.fonts() {
        out.push_str(&format!(
            "#{id}: {} ({}) spacing={} block={} bytes, {} glyphs\n",
            header.name(),
            type_label(header.font_type()),
            header.letter_spacing,
            header.block_size,
            header.defined_glyphs(),
        ));
    }
    out
}
