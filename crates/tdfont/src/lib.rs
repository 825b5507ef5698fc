//! tdfont: TheDraw font decoding and ANSI banner rendering.
//!
//! ```
//! use tdfont::{test_support::TdfBuilder, FontFile, RenderOptions};
//!
//! let bytes = TdfBuilder::new()
//!     .font("Demo", 2)
//!     .glyph(b'H', 2, &[b'H', 0x1F, b'H', 0x1F])
//!     .build();
//! let file = FontFile::from_bytes(&bytes)?;
//! let out = tdfont::render_to_string(&file, 0, "HH", &RenderOptions::default())?;
//! assert!(out.starts_with("\x1b[44;97mHH"));
//! # Ok::<(), tdfont::FontError>(())
//! ```

pub mod ansi;
pub mod cache;
pub mod cp437;
mod error;
mod font;
pub mod glyph;
pub mod header;
pub mod layout;
pub mod tdf;

pub use cache::FontCache;
pub use error::{FontError, Result};
pub use font::{render, render_to_string, Font};
pub use glyph::{Cell, GlyphCursor, RenderMatrix};
pub use header::{FontHeader, FontType};
pub use layout::RenderOptions;
pub use tdf::{load_font_file, FontFile};

// Test utilities
pub mod test_support;
