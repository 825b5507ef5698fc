use thiserror::Error;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("format error: {0}")]
    Format(String),
    #[error("unsupported font type: outline fonts cannot be rendered")]
    UnsupportedFontType,
    #[error("unknown font type {0}")]
    UnknownFontType(u8),
    #[error("font {0} does not exist in font file")]
    UnknownFont(usize),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FontError>;
