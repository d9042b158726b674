use thiserror::Error;

#[derive(Error, Debug)]
pub enum UnblackError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid grid dimensions: {rows}x{cols}")]
    InvalidDimensions { rows: isize, cols: isize },

    #[error("Coordinate ({row}, {col}) out of bounds for {rows}x{cols} grid")]
    OutOfBounds {
        row: isize,
        col: isize,
        rows: usize,
        cols: usize,
    },

    #[error("Invalid PNM data: {0}")]
    InvalidPnm(String),

    #[error("Expected {expected} pixels, got {actual}")]
    PixelCount { expected: usize, actual: usize },

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, UnblackError>;
