// src/error.rs

//! Error type shared by the surface, codec and font layers.
//!
//! Drawing itself never fails: out-of-range coordinates, empty clips and
//! transparent colors are absorbed as no-ops. Errors only arise when a
//! resource is created or loaded.

use std::io;
use thiserror::Error;

/// Errors produced while creating, loading or saving pixel resources.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A surface was requested with a non-positive width or height.
    #[error("invalid image size {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
    /// The pixel buffer for a surface could not be sized.
    #[error("cannot allocate pixel buffer for {width}x{height}")]
    ResourceExhausted { width: i32, height: i32 },
    /// Image bytes could not be decoded. Decoding always runs over in-memory
    /// bytes, so a short read lands here too.
    #[error("failed to decode image: {0}")]
    Decode(#[from] png::DecodingError),
    /// The image decoded, but into a pixel layout we cannot normalize.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),
    /// A surface could not be encoded for saving.
    #[error("failed to encode image: {0}")]
    Encode(String),
    /// A font source image whose dimensions are not divisible by 16.
    #[error("font image {width}x{height} is not a 16x16 glyph grid")]
    InvalidFontSource { width: i32, height: i32 },
    /// Reading or writing a file failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl From<png::EncodingError> for RenderError {
    fn from(err: png::EncodingError) -> Self {
        match err {
            png::EncodingError::IoError(io_err) => RenderError::Io(io_err),
            other => RenderError::Encode(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn io_errors_keep_their_source() {
        let err = RenderError::from(io::Error::new(io::ErrorKind::NotFound, "cat.png"));
        assert_eq!(err.to_string(), "i/o error: cat.png");
        assert!(err.source().is_some());
    }

    #[test]
    fn encoder_io_failures_map_to_io() {
        let err = RenderError::from(png::EncodingError::IoError(io::Error::new(
            io::ErrorKind::WriteZero,
            "disk full",
        )));
        assert!(matches!(err, RenderError::Io(_)));
    }

    #[test]
    fn dimension_errors_name_the_size() {
        let err = RenderError::InvalidFontSource {
            width: 100,
            height: 128,
        };
        assert_eq!(err.to_string(), "font image 100x128 is not a 16x16 glyph grid");
    }
}
