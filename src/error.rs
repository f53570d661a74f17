//! Error types for the composer boundaries.
//!
//! The render path itself is infallible; errors only surface when parsing
//! colors, decoding uploaded images, encoding exports or talking to the
//! background loader.

use thiserror::Error;

/// Result type alias for composer operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A color string was not `#rgb`, `#rrggbb` or `#rrggbbaa`
    #[error("Invalid color: {0:?}")]
    InvalidColor(String),

    /// A raster image failed to decode or encode
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// An SVG document failed to parse or rasterize
    #[error("SVG error: {0}")]
    Svg(String),

    /// The decoded image has a zero width or height
    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The decode worker went away before delivering a result
    #[error("Background loader disconnected")]
    LoaderDisconnected,

    /// Export settings rejected before encoding
    #[error("Encode failed: {0}")]
    Encode(String),
}
