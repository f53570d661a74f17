//! Serializing a finished surface to a downloadable image.

use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, Rgb, RgbImage};

use crate::error::{Error, Result};
use crate::renderer::Surface;

/// Output codec for exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Lossy JPEG with a 1-100 quality factor
    Jpeg { quality: u8 },
    Png,
}

impl Default for ExportFormat {
    fn default() -> Self {
        ExportFormat::Jpeg { quality: 90 }
    }
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Jpeg { .. } => "jpeg",
            ExportFormat::Png => "png",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Jpeg { .. } => "image/jpeg",
            ExportFormat::Png => "image/png",
        }
    }

    /// Suggested download name, e.g. `image.jpeg`.
    pub fn file_name(&self) -> String {
        format!("image.{}", self.extension())
    }
}

/// Encode `surface` into an in-memory file.
pub fn encode(surface: &Surface, format: ExportFormat) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    write(surface, format, &mut bytes)?;
    Ok(bytes)
}

/// Encode `surface` into a file at `path`.
pub fn save(surface: &Surface, path: impl AsRef<Path>, format: ExportFormat) -> Result<()> {
    let path = path.as_ref();
    let mut out = BufWriter::new(File::create(path)?);
    write(surface, format, &mut out)?;
    out.flush()?;
    log::debug!("exported {:?} to {}", format, path.display());
    Ok(())
}

fn write<W: Write>(surface: &Surface, format: ExportFormat, out: &mut W) -> Result<()> {
    match format {
        ExportFormat::Jpeg { quality } => {
            if !(1..=100).contains(&quality) {
                return Err(Error::Encode(format!(
                    "JPEG quality must be 1-100, got {quality}"
                )));
            }
            let rgb = flatten_onto_black(surface);
            JpegEncoder::new_with_quality(out, quality).encode_image(&rgb)?;
        }
        ExportFormat::Png => {
            // The PNG encoder needs Seek, so go through a buffer
            let mut buf = Cursor::new(Vec::new());
            surface.as_image().write_to(&mut buf, ImageFormat::Png)?;
            out.write_all(buf.get_ref())?;
        }
    }
    Ok(())
}

/// JPEG has no alpha; transparent pixels come out black.
fn flatten_onto_black(surface: &Surface) -> RgbImage {
    let (width, height) = surface.dimensions();
    let mut rgb = RgbImage::new(width, height);
    for (dst, src) in rgb.pixels_mut().zip(surface.as_image().pixels()) {
        let [r, g, b, a] = src.0;
        let scale = |c: u8| ((c as u32 * a as u32 + 127) / 255) as u8;
        *dst = Rgb([scale(r), scale(g), scale(b)]);
    }
    rgb
}
