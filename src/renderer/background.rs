//! Background sources and image decoding.
//!
//! Raster formats (PNG, JPEG, GIF, WebP) decode through `image`; SVG
//! documents are rasterized at their intrinsic size with resvg. Decoding
//! always completes before a `BackgroundImage` exists, so the compositor
//! never sees a partial bitmap.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::color::Color;
use crate::error::{Error, Result};

/// Source for a background image - a file path or in-memory bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// Raster image from a file path (PNG, JPEG, GIF, WebP)
    Path(PathBuf),
    /// Raster image from in-memory bytes
    Bytes(Arc<[u8]>),
    /// SVG from a file path
    SvgPath(PathBuf),
    /// SVG from in-memory bytes
    SvgBytes(Arc<[u8]>),
}

impl ImageSource {
    pub fn is_svg(&self) -> bool {
        matches!(self, ImageSource::SvgPath(_) | ImageSource::SvgBytes(_))
    }

    /// Decode the source into a bitmap.
    pub fn decode(&self) -> Result<BackgroundImage> {
        let pixels = match self {
            ImageSource::Path(path) => image::open(path)?.to_rgba8(),
            ImageSource::Bytes(bytes) => image::load_from_memory(bytes)?.to_rgba8(),
            ImageSource::SvgPath(path) => rasterize_svg(&std::fs::read(path)?)?,
            ImageSource::SvgBytes(bytes) => rasterize_svg(bytes)?,
        };
        BackgroundImage::new(pixels)
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
        {
            ImageSource::SvgPath(path)
        } else {
            ImageSource::Path(path)
        }
    }
}

impl From<&Path> for ImageSource {
    fn from(path: &Path) -> Self {
        ImageSource::from(path.to_path_buf())
    }
}

impl From<&str> for ImageSource {
    fn from(path: &str) -> Self {
        ImageSource::from(PathBuf::from(path))
    }
}

impl From<Vec<u8>> for ImageSource {
    /// Sniff the bytes: anything that looks like SVG markup is treated as
    /// SVG, everything else as a raster format.
    fn from(bytes: Vec<u8>) -> Self {
        if looks_like_svg(&bytes) {
            ImageSource::SvgBytes(bytes.into())
        } else {
            ImageSource::Bytes(bytes.into())
        }
    }
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    let head = String::from_utf8_lossy(head);
    let head = head.trim_start_matches('\u{feff}').trim_start();
    head.starts_with("<svg") || (head.starts_with("<?xml") && head.contains("<svg"))
}

/// Render an SVG document to straight-alpha RGBA at its intrinsic size.
fn rasterize_svg(bytes: &[u8]) -> Result<RgbaImage> {
    let tree = resvg::usvg::Tree::from_data(bytes, &resvg::usvg::Options::default())
        .map_err(|e| Error::Svg(e.to_string()))?;
    let size = tree.size();
    let width = size.width().ceil() as u32;
    let height = size.height().ceil() as u32;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or(Error::EmptyImage { width, height })?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );

    // tiny-skia stores premultiplied alpha
    let mut out = RgbaImage::new(width, height);
    for (dst, src) in out.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Ok(out)
}

/// A fully decoded background bitmap.
///
/// Cloning is cheap; the pixels are shared.
#[derive(Debug, Clone)]
pub struct BackgroundImage {
    pixels: Arc<RgbaImage>,
}

impl BackgroundImage {
    pub fn new(pixels: RgbaImage) -> Result<Self> {
        let (width, height) = pixels.dimensions();
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage { width, height });
        }
        Ok(Self {
            pixels: Arc::new(pixels),
        })
    }

    /// Natural size of the decoded image.
    pub fn intrinsic_size(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Stretch to exactly `width`x`height`, ignoring aspect ratio.
    pub fn stretched(&self, width: u32, height: u32) -> RgbaImage {
        if self.pixels.dimensions() == (width, height) {
            return (*self.pixels).clone();
        }
        imageops::resize(&*self.pixels, width, height, FilterType::Triangle)
    }

    pub(crate) fn same_pixels(&self, other: &BackgroundImage) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}

impl PartialEq for BackgroundImage {
    /// Two images are equal when they share the same decoded pixels.
    fn eq(&self, other: &Self) -> bool {
        self.same_pixels(other)
    }
}

/// What fills the surface behind the text.
#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    Color(Color),
    Image(BackgroundImage),
}

impl Default for Background {
    fn default() -> Self {
        Background::Color(Color::WHITE)
    }
}
