//! The pixel surface a render paints into.

use image::{Rgba, RgbaImage};

use crate::color::Color;

/// A fixed-size RGBA8 raster, overwritten in place by each render.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pixels: RgbaImage,
}

impl Surface {
    /// A fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Reallocate to `width`x`height` if needed, then clear to transparent.
    pub fn reset(&mut self, width: u32, height: u32) {
        if self.pixels.dimensions() != (width, height) {
            self.pixels = RgbaImage::new(width, height);
        } else {
            self.clear();
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Overwrite every pixel with `color`.
    pub fn fill(&mut self, color: Color) {
        let rgba = color.to_rgba();
        for pixel in self.pixels.pixels_mut() {
            *pixel = rgba;
        }
    }

    /// Source-over composite `src` (same size as the surface) at the origin.
    pub fn draw_image(&mut self, src: &RgbaImage) {
        for (dst, src) in self.pixels.pixels_mut().zip(src.pixels()) {
            *dst = blend(*dst, *src);
        }
    }

    /// Source-over blend a single pixel; coordinates outside the surface are
    /// ignored.
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Rgba<u8>) {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if x >= self.pixels.width() || y >= self.pixels.height() {
            return;
        }
        let dst = self.pixels.get_pixel_mut(x, y);
        *dst = blend(*dst, color);
    }

    /// Read back a pixel, `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.pixels.get_pixel_checked(x, y).map(|p| {
            let [r, g, b, a] = p.0;
            Color::rgba(r, g, b, a)
        })
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }
}

impl From<RgbaImage> for Surface {
    fn from(pixels: RgbaImage) -> Self {
        Self { pixels }
    }
}

/// Straight-alpha source-over.
fn blend(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as u32;
    match sa {
        0 => return dst,
        255 => return src,
        _ => {}
    }
    let da = dst[3] as u32;
    // out_a = sa + da * (1 - sa), all scaled by 255
    let out_a = sa * 255 + da * (255 - sa);
    if out_a == 0 {
        return Rgba([0, 0, 0, 0]);
    }
    let channel = |s: u8, d: u8| {
        let v = (s as u32 * sa * 255 + d as u32 * da * (255 - sa) + out_a / 2) / out_a;
        v.min(255) as u8
    };
    Rgba([
        channel(src[0], dst[0]),
        channel(src[1], dst[1]),
        channel(src[2], dst[2]),
        ((out_a + 127) / 255).min(255) as u8,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_surface_is_transparent() {
        let surface = Surface::new(4, 3);
        assert_eq!(surface.dimensions(), (4, 3));
        assert_eq!(surface.pixel(3, 2), Some(Color::TRANSPARENT));
        assert_eq!(surface.pixel(4, 0), None);
    }

    #[test]
    fn fill_and_reset() {
        let mut surface = Surface::new(2, 2);
        surface.fill(Color::from_hex(0x123456));
        assert_eq!(surface.pixel(1, 1), Some(Color::from_hex(0x123456)));

        surface.reset(2, 2);
        assert_eq!(surface.pixel(1, 1), Some(Color::TRANSPARENT));

        surface.reset(5, 1);
        assert_eq!(surface.dimensions(), (5, 1));
    }

    #[test]
    fn blend_half_black_over_white() {
        let mut surface = Surface::new(1, 1);
        surface.fill(Color::WHITE);
        surface.blend_pixel(0, 0, Rgba([0, 0, 0, 128]));
        let p = surface.pixel(0, 0).unwrap();
        assert_eq!(p.a, 255);
        assert!((126..=128).contains(&p.r), "got {p:?}");
    }

    #[test]
    fn blend_clips_out_of_bounds() {
        let mut surface = Surface::new(2, 2);
        surface.blend_pixel(-1, 0, Rgba([255, 0, 0, 255]));
        surface.blend_pixel(0, 2, Rgba([255, 0, 0, 255]));
        surface.blend_pixel(i64::MAX, i64::MIN, Rgba([255, 0, 0, 255]));
        assert!(surface.as_raw().iter().all(|&b| b == 0));
    }

    #[test]
    fn opaque_source_replaces_and_transparent_keeps() {
        assert_eq!(
            blend(Rgba([1, 2, 3, 255]), Rgba([9, 9, 9, 255])),
            Rgba([9, 9, 9, 255])
        );
        assert_eq!(
            blend(Rgba([1, 2, 3, 255]), Rgba([9, 9, 9, 0])),
            Rgba([1, 2, 3, 255])
        );
        // Over a transparent pixel the source color survives unchanged
        assert_eq!(
            blend(Rgba([0, 0, 0, 0]), Rgba([200, 100, 50, 128])),
            Rgba([200, 100, 50, 128])
        );
    }
}
