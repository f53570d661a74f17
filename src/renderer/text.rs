//! Text shaping, measurement and glyph painting.
//!
//! Measurement and painting share one font system so wrap points always
//! agree with the glyphs that end up on the surface.

use std::borrow::Cow;

use cosmic_text::{Attrs, Buffer, FontSystem, Metrics, Shaping, SwashCache};
use image::Rgba;

use super::Surface;
use crate::color::Color;
use crate::font::FontFamily;

/// Font system plus glyph cache.
pub struct TextEngine {
    font_system: FontSystem,
    swash_cache: SwashCache,
}

impl TextEngine {
    /// Load the system font database.
    pub fn new() -> Self {
        Self::from_font_system(FontSystem::new())
    }

    pub fn from_font_system(font_system: FontSystem) -> Self {
        if font_system.db().is_empty() {
            log::warn!("Font database is empty, text will measure as zero width and paint nothing");
        }
        Self {
            font_system,
            swash_cache: SwashCache::new(),
        }
    }

    /// Whether any font face is available to shape with.
    pub fn has_fonts(&self) -> bool {
        !self.font_system.db().is_empty()
    }

    pub fn font_system_mut(&mut self) -> &mut FontSystem {
        &mut self.font_system
    }

    /// Shape `text` on a single unbounded line and return its advance width.
    pub fn measure_width(&mut self, text: &str, family: &FontFamily, font_size: f64) -> f64 {
        if text.is_empty() || font_size <= 0.0 || !self.has_fonts() {
            return 0.0;
        }
        let buffer = self.shape_line(text, family, font_size as f32, font_size as f32 * 1.2);
        buffer
            .layout_runs()
            .map(|run| run.line_w)
            .fold(0.0f32, f32::max) as f64
    }

    /// Paint one line horizontally centered on `center_x`, with its line box
    /// vertically centered on `middle_y`.
    pub fn paint_line(&mut self, surface: &mut Surface, line: &TextLine<'_>) {
        if line.text.is_empty() || line.font_size <= 0.0 || !self.has_fonts() {
            return;
        }

        let buffer = self.shape_line(
            line.text,
            line.family,
            line.font_size as f32,
            line.line_height as f32,
        );

        let width = buffer
            .layout_runs()
            .map(|run| run.line_w)
            .fold(0.0f32, f32::max) as f64;
        let left = (line.center_x - width / 2.0).round();
        let top = (line.middle_y - line.line_height / 2.0).round();

        // Glyphs may overhang their line box by up to about a line height
        let margin = line.line_height.max(line.font_size);
        let visible = left < surface.width() as f64 + margin
            && left + width > -margin
            && top < surface.height() as f64 + margin
            && top + line.line_height > -margin;
        if !visible {
            log::trace!("skip {:?}, off surface at ({}, {})", line.text, left, top);
            return;
        }
        let (left, top) = (left as i64, top as i64);

        log::trace!(
            "paint {:?} at ({}, {}) width {:.1}",
            line.text,
            left,
            top,
            width
        );

        buffer.draw(
            &mut self.font_system,
            &mut self.swash_cache,
            line.color.to_cosmic(),
            |x, y, w, h, color| {
                let rgba = Rgba(color.as_rgba());
                if rgba[3] == 0 {
                    return;
                }
                let (x, y) = (left + x as i64, top + y as i64);
                for dy in 0..h as i64 {
                    for dx in 0..w as i64 {
                        surface.blend_pixel(x + dx, y + dy, rgba);
                    }
                }
            },
        );
    }

    fn shape_line(
        &mut self,
        text: &str,
        family: &FontFamily,
        font_size: f32,
        line_height: f32,
    ) -> Buffer {
        let mut buffer =
            Buffer::new(&mut self.font_system, Metrics::new(font_size, line_height));
        buffer.set_size(&mut self.font_system, None, None);
        buffer.set_text(
            &mut self.font_system,
            &canvas_whitespace(text),
            &Attrs::new().family(family.to_cosmic()),
            Shaping::Advanced,
            None,
        );
        buffer.shape_until_scroll(&mut self.font_system, true);
        buffer
    }
}

impl Default for TextEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything needed to paint a single line.
#[derive(Debug, Clone, Copy)]
pub struct TextLine<'a> {
    pub text: &'a str,
    pub family: &'a FontFamily,
    pub font_size: f64,
    pub line_height: f64,
    pub color: Color,
    pub center_x: f64,
    pub middle_y: f64,
}

/// Replace ASCII whitespace other than space with a space, so a pasted
/// newline or tab renders as a gap instead of breaking the line.
pub fn canvas_whitespace(text: &str) -> Cow<'_, str> {
    const OTHER_WHITESPACE: [char; 4] = ['\t', '\n', '\x0C', '\r'];
    if text.contains(&OTHER_WHITESPACE[..]) {
        Cow::Owned(text.replace(&OTHER_WHITESPACE[..], " "))
    } else {
        Cow::Borrowed(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fontless() -> TextEngine {
        TextEngine::from_font_system(FontSystem::new_with_locale_and_db(
            "en-US".to_string(),
            cosmic_text::fontdb::Database::new(),
        ))
    }

    #[test]
    fn whitespace_is_flattened() {
        assert_eq!(canvas_whitespace("a\tb\nc\r\x0Cd"), "a b c  d");
        assert!(matches!(canvas_whitespace("plain text"), Cow::Borrowed(_)));
    }

    #[test]
    fn empty_text_measures_zero() {
        let mut engine = fontless();
        assert!(!engine.has_fonts());
        assert_eq!(engine.measure_width("", &FontFamily::SansSerif, 40.0), 0.0);
    }

    #[test]
    fn empty_database_paints_nothing() {
        let mut engine = fontless();
        let mut surface = Surface::new(20, 20);
        engine.paint_line(
            &mut surface,
            &TextLine {
                text: "Hi",
                family: &FontFamily::SansSerif,
                font_size: 10.0,
                line_height: 12.0,
                color: Color::BLACK,
                center_x: 10.0,
                middle_y: 10.0,
            },
        );
        assert!(surface.as_raw().iter().all(|&b| b == 0));
    }

    #[test]
    fn far_away_lines_are_skipped() {
        let mut engine = TextEngine::new();
        if !engine.has_fonts() {
            eprintln!("no system fonts, skipping");
            return;
        }
        let mut surface = Surface::new(40, 40);
        let far = [
            (3.0e9, 20.0),
            (-3.0e9, 20.0),
            (20.0, 3.0e9),
            (f64::NAN, 20.0),
        ];
        for (center_x, middle_y) in far {
            engine.paint_line(
                &mut surface,
                &TextLine {
                    text: "Hi",
                    family: &FontFamily::SansSerif,
                    font_size: 20.0,
                    line_height: 24.0,
                    color: Color::BLACK,
                    center_x,
                    middle_y,
                },
            );
        }
        assert!(surface.as_raw().iter().all(|&b| b == 0));
    }

    #[test]
    fn longer_text_measures_wider() {
        let mut engine = TextEngine::new();
        if !engine.has_fonts() {
            eprintln!("no system fonts, skipping");
            return;
        }
        let family = FontFamily::SansSerif;
        let short = engine.measure_width("Hi", &family, 40.0);
        let long = engine.measure_width("Hi there", &family, 40.0);
        assert!(short > 0.0);
        assert!(long > short);
        let bigger = engine.measure_width("Hi", &family, 80.0);
        assert!(bigger > short);
    }
}
