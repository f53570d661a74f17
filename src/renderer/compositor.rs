//! Paints background and wrapped text onto a surface.

use image::RgbaImage;

use super::background::{Background, BackgroundImage};
use super::text::{TextEngine, TextLine};
use super::Surface;
use crate::config::CanvasConfig;
use crate::font;
use crate::layout::{self, LineBreaker, Offset};
use crate::request::{RenderRequest, StyleConfig};

/// Owns the font system and the per-image stretch cache.
pub struct Compositor {
    config: CanvasConfig,
    text: TextEngine,
    /// Last background image stretched to the canvas size
    stretched: Option<(BackgroundImage, RgbaImage)>,
}

impl Compositor {
    pub fn new(config: CanvasConfig) -> Self {
        Self::with_text_engine(config, TextEngine::new())
    }

    pub fn with_text_engine(config: CanvasConfig, text: TextEngine) -> Self {
        Self {
            config,
            text,
            stretched: None,
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn text_engine_mut(&mut self) -> &mut TextEngine {
        &mut self.text
    }

    /// Width of `text` in the style's font.
    pub fn measure_width(&mut self, text: &str, style: &StyleConfig) -> f64 {
        self.text
            .measure_width(text, &style.font_family, style.font_size)
    }

    /// The line breaker for `style` on this canvas.
    pub fn line_breaker(&self, style: &StyleConfig) -> LineBreaker {
        LineBreaker::new(
            self.config.width as f64,
            self.config.max_lines(style.font_size),
        )
    }

    /// Wrap `text` to the canvas width using real font metrics.
    pub fn wrap(&mut self, text: &str, style: &StyleConfig) -> Vec<String> {
        let breaker = self.line_breaker(style);
        let text_engine = &mut self.text;
        breaker.wrap(text, |candidate| {
            text_engine.measure_width(candidate, &style.font_family, style.font_size)
        })
    }

    /// Paint one frame in place: clear, background, then the lines stacked
    /// downward from the canvas center shifted by `offset`.
    pub fn render(
        &mut self,
        surface: &mut Surface,
        background: &Background,
        style: &StyleConfig,
        lines: &[String],
        offset: Offset,
    ) {
        let CanvasConfig { width, height, .. } = self.config;
        surface.reset(width, height);

        log::debug!(
            "render {}x{} font '{}' with {} line(s) at offset ({}, {})",
            width,
            height,
            font::font_shorthand(style.font_size, &style.font_family),
            lines.len(),
            offset.x,
            offset.y
        );

        match background {
            Background::Image(image) => {
                let stretched = self.stretched_background(image);
                surface.draw_image(stretched);
            }
            Background::Color(color) => surface.fill(*color),
        }

        let anchor = self.config.center() + offset;
        let line_height = self.config.line_height(style.font_size);

        for (index, text) in lines.iter().enumerate() {
            let line = TextLine {
                text,
                family: &style.font_family,
                font_size: style.font_size,
                line_height,
                color: style.text_color,
                center_x: anchor.x,
                middle_y: layout::line_center_y(anchor.y, line_height, index),
            };
            self.text.paint_line(surface, &line);
        }
    }

    /// Wrap and paint `request` into `surface`, returning the lines used.
    pub fn compose_into(&mut self, request: &RenderRequest, surface: &mut Surface) -> Vec<String> {
        let lines = self.wrap(&request.text, &request.style);
        self.render(
            surface,
            &request.background(),
            &request.style,
            &lines,
            request.offset,
        );
        lines
    }

    /// Render `request` onto a fresh surface.
    pub fn compose(&mut self, request: &RenderRequest) -> Surface {
        let mut surface = Surface::new(self.config.width, self.config.height);
        self.compose_into(request, &mut surface);
        surface
    }

    fn stretched_background(&mut self, image: &BackgroundImage) -> &RgbaImage {
        let size = (self.config.width, self.config.height);
        let entry = match self.stretched.take() {
            Some((cached, pixels)) if cached.same_pixels(image) && pixels.dimensions() == size => {
                (cached, pixels)
            }
            _ => {
                log::debug!(
                    "stretching {:?} background to {}x{}",
                    image.intrinsic_size(),
                    size.0,
                    size.1
                );
                (image.clone(), image.stretched(size.0, size.1))
            }
        };
        &self.stretched.insert(entry).1
    }
}
