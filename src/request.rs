//! The immutable inputs of a single render.

use crate::color::Color;
use crate::font::FontFamily;
use crate::layout::Offset;
use crate::renderer::{Background, BackgroundImage};

/// Text styling for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    pub font_family: FontFamily,
    /// Font size in pixels
    pub font_size: f64,
    pub text_color: Color,
    /// Fill used when no background image is loaded
    pub background_color: Color,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_family: FontFamily::default(),
            font_size: 40.0,
            text_color: Color::BLACK,
            background_color: Color::WHITE,
        }
    }
}

/// Everything a render needs, gathered in one value.
///
/// # Examples
///
/// ```no_run
/// use backdrop::prelude::*;
///
/// let request = RenderRequest::new("Hello there")
///     .text_color(Color::parse("#336699").unwrap())
///     .offset(Offset::new(0.0, -100.0));
/// let surface = backdrop::render(&request);
/// assert_eq!(surface.dimensions(), (1200, 1200));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderRequest {
    pub text: String,
    pub style: StyleConfig,
    /// An uploaded image; when present it wins over `style.background_color`
    pub background_image: Option<BackgroundImage>,
    pub offset: Offset,
}

impl RenderRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }

    pub fn font_family(mut self, family: impl Into<FontFamily>) -> Self {
        self.style.font_family = family.into();
        self
    }

    pub fn text_color(mut self, color: Color) -> Self {
        self.style.text_color = color;
        self
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.style.background_color = color;
        self
    }

    pub fn background_image(mut self, image: BackgroundImage) -> Self {
        self.background_image = Some(image);
        self
    }

    pub fn offset(mut self, offset: Offset) -> Self {
        self.offset = offset;
        self
    }

    /// The background to paint: the image if one is loaded, else the color.
    pub fn background(&self) -> Background {
        match &self.background_image {
            Some(image) => Background::Image(image.clone()),
            None => Background::Color(self.style.background_color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    #[test]
    fn defaults_match_initial_ui_state() {
        let request = RenderRequest::default();
        assert_eq!(request.text, "");
        assert_eq!(request.style.font_family, FontFamily::Name("Roboto".into()));
        assert_eq!(request.style.font_size, 40.0);
        assert_eq!(request.style.text_color, Color::BLACK);
        assert_eq!(request.background(), Background::Color(Color::WHITE));
        assert_eq!(request.offset, Offset::ZERO);
    }

    #[test]
    fn image_wins_over_color() {
        let image = BackgroundImage::new(RgbaImage::new(2, 2)).unwrap();
        let request = RenderRequest::new("x")
            .background_color(Color::from_hex(0xff0000))
            .background_image(image.clone());
        assert_eq!(request.background(), Background::Image(image));
    }

    #[test]
    fn builder_sets_fields() {
        let request = RenderRequest::new("hi")
            .font_family("Arial")
            .text_color(Color::WHITE)
            .offset(Offset::new(3.0, 4.0));
        assert_eq!(request.style.font_family, FontFamily::Name("Arial".into()));
        assert_eq!(request.style.text_color, Color::WHITE);
        assert_eq!(request.offset, Offset::new(3.0, 4.0));
    }
}
