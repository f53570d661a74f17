//! Canvas configuration.
//!
//! ```
//! use backdrop::config::CanvasConfig;
//!
//! let config = CanvasConfig::default();
//! assert_eq!((config.width, config.height), (1200, 1200));
//! assert_eq!(config.max_lines(40.0), 25);
//! ```

use crate::export::ExportFormat;
use crate::layout::{self, Offset};

/// Canvas-level settings shared by every render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    /// Line height as a multiple of the font size
    pub line_height_factor: f64,
    pub export: ExportFormat,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 1200,
            line_height_factor: 1.2,
            export: ExportFormat::default(),
        }
    }
}

impl CanvasConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    pub fn line_height_factor(mut self, factor: f64) -> Self {
        self.line_height_factor = factor;
        self
    }

    pub fn export(mut self, export: ExportFormat) -> Self {
        self.export = export;
        self
    }

    /// Canvas center, the point a zero offset maps to.
    pub fn center(&self) -> Offset {
        Offset::new(self.width as f64 / 2.0, self.height as f64 / 2.0)
    }

    pub fn line_height(&self, font_size: f64) -> f64 {
        layout::line_height(font_size, self.line_height_factor)
    }

    /// How many lines of `font_size` text fit the canvas height.
    pub fn max_lines(&self, font_size: f64) -> usize {
        layout::max_lines(self.height as f64, self.line_height(font_size))
    }
}
