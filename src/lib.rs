//! Backdrop: compose text over a solid color or an uploaded image.
//!
//! A render takes a [`RenderRequest`](request::RenderRequest) (text, font,
//! colors, optional background image and a drag offset), wraps the text
//! greedily to the canvas width, and paints it onto a fixed-size
//! [`Surface`](renderer::Surface) that can be exported as JPEG or PNG.
//!
//! ```no_run
//! use backdrop::prelude::*;
//!
//! # fn main() -> backdrop::Result<()> {
//! let request = RenderRequest::new("Simple background maker")
//!     .font_family("Times New Roman")
//!     .text_color(Color::parse("#ffffff")?)
//!     .background_color(Color::parse("#202040")?);
//! let surface = backdrop::render(&request);
//! backdrop::export::save(&surface, "image.jpeg", ExportFormat::default())?;
//! # Ok(())
//! # }
//! ```
//!
//! For interactive use, [`Editor`](editor::Editor) tracks changes and
//! re-renders once per change batch.

pub mod color;
pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod font;
pub mod interaction;
pub mod layout;
pub mod renderer;
pub mod request;
pub mod upload;

pub use error::{Error, Result};
pub use renderer::{fonts_available, measure_text, render, wrap_text};

pub mod prelude {
    pub use crate::color::Color;
    pub use crate::config::CanvasConfig;
    pub use crate::editor::{ChangeFlags, Editor};
    pub use crate::export::ExportFormat;
    pub use crate::font::FontFamily;
    pub use crate::interaction::{CanvasBounds, DragState, PointerEvent};
    pub use crate::layout::{wrap_lines, LineBreaker, Offset};
    pub use crate::renderer::{
        Background, BackgroundImage, Compositor, ImageSource, Surface, TextEngine,
    };
    pub use crate::request::{RenderRequest, StyleConfig};
    pub use crate::upload::BackgroundLoader;
}
