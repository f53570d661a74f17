//! CPU rendering: surfaces, text, backgrounds and the compositor.

pub mod background;
pub mod compositor;
pub mod surface;
pub mod text;

use std::cell::RefCell;

pub use background::{Background, BackgroundImage, ImageSource};
pub use compositor::Compositor;
pub use surface::Surface;
pub use text::{TextEngine, TextLine};

use crate::config::CanvasConfig;
use crate::request::{RenderRequest, StyleConfig};

thread_local! {
    // Loading the system font database is slow, so each thread keeps one
    static COMPOSITOR: RefCell<Compositor> =
        RefCell::new(Compositor::new(CanvasConfig::default()));
}

/// Render `request` on the default 1200x1200 canvas.
///
/// Identical requests produce bit-identical surfaces.
pub fn render(request: &RenderRequest) -> Surface {
    COMPOSITOR.with_borrow_mut(|c| c.compose(request))
}

/// Wrap `text` the way [`render`] would for `style`.
pub fn wrap_text(text: &str, style: &StyleConfig) -> Vec<String> {
    COMPOSITOR.with_borrow_mut(|c| c.wrap(text, style))
}

/// Measure a single line of text in `style`'s font
pub fn measure_text(text: &str, style: &StyleConfig) -> f64 {
    COMPOSITOR.with_borrow_mut(|c| c.measure_width(text, style))
}

/// Whether the shared compositor found any fonts on this host.
pub fn fonts_available() -> bool {
    COMPOSITOR.with_borrow_mut(|c| c.text_engine_mut().has_fonts())
}
