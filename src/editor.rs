//! The change-tracking driver around the compositor.
//!
//! The editor holds the current inputs, records which of them changed, and
//! renders exactly once per change batch. Outside [`Editor::batch`] every
//! effective change renders immediately; inside it, changes accumulate and
//! one render runs when the outermost batch closes.

use bitflags::bitflags;

use crate::color::Color;
use crate::config::CanvasConfig;
use crate::error::Result;
use crate::export;
use crate::font::FontFamily;
use crate::interaction::{CanvasBounds, DragState, PointerEvent};
use crate::layout::Offset;
use crate::renderer::{BackgroundImage, Compositor, ImageSource, Surface};
use crate::request::RenderRequest;
use crate::upload::BackgroundLoader;

bitflags! {
    /// Which inputs changed since the last render
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct ChangeFlags: u8 {
        const TEXT       = 0b0_0001;
        const FONT       = 0b0_0010;
        const COLORS     = 0b0_0100;
        const BACKGROUND = 0b0_1000;
        const OFFSET     = 0b1_0000;
    }
}

impl ChangeFlags {
    /// Changes that can move wrap points.
    pub fn affects_layout(self) -> bool {
        self.intersects(ChangeFlags::TEXT | ChangeFlags::FONT)
    }
}

type Observer = Box<dyn FnMut(&Surface, ChangeFlags)>;

/// Owns the inputs, the drag session and the output surface.
pub struct Editor {
    request: RenderRequest,
    compositor: Compositor,
    surface: Surface,
    lines: Vec<String>,
    drag: DragState,
    bounds: CanvasBounds,
    pending: ChangeFlags,
    batch_depth: usize,
    observers: Vec<Observer>,
    loader: Option<BackgroundLoader>,
    renders: u64,
}

impl Editor {
    /// Create an editor and paint the initial frame.
    pub fn new(config: CanvasConfig) -> Self {
        Self::with_compositor(Compositor::new(config))
    }

    pub fn with_compositor(compositor: Compositor) -> Self {
        let config = *compositor.config();
        let mut editor = Self {
            request: RenderRequest::default(),
            surface: Surface::new(config.width, config.height),
            compositor,
            lines: Vec::new(),
            drag: DragState::Idle,
            bounds: CanvasBounds::new(0.0, 0.0, config.width as f64, config.height as f64),
            pending: ChangeFlags::empty(),
            batch_depth: 0,
            observers: Vec::new(),
            loader: None,
            renders: 0,
        };
        editor.render_now(ChangeFlags::all());
        editor
    }

    pub fn request(&self) -> &RenderRequest {
        &self.request
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Lines produced by the latest render.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn config(&self) -> &CanvasConfig {
        self.compositor.config()
    }

    /// Number of renders so far, including the initial one.
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    /// Call `observer` after every render with the surface and the changes
    /// that caused it.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&Surface, ChangeFlags) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.request.text != text {
            self.request.text = text;
            self.mark(ChangeFlags::TEXT);
        }
    }

    pub fn set_font_family(&mut self, family: impl Into<FontFamily>) {
        let family = family.into();
        if self.request.style.font_family != family {
            self.request.style.font_family = family;
            self.mark(ChangeFlags::FONT);
        }
    }

    pub fn set_text_color(&mut self, color: Color) {
        if self.request.style.text_color != color {
            self.request.style.text_color = color;
            self.mark(ChangeFlags::COLORS);
        }
    }

    /// Has no visible effect while a background image is loaded.
    pub fn set_background_color(&mut self, color: Color) {
        if self.request.style.background_color != color {
            self.request.style.background_color = color;
            self.mark(ChangeFlags::COLORS);
        }
    }

    /// Install a decoded image; it replaces the color fill from now on.
    pub fn set_background_image(&mut self, image: BackgroundImage) {
        if self.request.background_image.as_ref() != Some(&image) {
            self.request.background_image = Some(image);
            self.mark(ChangeFlags::BACKGROUND);
        }
    }

    pub fn set_offset(&mut self, offset: Offset) {
        if self.request.offset != offset {
            self.request.offset = offset;
            self.mark(ChangeFlags::OFFSET);
        }
    }

    /// Where the canvas currently sits in the viewport.
    pub fn set_canvas_bounds(&mut self, bounds: CanvasBounds) {
        self.bounds = bounds;
    }

    /// Feed a pointer event from the host.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        if let Some(offset) = self.drag.handle(event, &self.bounds, self.request.offset) {
            self.set_offset(offset);
        }
    }

    /// Group changes so they render once.
    ///
    /// ```no_run
    /// use backdrop::prelude::*;
    ///
    /// let mut editor = Editor::new(CanvasConfig::default());
    /// editor.batch(|e| {
    ///     e.set_text("Hello");
    ///     e.set_text_color(Color::WHITE);
    ///     e.set_background_color(Color::BLACK);
    /// });
    /// assert_eq!(editor.render_count(), 2);
    /// ```
    pub fn batch<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        self.batch_depth += 1;
        let mut guard = BatchGuard { editor: self };
        f(&mut *guard.editor)
    }

    /// Render now if anything changed; returns whether a render ran.
    pub fn flush(&mut self) -> bool {
        if self.pending.is_empty() {
            return false;
        }
        let flags = std::mem::take(&mut self.pending);
        self.render_now(flags);
        true
    }

    /// Start decoding an uploaded image; a later upload replaces an earlier
    /// one that has not finished yet.
    pub fn load_background(&mut self, source: impl Into<ImageSource>) {
        let loader = BackgroundLoader::spawn(source.into());
        if let Some(previous) = self.loader.replace(loader) {
            log::debug!("superseding pending upload {:?}", previous.source());
        }
    }

    pub fn has_pending_upload(&self) -> bool {
        self.loader.is_some()
    }

    /// Install a finished upload, if any. Returns `Ok(true)` when a new
    /// background was applied.
    pub fn poll(&mut self) -> Result<bool> {
        let Some(result) = self.loader.as_ref().and_then(BackgroundLoader::try_take) else {
            return Ok(false);
        };
        self.loader = None;
        self.set_background_image(result?);
        Ok(true)
    }

    /// Block until the pending upload finishes and install it.
    pub fn wait_for_upload(&mut self) -> Result<bool> {
        let Some(loader) = self.loader.take() else {
            return Ok(false);
        };
        self.set_background_image(loader.wait()?);
        Ok(true)
    }

    /// Encode the current surface with the configured export format.
    pub fn export(&self) -> Result<Vec<u8>> {
        export::encode(&self.surface, self.config().export)
    }

    fn mark(&mut self, flags: ChangeFlags) {
        self.pending |= flags;
        if self.batch_depth == 0 {
            self.flush();
        }
    }

    fn render_now(&mut self, flags: ChangeFlags) {
        log::debug!(
            "render #{} for {:?} (relayout: {})",
            self.renders + 1,
            flags,
            flags.affects_layout()
        );
        self.lines = self.compositor.compose_into(&self.request, &mut self.surface);
        self.renders += 1;
        for observer in &mut self.observers {
            observer(&self.surface, flags);
        }
    }
}

/// Closes a batch even if the batched closure panics.
struct BatchGuard<'a> {
    editor: &'a mut Editor,
}

impl Drop for BatchGuard<'_> {
    fn drop(&mut self) {
        self.editor.batch_depth -= 1;
        if std::thread::panicking() {
            // Pending changes render with the next change instead
            log::warn!(
                "batch aborted by a panic, keeping {:?} pending",
                self.editor.pending
            );
            return;
        }
        if self.editor.batch_depth == 0 {
            self.editor.flush();
        }
    }
}
