//! Layout math: text offsets, line metrics and line breaking.

pub mod line_break;

pub use line_break::{wrap_lines, LineBreaker};

use std::ops::{Add, Sub};

/// A 2D displacement in canvas pixels.
///
/// Used both for the text offset (relative to the canvas center) and for
/// canvas-relative pointer positions during a drag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Offset {
    type Output = Offset;

    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Offset {
    type Output = Offset;

    fn sub(self, rhs: Offset) -> Offset {
        Offset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f64, f64)> for Offset {
    fn from((x, y): (f64, f64)) -> Self {
        Offset::new(x, y)
    }
}

pub fn line_height(font_size: f64, factor: f64) -> f64 {
    font_size * factor
}

/// `floor(canvas_height / line_height)`; zero when the line height is not
/// positive.
pub fn max_lines(canvas_height: f64, line_height: f64) -> usize {
    if line_height <= 0.0 || !line_height.is_finite() {
        return 0;
    }
    (canvas_height / line_height).floor().max(0.0) as usize
}

/// Vertical center of line `index` when a block is anchored at `anchor_y`.
///
/// Lines stack downward from the anchor: the first line's center sits half a
/// line below it.
pub fn line_center_y(anchor_y: f64, line_height: f64, index: usize) -> f64 {
    anchor_y + line_height * (index as f64 + 0.5)
}
