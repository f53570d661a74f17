//! Pointer handling for dragging the text block around the canvas.
//!
//! A drag is a small state machine: `Idle -> Dragging { anchor } -> Idle`.
//! The anchor is captured on press as `pointer - offset`, and every move maps
//! to `offset = pointer - anchor`, so the final offset depends only on the
//! press and the last move.

use crate::layout::Offset;

/// On-screen placement of the canvas element, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl CanvasBounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Viewport point to canvas-relative point (no scaling).
    pub fn to_canvas(&self, x: f64, y: f64) -> Offset {
        Offset::new(x - self.left, y - self.top)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && y >= self.top && x < self.left + self.width && y < self.top + self.height
    }
}

/// Pointer input forwarded by the host, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Button pressed over the canvas
    Down { x: f64, y: f64 },
    /// Pointer moved
    Move { x: f64, y: f64 },
    /// Button released
    Up { x: f64, y: f64 },
}

impl PointerEvent {
    pub fn coords(&self) -> (f64, f64) {
        match *self {
            PointerEvent::Down { x, y } | PointerEvent::Move { x, y } | PointerEvent::Up { x, y } => {
                (x, y)
            }
        }
    }
}

/// Drag state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// `pointer - offset` at press time
        anchor: Offset,
    },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    /// Start (or restart) a drag with the pointer at `pointer` while the text
    /// sits at `current`.
    pub fn press(&mut self, pointer: Offset, current: Offset) {
        let anchor = pointer - current;
        log::trace!("drag start, anchor ({}, {})", anchor.x, anchor.y);
        *self = DragState::Dragging { anchor };
    }

    /// The offset the text should move to, or `None` when not dragging.
    pub fn drag_to(&self, pointer: Offset) -> Option<Offset> {
        match self {
            DragState::Dragging { anchor } => Some(pointer - *anchor),
            DragState::Idle => None,
        }
    }

    /// End the drag; always returns to `Idle`.
    pub fn release(&mut self) {
        if self.is_dragging() {
            log::trace!("drag end");
        }
        *self = DragState::Idle;
    }

    /// Feed one pointer event; returns the new offset if it changed the
    /// text position. Presses outside `bounds` do not start a drag.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        bounds: &CanvasBounds,
        current: Offset,
    ) -> Option<Offset> {
        let (x, y) = event.coords();
        let pointer = bounds.to_canvas(x, y);
        match event {
            PointerEvent::Down { .. } => {
                if bounds.contains(x, y) {
                    self.press(pointer, current);
                }
                None
            }
            PointerEvent::Move { .. } => self.drag_to(pointer),
            PointerEvent::Up { .. } => {
                self.release();
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_translate_viewport_points() {
        let bounds = CanvasBounds::new(100.0, 50.0, 600.0, 600.0);
        assert_eq!(bounds.to_canvas(130.0, 80.0), Offset::new(30.0, 30.0));
        assert!(bounds.contains(100.0, 50.0));
        assert!(!bounds.contains(700.0, 50.0));
    }

    #[test]
    fn press_captures_anchor() {
        let mut drag = DragState::default();
        drag.press(Offset::new(50.0, 60.0), Offset::new(10.0, -5.0));
        assert_eq!(
            drag,
            DragState::Dragging {
                anchor: Offset::new(40.0, 65.0)
            }
        );
    }

    #[test]
    fn move_translates_by_pointer_delta() {
        let o0 = Offset::new(10.0, 20.0);
        let p0 = Offset::new(300.0, 300.0);
        let p1 = Offset::new(350.0, 280.0);

        let mut drag = DragState::Idle;
        drag.press(p0, o0);
        assert_eq!(drag.drag_to(p1), Some(p1 - p0 + o0));
    }

    #[test]
    fn final_offset_is_path_independent() {
        let bounds = CanvasBounds::new(8.0, 8.0, 1200.0, 1200.0);
        let start = Offset::new(-40.0, 12.0);

        let replay = |moves: &[(f64, f64)]| {
            let mut drag = DragState::Idle;
            let mut offset = start;
            drag.handle(PointerEvent::Down { x: 400.0, y: 500.0 }, &bounds, offset);
            for &(x, y) in moves {
                if let Some(next) = drag.handle(PointerEvent::Move { x, y }, &bounds, offset) {
                    offset = next;
                }
            }
            drag.handle(PointerEvent::Up { x: 0.0, y: 0.0 }, &bounds, offset);
            offset
        };

        let direct = replay(&[(470.0, 430.0)]);
        let detour = replay(&[(10.0, 900.0), (-300.0, 2.0), (470.0, 430.0)]);
        assert_eq!(direct, detour);
        assert_eq!(direct, Offset::new(30.0, -58.0));
    }

    #[test]
    fn press_outside_canvas_does_not_drag() {
        let bounds = CanvasBounds::new(100.0, 100.0, 200.0, 200.0);
        let mut drag = DragState::Idle;
        drag.handle(PointerEvent::Down { x: 50.0, y: 150.0 }, &bounds, Offset::ZERO);
        assert!(!drag.is_dragging());
        assert_eq!(
            drag.handle(PointerEvent::Move { x: 150.0, y: 150.0 }, &bounds, Offset::ZERO),
            None
        );

        drag.handle(PointerEvent::Down { x: 150.0, y: 150.0 }, &bounds, Offset::ZERO);
        assert!(drag.is_dragging());
    }

    #[test]
    fn moves_while_idle_are_ignored() {
        let mut drag = DragState::Idle;
        let bounds = CanvasBounds::default();
        assert_eq!(
            drag.handle(PointerEvent::Move { x: 5.0, y: 5.0 }, &bounds, Offset::ZERO),
            None
        );
    }

    #[test]
    fn release_always_idles() {
        let mut drag = DragState::Idle;
        drag.release();
        assert!(!drag.is_dragging());

        drag.press(Offset::ZERO, Offset::ZERO);
        assert!(drag.is_dragging());
        drag.release();
        assert_eq!(drag, DragState::Idle);
        assert_eq!(drag.drag_to(Offset::new(1.0, 1.0)), None);
    }

    #[test]
    fn unbounded_offsets_are_allowed() {
        let mut drag = DragState::Idle;
        drag.press(Offset::new(0.0, 0.0), Offset::ZERO);
        assert_eq!(
            drag.drag_to(Offset::new(-5000.0, 9000.0)),
            Some(Offset::new(-5000.0, 9000.0))
        );
    }
}
