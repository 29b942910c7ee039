//! Pointer-driven stroke state machine.
//!
//! Consumes unified [`PointerEvent`]s, rescales their screen position into surface space and
//! forwards begin/extend/end calls to a [`StrokeTarget`]. The controller never writes pixels.

use crate::surface::{Point, StrokeTarget, SURFACE_SIZE};
use log::trace;

/// What the pointer did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Leave,
}

/// A position in the renderer's native screen units (terminal cells for the TUI).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Center of the terminal cell at `(column, row)`.
    pub fn cell_center(column: u16, row: u16) -> Self {
        Self {
            x: f32::from(column) + 0.5,
            y: f32::from(row) + 0.5,
        }
    }
}

/// Device-independent pointer event: mouse and touch both end up here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: ScreenPoint,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, position: ScreenPoint) -> Self {
        Self { kind, position }
    }
}

/// On-screen rectangle the surface is currently rendered into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CanvasRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    /// Map a screen position into surface coordinates.
    ///
    /// Scales by `SURFACE_SIZE / rendered size` on each axis, so the mapping does not depend on
    /// how large the canvas currently is on screen. A zero-sized rect maps everything to the
    /// origin.
    pub fn to_surface(&self, point: ScreenPoint) -> Point {
        let size = SURFACE_SIZE as f32;
        let scale_x = if self.width > 0.0 { size / self.width } else { 0.0 };
        let scale_y = if self.height > 0.0 { size / self.height } else { 0.0 };
        Point::new(
            (point.x - self.x) * scale_x,
            (point.y - self.y) * scale_y,
        )
    }
}

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeState {
    Idle,
    Drawing,
}

/// Translates pointer events into stroke calls on a target.
#[derive(Debug)]
pub struct StrokeController {
    state: StrokeState,
    viewport: CanvasRect,
}

impl StrokeController {
    pub fn new(viewport: CanvasRect) -> Self {
        Self {
            state: StrokeState::Idle,
            viewport,
        }
    }

    pub fn state(&self) -> StrokeState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        self.state == StrokeState::Drawing
    }

    pub fn viewport(&self) -> CanvasRect {
        self.viewport
    }

    /// Update the on-screen rectangle after a resize.
    pub fn set_viewport(&mut self, viewport: CanvasRect) {
        self.viewport = viewport;
    }

    /// Forget an open stroke without touching the target (used after the target was cleared).
    pub fn reset(&mut self) {
        self.state = StrokeState::Idle;
    }

    /// Apply one pointer event. Returns true when the target was called.
    pub fn handle<T: StrokeTarget + ?Sized>(&mut self, event: PointerEvent, target: &mut T) -> bool {
        match (self.state, event.kind) {
            (StrokeState::Idle, PointerKind::Down) => {
                let point = self.viewport.to_surface(event.position);
                trace!("stroke begin at ({:.1}, {:.1})", point.x, point.y);
                target.begin_stroke(point);
                self.state = StrokeState::Drawing;
                true
            }
            (StrokeState::Drawing, PointerKind::Down) => {
                // A second press without a release: close the old stroke first.
                target.end_stroke();
                target.begin_stroke(self.viewport.to_surface(event.position));
                true
            }
            (StrokeState::Drawing, PointerKind::Move) => {
                target.extend_stroke(self.viewport.to_surface(event.position));
                true
            }
            (StrokeState::Drawing, PointerKind::Up | PointerKind::Leave) => {
                target.end_stroke();
                self.state = StrokeState::Idle;
                true
            }
            (StrokeState::Idle, PointerKind::Move | PointerKind::Up | PointerKind::Leave) => false,
        }
    }
}
