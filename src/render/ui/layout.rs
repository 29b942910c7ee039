//! Screen layout shared by the renderer and pointer hit-testing.
//!
//! Both sides compute the layout from the terminal size alone, so a mouse event is always
//! mapped against the same rectangles that were last drawn.

use crate::stroke::CanvasRect;
use ratatui::layout::Rect;

/// Largest canvas height in rows; the canvas is twice as many columns wide.
pub const MAX_CANVAS_ROWS: u16 = 40;

/// Below this the canvas is too coarse to draw a digit on.
pub const MIN_CANVAS_ROWS: u16 = 4;

/// Rows used by everything except the canvas interior:
/// title, canvas border (2), buttons, prediction panel (5), status line.
const CHROME_ROWS: u16 = 10;

const RESULT_HEIGHT: u16 = 5;
const RESULT_MIN_WIDTH: u16 = 24;

pub const CLEAR_LABEL: &str = "[ Clear ]";
pub const SUBMIT_LABEL: &str = "[ Submit ]";
const BUTTON_GAP: u16 = 3;

/// What lies under a terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Canvas,
    ClearButton,
    SubmitButton,
    Nothing,
}

/// Rectangles of every screen element for one terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub area: Rect,
    pub title: Rect,
    /// Canvas including its border.
    pub canvas_frame: Rect,
    /// Drawable interior; one cell shows two vertically stacked surface samples.
    pub canvas: Rect,
    pub clear_button: Rect,
    pub submit_button: Rect,
    pub result: Rect,
    pub status: Rect,
}

impl ScreenLayout {
    pub fn compute(width: u16, height: u16) -> Self {
        let area = Rect::new(0, 0, width, height);

        let rows = height
            .saturating_sub(CHROME_ROWS)
            .min(width.saturating_sub(2) / 2)
            .min(MAX_CANVAS_ROWS);
        let cols = rows * 2;

        let frame_width = cols + 2;
        let frame_height = rows + 2;
        let frame_x = width.saturating_sub(frame_width) / 2;
        let canvas_frame = Rect::new(frame_x, 1, frame_width, frame_height);
        let canvas = Rect::new(frame_x + 1, 2, cols, rows);

        let buttons_y = canvas_frame.bottom();
        let clear_width = CLEAR_LABEL.chars().count() as u16;
        let submit_width = SUBMIT_LABEL.chars().count() as u16;
        let buttons_x = width.saturating_sub(clear_width + BUTTON_GAP + submit_width) / 2;
        let clear_button = Rect::new(buttons_x, buttons_y, clear_width, 1);
        let submit_button = Rect::new(
            buttons_x + clear_width + BUTTON_GAP,
            buttons_y,
            submit_width,
            1,
        );

        let result_width = frame_width.max(RESULT_MIN_WIDTH).min(width);
        let result = Rect::new(
            width.saturating_sub(result_width) / 2,
            buttons_y + 1,
            result_width,
            RESULT_HEIGHT,
        );

        Self {
            area,
            title: Rect::new(0, 0, width, 1),
            canvas_frame,
            canvas,
            clear_button,
            submit_button,
            result,
            status: Rect::new(0, height.saturating_sub(1), width, 1),
        }
    }

    /// Whether every element fits on screen.
    pub fn is_usable(&self) -> bool {
        self.canvas.height >= MIN_CANVAS_ROWS && self.area.width >= RESULT_MIN_WIDTH
    }

    /// Canvas interior in cell units, for pointer coordinate scaling.
    pub fn canvas_rect(&self) -> CanvasRect {
        CanvasRect::new(
            f32::from(self.canvas.x),
            f32::from(self.canvas.y),
            f32::from(self.canvas.width),
            f32::from(self.canvas.height),
        )
    }

    pub fn hit(&self, column: u16, row: u16) -> HitTarget {
        let contains = |rect: Rect| {
            column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
        };

        if !self.is_usable() {
            HitTarget::Nothing
        } else if contains(self.canvas) {
            HitTarget::Canvas
        } else if contains(self.clear_button) {
            HitTarget::ClearButton
        } else if contains(self.submit_button) {
            HitTarget::SubmitButton
        } else {
            HitTarget::Nothing
        }
    }
}
