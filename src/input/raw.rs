//! Low-level input collection: crossterm polling, drag de-duplication, and translation into
//! primitive events that the higher-level input service can consume.

use crate::error::{DigitpadError, Result};
use ratatui::crossterm::event::{
    self, Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind,
};
use std::collections::VecDeque;
use std::time::Duration;

/// Poll timeout used when the caller does not provide one.
const DEFAULT_POLL_TIMEOUT_MS: u64 = 50;

/// Left-button mouse activity. Other buttons never draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseInputKind {
    Press,
    Drag,
    /// A drag reported while no press was seen (some terminals omit the press).
    DragStart,
    Release,
}

/// A left-button mouse event at a terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseInput {
    pub kind: MouseInputKind,
    pub column: u16,
    pub row: u16,
}

/// Low-level events surfaced by the raw input collector.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInputEvent {
    Key(KeyEvent),
    Resize { width: u16, height: u16 },
    Mouse(MouseInput),
}

/// Drops drag reports that repeat the previous drag cell.
///
/// Terminals report motion per cell, but some emit the same cell several times while the
/// pointer moves within it; each repeat would only redraw the same dot.
#[derive(Debug, Clone, Default)]
pub struct DragFilter {
    last_drag: Option<(u16, u16)>,
}

impl DragFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the event should be dropped.
    pub fn admit(&mut self, input: &MouseInput) -> bool {
        match input.kind {
            MouseInputKind::Drag | MouseInputKind::DragStart => {
                let cell = (input.column, input.row);
                if self.last_drag == Some(cell) {
                    return false;
                }
                self.last_drag = Some(cell);
                true
            }
            MouseInputKind::Press => {
                self.last_drag = Some((input.column, input.row));
                true
            }
            MouseInputKind::Release => {
                self.last_drag = None;
                true
            }
        }
    }
}

/// Collector that polls crossterm for events and filters mouse noise.
#[derive(Debug, Default)]
pub struct RawInputCollector {
    drag_filter: DragFilter,
    pending_events: VecDeque<RawInputEvent>,
}

impl RawInputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether the collector has no pending events.
    pub fn is_idle(&self) -> bool {
        self.pending_events.is_empty()
    }

    /// Process a synthetic event (primarily used by unit tests).
    pub fn process_event(&mut self, event: Event) {
        self.enqueue_event(event);
    }

    /// Retrieve the next raw input event, blocking up to `timeout`.
    pub fn poll_event(&mut self, timeout: Option<Duration>) -> Result<Option<RawInputEvent>> {
        if let Some(event) = self.pop_pending() {
            return Ok(Some(event));
        }

        let poll_timeout = timeout.unwrap_or(Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS));
        let ready = event::poll(poll_timeout)
            .map_err(|e| DigitpadError::ui(format!("failed to poll terminal input: {}", e)))?;
        if !ready {
            return Ok(None);
        }

        let event = event::read()
            .map_err(|e| DigitpadError::ui(format!("failed to read terminal input: {}", e)))?;
        self.enqueue_event(event);
        Ok(self.pop_pending())
    }

    fn enqueue_event(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => {
                self.pending_events.push_back(RawInputEvent::Key(key_event));
            }
            Event::Resize(width, height) => {
                self.pending_events
                    .push_back(RawInputEvent::Resize { width, height });
            }
            Event::Mouse(mouse_event) => {
                if let Some(input) = Self::translate_mouse(mouse_event) {
                    if self.drag_filter.admit(&input) {
                        self.pending_events.push_back(RawInputEvent::Mouse(input));
                    }
                }
            }
            _ => {}
        }
    }

    fn translate_mouse(mouse_event: MouseEvent) -> Option<MouseInput> {
        let kind = match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => MouseInputKind::Press,
            MouseEventKind::Drag(MouseButton::Left) => MouseInputKind::Drag,
            MouseEventKind::Up(MouseButton::Left) => MouseInputKind::Release,
            _ => return None,
        };
        Some(MouseInput {
            kind,
            column: mouse_event.column,
            row: mouse_event.row,
        })
    }

    /// Pop the next pending raw event.
    pub fn pop_pending(&mut self) -> Option<RawInputEvent> {
        self.pending_events.pop_front()
    }
}
