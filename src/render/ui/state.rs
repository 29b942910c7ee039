//! UI state management structures
//!
//! The view state is a snapshot of everything the renderer needs besides the surface pixels.
//! It is owned by the render loop and updated from the submission flow after every action.

use crate::predict::{Notice, NoticeKind, PredictionState};
use crate::render::ui::layout::ScreenLayout;
use std::time::{Duration, Instant};

/// Viewport state for rendering
#[derive(Debug)]
pub struct ViewState {
    /// Layout for the current terminal size
    pub layout: ScreenLayout,

    /// Copy of the submission flow's state
    pub prediction: PredictionState,

    /// True while a request is in flight; buttons render disabled
    pub busy: bool,

    /// Animation counter for the loading spinner
    pub tick: u64,

    /// Status line content
    pub status_line: StatusLine,
}

impl ViewState {
    pub fn new(width: u16, height: u16, endpoint: impl Into<String>) -> Self {
        Self {
            layout: ScreenLayout::compute(width, height),
            prediction: PredictionState::Idle,
            busy: false,
            tick: 0,
            status_line: StatusLine::new(endpoint),
        }
    }

    /// Update terminal dimensions. Returns true if dimensions actually changed.
    pub fn update_terminal_size(&mut self, width: u16, height: u16) -> bool {
        let changed = self.layout.area.width != width || self.layout.area.height != height;
        if changed {
            self.layout = ScreenLayout::compute(width, height);
        }
        changed
    }

    pub fn advance_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }
}

/// A notification shown on the status line until `expires_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: NoticeKind,
    pub message: String,
    pub expires_at: Instant,
}

/// Status line information
#[derive(Debug, Clone)]
pub struct StatusLine {
    pub toast: Option<Toast>,
    /// Endpoint description shown when no toast is active
    pub endpoint: String,
}

impl StatusLine {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            toast: None,
            endpoint: endpoint.into(),
        }
    }

    /// Show `notice` for `duration`, replacing any current toast.
    pub fn show(&mut self, notice: Notice, now: Instant, duration: Duration) {
        self.toast = Some(Toast {
            kind: notice.kind,
            message: notice.message,
            expires_at: now + duration,
        });
    }

    /// Drop the toast once its time is up. Returns true when one was removed.
    pub fn expire(&mut self, now: Instant) -> bool {
        match &self.toast {
            Some(toast) if now >= toast.expires_at => {
                self.toast = None;
                true
            }
            _ => false,
        }
    }

    /// Text for the status line
    pub fn format_status_line(&self) -> String {
        match &self.toast {
            Some(toast) => toast.message.clone(),
            None => format!(
                "API: {} | draw with the mouse · c clear · Enter submit · q quit",
                self.endpoint
            ),
        }
    }
}
