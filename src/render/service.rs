//! Render coordination helpers.
//!
//! Provides the state machine that mediates between input actions, the stroke controller, the
//! submission flow, and view updates. The async loop that feeds it lives in `Application::run`.

use crate::input::{InputAction, MouseInput, MouseInputKind};
use crate::predict::{SubmissionFlow, SubmissionOutcome};
use crate::render::protocol::Step;
use crate::render::ui::{HitTarget, ViewState};
use crate::stroke::{PointerEvent, PointerKind, ScreenPoint, StrokeController};
use crate::surface::Surface;
use log::debug;
use std::time::{Duration, Instant};

/// Tracks render-related state that must persist across input actions and submission outcomes.
#[derive(Debug)]
pub struct RenderLoopState {
    controller: StrokeController,
    toast_duration: Duration,
}

impl RenderLoopState {
    pub fn new(view_state: &ViewState, toast_duration: Duration) -> Self {
        Self {
            controller: StrokeController::new(view_state.layout.canvas_rect()),
            toast_duration,
        }
    }

    pub fn controller(&self) -> &StrokeController {
        &self.controller
    }

    pub fn process_action(
        &mut self,
        action: InputAction,
        view_state: &mut ViewState,
        surface: &mut Surface,
        flow: &mut SubmissionFlow,
        now: Instant,
    ) -> Step {
        let step = match action {
            InputAction::Quit => Step::Quit,
            InputAction::Pointer(input) => self.pointer(input, view_state, surface, flow),
            InputAction::Submit => self.submit(surface, flow),
            InputAction::Clear => {
                self.clear(surface, flow);
                Step::Continue
            }
            InputAction::Resize { width, height } => {
                if view_state.update_terminal_size(width, height) {
                    // Cell coordinates of an open stroke no longer line up with the canvas.
                    if self.controller.is_drawing() {
                        self.controller.handle(
                            PointerEvent::new(PointerKind::Leave, ScreenPoint::new(0.0, 0.0)),
                            surface,
                        );
                    }
                    self.controller
                        .set_viewport(view_state.layout.canvas_rect());
                }
                Step::Continue
            }
            InputAction::NoAction | InputAction::InvalidInput => Step::Continue,
        };

        self.sync(view_state, flow, now);
        step
    }

    /// Apply a finished submission. Returns false for outcomes of abandoned requests.
    pub fn handle_outcome(
        &mut self,
        outcome: SubmissionOutcome,
        view_state: &mut ViewState,
        flow: &mut SubmissionFlow,
        now: Instant,
    ) -> bool {
        let applied = flow.complete(outcome);
        self.sync(view_state, flow, now);
        applied
    }

    /// Advance the spinner and expire toasts. Returns true when a redraw is needed.
    pub fn tick(&mut self, view_state: &mut ViewState, now: Instant) -> bool {
        let expired = view_state.status_line.expire(now);
        if view_state.busy {
            view_state.advance_tick();
            return true;
        }
        expired
    }

    fn pointer(
        &mut self,
        input: MouseInput,
        view_state: &ViewState,
        surface: &mut Surface,
        flow: &mut SubmissionFlow,
    ) -> Step {
        let target = view_state.layout.hit(input.column, input.row);
        let position = ScreenPoint::cell_center(input.column, input.row);

        let kind = match (input.kind, target) {
            (MouseInputKind::Press, HitTarget::Canvas) => PointerKind::Down,
            (MouseInputKind::Press, HitTarget::ClearButton) => {
                self.clear(surface, flow);
                return Step::Continue;
            }
            (MouseInputKind::Press, HitTarget::SubmitButton) => return self.submit(surface, flow),
            (MouseInputKind::Press, HitTarget::Nothing) => return Step::Continue,
            (MouseInputKind::DragStart, HitTarget::Canvas) => PointerKind::Down,
            // Without a press there was no click, so buttons stay untouched.
            (MouseInputKind::DragStart, _) => return Step::Continue,
            (MouseInputKind::Drag, HitTarget::Canvas) => PointerKind::Move,
            (MouseInputKind::Drag, _) => PointerKind::Leave,
            (MouseInputKind::Release, _) => PointerKind::Up,
        };

        self.controller
            .handle(PointerEvent::new(kind, position), surface);
        Step::Continue
    }

    fn submit(&mut self, surface: &Surface, flow: &mut SubmissionFlow) -> Step {
        if flow.is_busy() {
            debug!("submit ignored while a request is in flight");
            return Step::Continue;
        }
        match flow.begin(surface) {
            Some(pending) => Step::Submit(pending),
            None => Step::Continue,
        }
    }

    fn clear(&mut self, surface: &mut Surface, flow: &mut SubmissionFlow) {
        if flow.is_busy() {
            debug!("clear ignored while a request is in flight");
            return;
        }
        flow.clear(surface);
        self.controller.reset();
    }

    fn sync(&self, view_state: &mut ViewState, flow: &mut SubmissionFlow, now: Instant) {
        view_state.prediction = flow.state().clone();
        view_state.busy = flow.is_busy();
        for notice in flow.drain_notices() {
            view_state
                .status_line
                .show(notice, now, self.toast_duration);
        }
    }
}
