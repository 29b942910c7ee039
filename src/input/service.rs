//! High-level input service.
//!
//! Consumes raw events, runs the key binding state machine, and yields domain-level
//! `InputAction`s that the render coordinator consumes.

use crate::error::Result;
use crate::input::raw::{MouseInput, RawInputCollector, RawInputEvent};
use log::error;
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// High-level input actions emitted by the state machine/service.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    /// Left-button activity at a terminal cell; hit-testing happens in the render coordinator.
    Pointer(MouseInput),
    Submit,
    Clear,
    Quit,
    Resize {
        width: u16,
        height: u16,
    },
    NoAction,
    InvalidInput,
}

/// Maps key presses to actions.
///
/// Tracks whether the left button is held so a release that was never pressed inside the
/// terminal is not forwarded.
pub struct InputStateMachine {
    button_held: bool,
}

impl InputStateMachine {
    pub fn new() -> Self {
        Self { button_held: false }
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> InputAction {
        if key_event.kind != KeyEventKind::Press {
            return InputAction::NoAction;
        }

        let plain = !key_event
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

        match key_event.code {
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                InputAction::Quit
            }
            KeyCode::Char('q') | KeyCode::Esc if plain => InputAction::Quit,
            KeyCode::Char('c') | KeyCode::Char('C') | KeyCode::Delete if plain => {
                InputAction::Clear
            }
            KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char('S') if plain => {
                InputAction::Submit
            }
            _ => InputAction::InvalidInput,
        }
    }

    pub fn handle_mouse_input(&mut self, input: MouseInput) -> InputAction {
        use crate::input::raw::MouseInputKind;

        match input.kind {
            MouseInputKind::Press | MouseInputKind::DragStart => {
                self.button_held = true;
                InputAction::Pointer(input)
            }
            MouseInputKind::Drag => {
                // Some terminals report a drag before (or without) the press.
                if !self.button_held {
                    self.button_held = true;
                    return InputAction::Pointer(MouseInput {
                        kind: MouseInputKind::DragStart,
                        ..input
                    });
                }
                InputAction::Pointer(input)
            }
            MouseInputKind::Release if self.button_held => {
                self.button_held = false;
                InputAction::Pointer(input)
            }
            MouseInputKind::Release => InputAction::NoAction,
        }
    }

    pub fn is_button_held(&self) -> bool {
        self.button_held
    }
}

impl Default for InputStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Service responsible for producing high-level `InputAction`s from terminal events.
pub struct InputService {
    state_machine: InputStateMachine,
    raw_input: RawInputCollector,
}

impl InputService {
    pub fn new() -> Self {
        Self {
            state_machine: InputStateMachine::new(),
            raw_input: RawInputCollector::new(),
        }
    }

    pub fn poll_actions(&mut self, timeout: Option<Duration>) -> Result<Vec<InputAction>> {
        let mut actions = Vec::new();

        if let Some(raw_event) = self.raw_input.poll_event(timeout)? {
            if let Some(action) = self.process_raw_event(raw_event) {
                actions.push(action);
            }

            while let Some(extra_event) = self.raw_input.pop_pending() {
                if let Some(action) = self.process_raw_event(extra_event) {
                    actions.push(action);
                }
            }
        }

        Ok(actions)
    }

    pub fn process_event(&mut self, event: Event) -> Vec<InputAction> {
        let mut actions = Vec::new();
        self.raw_input.process_event(event);
        while let Some(raw_event) = self.raw_input.pop_pending() {
            if let Some(action) = self.process_raw_event(raw_event) {
                actions.push(action);
            }
        }
        actions
    }

    fn process_raw_event(&mut self, event: RawInputEvent) -> Option<InputAction> {
        let action = match event {
            RawInputEvent::Key(key_event) => self.state_machine.handle_key_event(key_event),
            RawInputEvent::Resize { width, height } => InputAction::Resize { width, height },
            RawInputEvent::Mouse(input) => self.state_machine.handle_mouse_input(input),
        };

        match action {
            InputAction::NoAction | InputAction::InvalidInput => None,
            _ => Some(action),
        }
    }
}

impl Default for InputService {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn a blocking thread that polls for terminal events and forwards actions to the render loop.
pub fn spawn_input_thread(
    tx: UnboundedSender<InputAction>,
    shutdown: Arc<AtomicBool>,
    poll_interval: Duration,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut service = InputService::new();
        while !shutdown.load(Ordering::SeqCst) {
            match service.poll_actions(Some(poll_interval)) {
                Ok(actions) => {
                    for action in actions {
                        if tx.send(action).is_err() {
                            return;
                        }
                    }
                }
                Err(err) => {
                    error!("input thread error: {}", err);
                    break;
                }
            }
        }
    })
}
