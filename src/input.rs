//! Input subsystem.
//!
//! `raw` talks to crossterm; `service` turns raw events into `InputAction`s.

pub mod raw;
pub mod service;

// Public re-exports for convenience. Modules outside this crate should prefer importing
// from `crate::input` rather than reaching into submodules.
pub use raw::{MouseInput, MouseInputKind};
pub use service::{spawn_input_thread, InputAction, InputService, InputStateMachine};
