//! Rendering subsystem.
//!
//! [`service::RenderLoopState`] turns input actions and submission outcomes into surface and
//! view-state updates; [`ui`] draws the result.

pub mod protocol;
pub mod service;
pub mod ui;

pub use protocol::{LoopEvent, Step};
pub use service::RenderLoopState;
