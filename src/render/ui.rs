//! Terminal rendering components.
//!
//! This module hosts the concrete terminal UI implementation along with the supporting view/state
//! structures, layout, and styling utilities.

pub mod canvas;
pub mod display;
pub mod layout;
pub mod renderer;
pub mod state;
pub mod terminal;
pub mod theme;

pub use canvas::CanvasWidget;
pub use display::ResultView;
pub use layout::{HitTarget, ScreenLayout};
pub use renderer::UIRenderer;
pub use state::{StatusLine, Toast, ViewState};
pub use terminal::{draw_screen, TerminalUI};
pub use theme::{ColorTheme, InkMode};

#[cfg(test)]
pub use renderer::tests::MockUIRenderer;
