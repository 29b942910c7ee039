//! UI renderer trait and event handling
//!
//! This module defines the `UIRenderer` trait for drawing the sketchpad and managing terminal
//! lifecycle hooks such as initialization and cleanup.

use crate::error::Result;
use crate::render::ui::state::ViewState;
use crate::surface::Surface;

/// Core trait for UI rendering
pub trait UIRenderer {
    /// Render the current view state and surface to the terminal
    ///
    /// This method should:
    /// - Redraw the canvas from the surface pixels
    /// - Show the buttons, disabled while a request is in flight
    /// - Update the prediction panel and status line
    fn render(&mut self, view_state: &ViewState, surface: &Surface) -> Result<()>;

    /// Initialize the terminal UI
    ///
    /// This method should:
    /// - Set up raw mode
    /// - Enable mouse capture
    /// - Switch to the alternate screen
    fn initialize(&mut self) -> Result<()>;

    /// Clean up and restore terminal state
    fn cleanup(&mut self) -> Result<()>;

    /// Get current terminal dimensions
    fn get_terminal_size(&self) -> Result<(u16, u16)>; // (width, height)
}
