//! # digitpad - Terminal Digit Sketchpad
//!
//! Draw a single digit with the mouse on a 280×280 raster and ask an HTTP prediction service
//! what it is.
//!
//! ## Features
//!
//! - **Fixed-resolution surface**: strokes are rasterized at 280×280 regardless of terminal size
//! - **Half-block canvas**: two surface samples per terminal cell
//! - **Non-blocking submission**: requests run on the tokio runtime while the UI keeps drawing
//! - **Configurable**: endpoint, timeout and theme from a TOML file or the command line
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`surface`] - Raster surface, stroke drawing and PNG export
//! - [`stroke`] - Pointer events to stroke calls
//! - [`predict`] - Endpoint client and submission lifecycle
//! - [`input`] - Terminal input collection
//! - [`render`] - Render coordination and the terminal UI
//! - [`app`] - Application core and component coordination

// Core modules
pub mod config;
pub mod error;

// Drawing
pub mod stroke;
pub mod surface;

// Subsystems
pub mod input;
pub mod predict;
pub mod render;

// Core components
pub mod app;

// Re-export commonly used types for convenience
pub use error::{DigitpadError, Result};

// Public API surface for external usage
pub use app::Application;
pub use config::Config;
pub use predict::{HttpEndpoint, PredictionEndpoint, PredictionState, SubmissionFlow};
pub use stroke::StrokeController;
pub use surface::Surface;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
