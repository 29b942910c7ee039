//! Color theme and styling definitions using ratatui colors
//!
//! Themes also decide how surface luminance is turned into terminal colors, since not every
//! terminal can show 24-bit gray levels.

use crate::config::ThemeName;
use ratatui::style::{Color, Modifier, Style};

/// How sampled surface luminance is mapped to a cell color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InkMode {
    /// 24-bit gray scale, preserves anti-aliasing.
    Grayscale,
    /// Two colors split at 50% luminance.
    Threshold { ink: Color, paper: Color },
}

/// Color theme for terminal UI elements
#[derive(Debug, Clone)]
pub struct ColorTheme {
    /// Title line
    pub title: Style,

    /// Border around the canvas and the prediction panel
    pub border: Style,

    /// Canvas rendering
    pub ink_mode: InkMode,

    /// Enabled button label
    pub button: Style,

    /// Button label while a request is in flight
    pub button_disabled: Style,

    /// Predicted label
    pub prediction: Style,

    /// Placeholder and "Analyzing..." text
    pub muted: Style,

    /// Error text in the prediction panel
    pub error_text: Style,

    /// Status line background
    pub status_bg: Color,

    /// Status line text
    pub status_fg: Color,

    /// Success toast
    pub toast_success: Style,

    /// Error toast
    pub toast_error: Style,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            title: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::DarkGray),
            ink_mode: InkMode::Grayscale,
            button: Style::default().fg(Color::Black).bg(Color::Cyan),
            button_disabled: Style::default().fg(Color::DarkGray).bg(Color::Black),
            prediction: Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
            muted: Style::default().fg(Color::DarkGray),
            error_text: Style::default().fg(Color::Red),
            status_bg: Color::Blue,
            status_fg: Color::White,
            toast_success: Style::default().fg(Color::Black).bg(Color::Green),
            toast_error: Style::default().fg(Color::White).bg(Color::Red),
        }
    }
}

impl ColorTheme {
    /// Create a monochrome theme for terminals without color support
    pub fn monochrome() -> Self {
        let reversed = Style::default().add_modifier(Modifier::REVERSED);
        Self {
            title: Style::default().add_modifier(Modifier::BOLD),
            border: Style::default(),
            ink_mode: InkMode::Threshold {
                ink: Color::Black,
                paper: Color::White,
            },
            button: reversed,
            button_disabled: Style::default().add_modifier(Modifier::DIM),
            prediction: Style::default().add_modifier(Modifier::BOLD),
            muted: Style::default().add_modifier(Modifier::DIM),
            error_text: Style::default().add_modifier(Modifier::BOLD),
            status_bg: Color::Black,
            status_fg: Color::White,
            toast_success: reversed,
            toast_error: reversed.add_modifier(Modifier::BOLD),
        }
    }

    /// Create a high-contrast theme for accessibility
    pub fn high_contrast() -> Self {
        Self {
            title: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::White),
            ink_mode: InkMode::Threshold {
                ink: Color::Black,
                paper: Color::White,
            },
            button: Style::default().fg(Color::Black).bg(Color::LightYellow),
            button_disabled: Style::default().fg(Color::Gray).bg(Color::Black),
            prediction: Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
            muted: Style::default().fg(Color::Gray),
            error_text: Style::default().fg(Color::LightRed),
            status_bg: Color::White,
            status_fg: Color::Black,
            toast_success: Style::default().fg(Color::Black).bg(Color::LightGreen),
            toast_error: Style::default().fg(Color::White).bg(Color::LightRed),
        }
    }

    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Default => Self::default(),
            ThemeName::Monochrome => Self::monochrome(),
            ThemeName::HighContrast => Self::high_contrast(),
        }
    }

    /// Terminal color for a sampled surface luminance.
    pub fn shade(&self, luminance: u8) -> Color {
        match self.ink_mode {
            InkMode::Grayscale => Color::Rgb(luminance, luminance, luminance),
            InkMode::Threshold { ink, paper } => {
                if luminance < 128 {
                    ink
                } else {
                    paper
                }
            }
        }
    }

    pub fn status_style(&self) -> Style {
        Style::default().bg(self.status_bg).fg(self.status_fg)
    }
}
