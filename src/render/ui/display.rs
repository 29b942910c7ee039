//! Prediction panel content.
//!
//! [`ResultView::of`] is a pure function of the prediction state (plus the animation tick for
//! the spinner); [`ResultView::lines`] styles it.

use crate::predict::PredictionState;
use crate::render::ui::theme::ColorTheme;
use ratatui::text::{Line, Span};

const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub const PLACEHOLDER: &str = "—";
pub const ANALYZING: &str = "Analyzing...";

/// What the prediction panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultView<'a> {
    Placeholder,
    Analyzing { spinner: char },
    Error(&'a str),
    Prediction(&'a str),
}

impl<'a> ResultView<'a> {
    pub fn of(state: &'a PredictionState, tick: u64) -> Self {
        match state {
            PredictionState::Idle => ResultView::Placeholder,
            PredictionState::Loading => ResultView::Analyzing {
                spinner: SPINNER_FRAMES[(tick % SPINNER_FRAMES.len() as u64) as usize],
            },
            PredictionState::Error { message } => ResultView::Error(message),
            PredictionState::Success { label } => ResultView::Prediction(label),
        }
    }

    pub fn lines(&self, theme: &ColorTheme) -> Vec<Line<'a>> {
        match *self {
            ResultView::Placeholder => vec![Line::styled(PLACEHOLDER, theme.muted)],
            ResultView::Analyzing { spinner } => vec![Line::from(vec![
                Span::styled(format!("{} ", spinner), theme.prediction),
                Span::styled(ANALYZING, theme.muted),
            ])],
            ResultView::Error(message) => vec![Line::styled(message, theme.error_text)],
            ResultView::Prediction(label) => vec![Line::styled(label, theme.prediction)],
        }
    }
}
