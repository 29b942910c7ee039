//! Terminal UI implementation using ratatui
//!
//! This module provides the concrete implementation of UIRenderer using ratatui for a
//! cross-platform terminal interface. Drawing is done by [`draw_screen`], which only reads the
//! view state and the surface, so it can be exercised against a `TestBackend`.

use crate::error::{DigitpadError, Result};
use crate::predict::NoticeKind;
use crate::render::ui::canvas::CanvasWidget;
use crate::render::ui::display::ResultView;
use crate::render::ui::layout::{CLEAR_LABEL, SUBMIT_LABEL};
use crate::render::ui::{ColorTheme, UIRenderer, ViewState};
use crate::surface::Surface;
use ratatui::crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io::{self, Stdout};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

const TITLE: &str = "Digit Sketchpad";
const CANVAS_TITLE: &str = " Draw a digit (0-9) ";
const RESULT_TITLE: &str = " Prediction ";
const TOO_SMALL: &str = "Terminal too small";

/// Terminal UI implementation with ratatui backend
///
/// This implementation focuses purely on rendering; input is collected by the input service
/// on its own thread.
pub struct TerminalUI {
    terminal: Option<CrosstermTerminal>,
    theme: ColorTheme,
}

impl TerminalUI {
    /// Create a new terminal UI instance with the default theme
    pub fn new() -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme: ColorTheme::default(),
        })
    }

    /// Create terminal UI with custom theme
    pub fn with_theme(theme: ColorTheme) -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme,
        })
    }
}

/// Wrap a terminal I/O failure so it reports what the UI was doing.
fn ui_error(action: &'static str) -> impl Fn(io::Error) -> DigitpadError {
    move |e| DigitpadError::ui(format!("failed to {}: {}", action, e))
}

/// Draw one complete frame.
pub fn draw_screen(
    frame: &mut Frame,
    view_state: &ViewState,
    surface: &Surface,
    theme: &ColorTheme,
) {
    let size = frame.size();
    let layout = &view_state.layout;
    let fit = |rect: Rect| rect.intersection(size);

    if !layout.is_usable() {
        let message = Paragraph::new(TOO_SMALL)
            .alignment(Alignment::Center)
            .style(theme.error_text);
        let row = Rect::new(0, size.height / 2, size.width, size.height.min(1));
        frame.render_widget(message, fit(row));
        return;
    }

    let title = Paragraph::new(TITLE)
        .alignment(Alignment::Center)
        .style(theme.title);
    frame.render_widget(title, fit(layout.title));

    let canvas_block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(CANVAS_TITLE);
    frame.render_widget(canvas_block, fit(layout.canvas_frame));
    frame.render_widget(CanvasWidget::new(surface, theme), fit(layout.canvas));

    let button_style = if view_state.busy {
        theme.button_disabled
    } else {
        theme.button
    };
    frame.render_widget(
        Paragraph::new(CLEAR_LABEL).style(button_style),
        fit(layout.clear_button),
    );
    frame.render_widget(
        Paragraph::new(SUBMIT_LABEL).style(button_style),
        fit(layout.submit_button),
    );

    let result_block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(RESULT_TITLE);
    let result_inner = result_block.inner(fit(layout.result));
    frame.render_widget(result_block, fit(layout.result));
    let lines = ResultView::of(&view_state.prediction, view_state.tick).lines(theme);
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        // Vertically center the single line inside the panel.
        Rect::new(
            result_inner.x,
            result_inner.y + result_inner.height / 2,
            result_inner.width,
            result_inner.height.min(1),
        ),
    );

    let status_style = match &view_state.status_line.toast {
        Some(toast) if toast.kind == NoticeKind::Success => theme.toast_success,
        Some(_) => theme.toast_error,
        None => theme.status_style(),
    };
    let status = Paragraph::new(view_state.status_line.format_status_line()).style(status_style);
    frame.render_widget(status, fit(layout.status));
}

impl UIRenderer for TerminalUI {
    fn render(&mut self, view_state: &ViewState, surface: &Surface) -> Result<()> {
        if let Some(ref mut terminal) = self.terminal {
            // Extract theme before closure to avoid borrowing issues
            let theme = &self.theme;

            terminal
                .draw(move |frame| draw_screen(frame, view_state, surface, theme))
                .map_err(ui_error("draw frame"))?;
        }
        Ok(())
    }

    fn initialize(&mut self) -> Result<()> {
        enable_raw_mode().map_err(ui_error("enable raw mode"))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .map_err(ui_error("enter alternate screen"))?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(ui_error("set up terminal"))?;
        terminal.hide_cursor().map_err(ui_error("hide cursor"))?;
        self.terminal = Some(terminal);

        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if let Some(mut terminal) = self.terminal.take() {
            disable_raw_mode().map_err(ui_error("disable raw mode"))?;
            execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)
                .map_err(ui_error("leave alternate screen"))?;
            terminal.show_cursor().map_err(ui_error("show cursor"))?;
        }
        Ok(())
    }

    fn get_terminal_size(&self) -> Result<(u16, u16)> {
        let (cols, rows) =
            ratatui::crossterm::terminal::size().map_err(ui_error("query terminal size"))?;
        Ok((cols, rows))
    }
}

impl Drop for TerminalUI {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predict::{Notice, PredictionState};
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::style::Color;
    use std::time::{Duration, Instant};

    fn draw(view_state: &ViewState, surface: &Surface, theme: &ColorTheme) -> Buffer {
        let (width, height) = (view_state.layout.area.width, view_state.layout.area.height);
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| draw_screen(frame, view_state, surface, theme))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.get(x, y).symbol())
            .collect()
    }

    fn screen_text(buf: &Buffer) -> String {
        (0..buf.area.height)
            .map(|y| row_text(buf, y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_terminal_ui_creation() {
        let ui = TerminalUI::new().unwrap();
        assert!(ui.terminal.is_none());
        assert_eq!(ui.theme.status_bg, Color::Blue);

        let ui_with_theme = TerminalUI::with_theme(ColorTheme::monochrome()).unwrap();
        assert_eq!(ui_with_theme.theme.status_bg, Color::Black);
    }

    #[test]
    fn test_terminal_failures_are_ui_errors() {
        let err = ui_error("enable raw mode")(io::Error::new(
            io::ErrorKind::Other,
            "not a terminal",
        ));
        assert!(matches!(err, DigitpadError::UIError { .. }));
        assert_eq!(
            err.to_string(),
            "UI operation failed: failed to enable raw mode: not a terminal"
        );
    }

    #[test]
    fn test_idle_screen() {
        let view_state = ViewState::new(100, 40, "127.0.0.1:5000/predict");
        let surface = Surface::new().unwrap();
        let buf = draw(&view_state, &surface, &ColorTheme::default());
        let text = screen_text(&buf);

        assert!(row_text(&buf, 0).contains(TITLE));
        assert!(text.contains(CLEAR_LABEL));
        assert!(text.contains(SUBMIT_LABEL));
        assert!(text.contains("Prediction"));
        assert!(text.contains("—"));
        assert!(row_text(&buf, 39).starts_with("API: 127.0.0.1:5000/predict"));

        let canvas = view_state.layout.canvas;
        assert_eq!(buf.get(canvas.x, canvas.y).symbol(), "▀");
    }

    #[test]
    fn test_loading_disables_buttons() {
        let theme = ColorTheme::default();
        let mut view_state = ViewState::new(100, 40, "x");
        view_state.prediction = PredictionState::Loading;
        view_state.busy = true;
        let surface = Surface::new().unwrap();
        let buf = draw(&view_state, &surface, &theme);

        assert!(screen_text(&buf).contains("Analyzing..."));
        let clear = view_state.layout.clear_button;
        assert_eq!(buf.get(clear.x, clear.y).fg, theme.button_disabled.fg.unwrap());
        assert_eq!(buf.get(clear.x, clear.y).bg, theme.button_disabled.bg.unwrap());
    }

    #[test]
    fn test_prediction_and_error_are_shown() {
        let theme = ColorTheme::default();
        let surface = Surface::new().unwrap();

        let mut view_state = ViewState::new(100, 40, "x");
        view_state.prediction = PredictionState::Success {
            label: "7".to_string(),
        };
        let buf = draw(&view_state, &surface, &theme);
        let result = view_state.layout.result;
        let middle = row_text(&buf, result.y + result.height / 2);
        assert_eq!(middle.trim().trim_matches('│').trim(), "7");

        view_state.prediction = PredictionState::Error {
            message: "Server error: 500".to_string(),
        };
        let buf = draw(&view_state, &surface, &theme);
        assert!(screen_text(&buf).contains("Server error: 500"));
    }

    #[test]
    fn test_toast_replaces_status_text() {
        let theme = ColorTheme::default();
        let surface = Surface::new().unwrap();
        let mut view_state = ViewState::new(100, 40, "x");
        view_state.status_line.show(
            Notice::error("Server error: 500"),
            Instant::now(),
            Duration::from_secs(2),
        );

        let buf = draw(&view_state, &surface, &theme);
        assert!(row_text(&buf, 39).starts_with("Server error: 500"));
        assert_eq!(buf.get(0, 39).bg, theme.toast_error.bg.unwrap());
    }

    #[test]
    fn test_too_small_terminal() {
        let view_state = ViewState::new(30, 10, "x");
        let surface = Surface::new().unwrap();
        let buf = draw(&view_state, &surface, &ColorTheme::default());
        assert!(screen_text(&buf).contains(TOO_SMALL));
        assert!(!screen_text(&buf).contains(CLEAR_LABEL));
    }
}
