//! Half-block rendering of the drawing surface.
//!
//! Each terminal cell shows two surface samples stacked vertically: the upper one as the
//! foreground of `▀`, the lower one as the background.

use crate::render::ui::theme::ColorTheme;
use crate::surface::Surface;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

const UPPER_HALF_BLOCK: &str = "▀";

pub struct CanvasWidget<'a> {
    surface: &'a Surface,
    theme: &'a ColorTheme,
}

impl<'a> CanvasWidget<'a> {
    pub fn new(surface: &'a Surface, theme: &'a ColorTheme) -> Self {
        Self { surface, theme }
    }
}

impl Widget for CanvasWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        if area.width == 0 || area.height == 0 {
            return;
        }

        let width = usize::from(area.width);
        let samples = self.surface.sample(area.width, area.height.saturating_mul(2));
        for row in 0..area.height {
            let upper = usize::from(row) * 2 * width;
            let lower = upper + width;
            for col in 0..area.width {
                let col_index = usize::from(col);
                let style = Style::default()
                    .fg(self.theme.shade(samples[upper + col_index]))
                    .bg(self.theme.shade(samples[lower + col_index]));
                buf.set_string(area.x + col, area.y + row, UPPER_HALF_BLOCK, style);
            }
        }
    }
}
