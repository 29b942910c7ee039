use std::time::{Duration, Instant};

use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use digitpad::input::InputService;
use digitpad::predict::{PredictionState, SubmissionFlow};
use digitpad::render::ui::ViewState;
use digitpad::render::{RenderLoopState, Step};
use digitpad::surface::Surface;

const WIDTH: u16 = 100;
const HEIGHT: u16 = 40;

struct Pad {
    input: InputService,
    loop_state: RenderLoopState,
    view_state: ViewState,
    surface: Surface,
    flow: SubmissionFlow,
}

impl Pad {
    fn new() -> Self {
        let view_state = ViewState::new(WIDTH, HEIGHT, "test/predict");
        Self {
            input: InputService::new(),
            loop_state: RenderLoopState::new(&view_state, Duration::from_secs(2)),
            view_state,
            surface: Surface::new().expect("surface"),
            flow: SubmissionFlow::new(),
        }
    }

    /// Feed one terminal event through input handling and the render coordinator.
    fn feed(&mut self, event: Event) -> Vec<Step> {
        let now = Instant::now();
        self.input
            .process_event(event)
            .into_iter()
            .map(|action| {
                self.loop_state.process_action(
                    action,
                    &mut self.view_state,
                    &mut self.surface,
                    &mut self.flow,
                    now,
                )
            })
            .collect()
    }

    fn mouse(&mut self, kind: MouseEventKind, column: u16, row: u16) -> Vec<Step> {
        self.feed(Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }))
    }

    fn key(&mut self, code: KeyCode) -> Vec<Step> {
        self.feed(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    /// Press at a cell, drag one cell right, release.
    fn scribble(&mut self, column: u16, row: u16) {
        self.mouse(MouseEventKind::Down(MouseButton::Left), column, row);
        self.mouse(MouseEventKind::Drag(MouseButton::Left), column + 1, row);
        self.mouse(MouseEventKind::Up(MouseButton::Left), column + 1, row);
    }

    /// Surface pixel at the center of terminal cell `(column, row)`.
    fn ink_at_cell(&self, column: u16, row: u16) -> bool {
        let canvas = self.view_state.layout.canvas;
        let x = (f32::from(column - canvas.x) + 0.5) * 280.0 / f32::from(canvas.width);
        let y = (f32::from(row - canvas.y) + 0.5) * 280.0 / f32::from(canvas.height);
        self.surface.pixel(x as u32, y as u32) == Some([0, 0, 0])
    }
}

#[test]
fn mouse_gesture_draws_where_the_pointer_went() {
    let mut pad = Pad::new();
    let canvas = pad.view_state.layout.canvas;
    let row = canvas.y + canvas.height / 2;
    let start = canvas.x + 10;
    let end = canvas.x + 30;

    pad.mouse(MouseEventKind::Down(MouseButton::Left), start, row);
    for column in start + 1..=end {
        pad.mouse(MouseEventKind::Drag(MouseButton::Left), column, row);
    }
    pad.mouse(MouseEventKind::Up(MouseButton::Left), end, row);

    assert!(pad.ink_at_cell(start, row));
    assert!(pad.ink_at_cell(canvas.x + 20, row));
    assert!(pad.ink_at_cell(end, row));
    assert!(!pad.ink_at_cell(canvas.x + 20, canvas.y + 1));
    assert!(!pad.surface.has_open_stroke());
}

#[test]
fn right_button_does_not_draw() {
    let mut pad = Pad::new();
    let canvas = pad.view_state.layout.canvas;
    pad.mouse(MouseEventKind::Down(MouseButton::Right), canvas.x + 5, canvas.y + 5);
    pad.mouse(MouseEventKind::Drag(MouseButton::Right), canvas.x + 9, canvas.y + 5);
    pad.mouse(MouseEventKind::Up(MouseButton::Right), canvas.x + 9, canvas.y + 5);
    assert!(pad.surface.is_blank());
}

#[test]
fn enter_submits_and_c_is_refused_while_loading() {
    let mut pad = Pad::new();
    let canvas = pad.view_state.layout.canvas;
    pad.scribble(canvas.x + 5, canvas.y + 5);
    assert!(!pad.surface.is_blank());

    let steps = pad.key(KeyCode::Enter);
    assert!(matches!(steps.as_slice(), [Step::Submit(_)]));
    assert_eq!(pad.view_state.prediction, PredictionState::Loading);

    assert_eq!(pad.key(KeyCode::Char('c')), vec![Step::Continue]);
    assert!(!pad.surface.is_blank());
    assert_eq!(pad.key(KeyCode::Char('s')), vec![Step::Continue]);
}

#[test]
fn clear_key_wipes_the_drawing() {
    let mut pad = Pad::new();
    let canvas = pad.view_state.layout.canvas;
    pad.scribble(canvas.x + 5, canvas.y + 5);

    pad.key(KeyCode::Char('c'));
    assert!(pad.surface.is_blank());
    assert_eq!(pad.view_state.prediction, PredictionState::Idle);
    assert_eq!(
        pad.view_state.status_line.format_status_line(),
        "Canvas cleared"
    );
}

#[test]
fn resize_keeps_coordinates_in_surface_space() {
    let mut pad = Pad::new();
    pad.feed(Event::Resize(160, 60));
    let canvas = pad.view_state.layout.canvas;
    assert_eq!(canvas.height, 40);

    let center_col = canvas.x + canvas.width / 2;
    let center_row = canvas.y + canvas.height / 2;
    pad.scribble(center_col, center_row);

    // The dot lands near the middle of the 280x280 surface whatever the terminal size.
    assert_eq!(pad.surface.pixel(140, 140), Some([0, 0, 0]));
}

#[test]
fn click_without_movement_leaves_no_mark() {
    let mut pad = Pad::new();
    let canvas = pad.view_state.layout.canvas;
    pad.mouse(MouseEventKind::Down(MouseButton::Left), canvas.x + 5, canvas.y + 5);
    pad.mouse(MouseEventKind::Up(MouseButton::Left), canvas.x + 5, canvas.y + 5);
    assert!(pad.surface.is_blank());
}

#[test]
fn q_quits() {
    let mut pad = Pad::new();
    assert_eq!(pad.key(KeyCode::Char('q')), vec![Step::Quit]);
}

#[test]
fn drag_without_press_over_buttons_does_nothing() {
    let mut pad = Pad::new();
    let canvas = pad.view_state.layout.canvas;
    pad.scribble(canvas.x + 5, canvas.y + 5);

    let submit = pad.view_state.layout.submit_button;
    let steps = pad.mouse(MouseEventKind::Drag(MouseButton::Left), submit.x + 1, submit.y);
    assert_eq!(steps, vec![Step::Continue]);
    pad.mouse(MouseEventKind::Up(MouseButton::Left), submit.x + 1, submit.y);

    let clear = pad.view_state.layout.clear_button;
    pad.mouse(MouseEventKind::Drag(MouseButton::Left), clear.x + 1, clear.y);
    pad.mouse(MouseEventKind::Up(MouseButton::Left), clear.x + 1, clear.y);

    assert_eq!(pad.view_state.prediction, PredictionState::Idle);
    assert!(!pad.surface.is_blank());
}
