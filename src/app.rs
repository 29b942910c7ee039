//! Application orchestration layer
//!
//! Wires the input thread, the render coordinator, background submissions and the renderer
//! together. The surface and the submission flow are owned by the loop; nothing else mutates
//! them.

mod runtime;

use crate::config::Config;
use crate::error::Result;
use crate::input::{spawn_input_thread, InputAction};
use crate::predict::{PredictionEndpoint, SubmissionFlow};
use crate::render::ui::{UIRenderer, ViewState};
use crate::render::{LoopEvent, RenderLoopState, Step};
use crate::surface::Surface;
use log::{info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time::MissedTickBehavior;

pub use runtime::spawn_submission;

/// How long the input thread blocks in one poll before re-checking for shutdown.
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Spinner frame rate and toast-expiry granularity.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Application orchestrator
pub struct Application {
    config: Config,
    endpoint: Arc<dyn PredictionEndpoint>,
    ui_renderer: Box<dyn UIRenderer>,
}

impl Application {
    pub fn new(
        config: Config,
        endpoint: Arc<dyn PredictionEndpoint>,
        ui_renderer: Box<dyn UIRenderer>,
    ) -> Self {
        Self {
            config,
            endpoint,
            ui_renderer,
        }
    }

    /// Take over the terminal and run until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        self.ui_renderer.initialize()?;

        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let shutdown = Arc::new(AtomicBool::new(false));
        let input_thread =
            spawn_input_thread(input_tx, Arc::clone(&shutdown), INPUT_POLL_INTERVAL);

        let result = self.run_with_input(input_rx).await;

        shutdown.store(true, Ordering::SeqCst);
        if input_thread.join().is_err() {
            warn!("input thread panicked");
        }
        self.ui_renderer.cleanup()?;
        result
    }

    /// Event loop over an arbitrary action source.
    ///
    /// Returns when a `Quit` action arrives or the action channel closes.
    pub async fn run_with_input(
        &mut self,
        mut input_rx: UnboundedReceiver<InputAction>,
    ) -> Result<()> {
        let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel();
        let mut ticker = tokio::time::interval(TICK_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let (width, height) = self.ui_renderer.get_terminal_size()?;
        let mut view_state = ViewState::new(width, height, self.endpoint.describe());
        let mut surface = Surface::new()?;
        let mut flow = SubmissionFlow::new();
        let mut loop_state = RenderLoopState::new(&view_state, self.config.toast_duration);

        info!("sketchpad ready, predictions go to {}", self.endpoint.describe());
        self.ui_renderer.render(&view_state, &surface)?;

        loop {
            let event = tokio::select! {
                action = input_rx.recv() => match action {
                    Some(action) => LoopEvent::Input(action),
                    None => {
                        warn!("input channel closed");
                        break;
                    }
                },
                Some(outcome) = outcome_rx.recv() => LoopEvent::Submission(outcome),
                _ = ticker.tick() => LoopEvent::Tick,
            };

            let now = Instant::now();
            let redraw = match event {
                LoopEvent::Input(action) => {
                    match loop_state.process_action(
                        action,
                        &mut view_state,
                        &mut surface,
                        &mut flow,
                        now,
                    ) {
                        Step::Continue => true,
                        Step::Submit(pending) => {
                            spawn_submission(
                                Arc::clone(&self.endpoint),
                                pending,
                                outcome_tx.clone(),
                            );
                            true
                        }
                        Step::Quit => break,
                    }
                }
                LoopEvent::Submission(outcome) => {
                    loop_state.handle_outcome(outcome, &mut view_state, &mut flow, now)
                }
                LoopEvent::Tick => loop_state.tick(&mut view_state, now),
            };

            if redraw {
                self.ui_renderer.render(&view_state, &surface)?;
            }
        }

        Ok(())
    }
}
