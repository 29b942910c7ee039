//! Protocol definitions shared between the render coordinator and its producers.

use crate::input::InputAction;
use crate::predict::{PendingSubmission, SubmissionOutcome};

/// Everything the render coordinator reacts to.
#[derive(Debug)]
pub enum LoopEvent {
    /// An action from the input thread.
    Input(InputAction),
    /// A submission task finished.
    Submission(SubmissionOutcome),
    /// Animation and toast-expiry timer.
    Tick,
}

/// What the coordinator should do after processing an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Continue,
    /// Send this request in the background and feed the outcome back.
    Submit(PendingSubmission),
    Quit,
}
