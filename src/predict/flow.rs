//! Submission lifecycle.
//!
//! The flow is split into three steps so the event loop never blocks on the network:
//! [`SubmissionFlow::begin`] checks the in-flight guard and encodes the surface,
//! [`run_submission`] performs the request (usually on a spawned task), and
//! [`SubmissionFlow::complete`] applies the outcome. [`SubmissionFlow::submit`] runs all three
//! inline.

use crate::error::{DigitpadError, Result};
use crate::predict::client::PredictionEndpoint;
use crate::predict::protocol::{extract_label, PredictRequest, RequestId};
use crate::surface::Surface;
use log::{debug, info, warn};

const PREDICTION_RECEIVED: &str = "Prediction received!";
const CANVAS_CLEARED: &str = "Canvas cleared";

/// Outcome of the last submission as shown to the user. Exactly one variant is active.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PredictionState {
    #[default]
    Idle,
    Loading,
    Success {
        label: String,
    },
    Error {
        message: String,
    },
}

impl PredictionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, PredictionState::Loading)
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            PredictionState::Success { label } => Some(label),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PredictionState::Error { message } => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient notification raised by the flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// A request that has been admitted and is ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub request_id: RequestId,
    pub request: PredictRequest,
}

/// Result of running a [`PendingSubmission`] against an endpoint.
#[derive(Debug)]
pub struct SubmissionOutcome {
    pub request_id: RequestId,
    pub result: Result<String>,
}

/// Send one submission and interpret the reply.
///
/// A non-2xx reply becomes [`DigitpadError::ServerStatus`]; a 2xx reply always yields a label.
pub async fn run_submission(
    endpoint: &dyn PredictionEndpoint,
    pending: PendingSubmission,
) -> SubmissionOutcome {
    let result = match endpoint.post(&pending.request).await {
        Ok(reply) if reply.is_success() => Ok(extract_label(&reply.body)),
        Ok(reply) => Err(DigitpadError::ServerStatus {
            status: reply.status,
        }),
        Err(err) => Err(err),
    };
    SubmissionOutcome {
        request_id: pending.request_id,
        result,
    }
}

/// Owns the [`PredictionState`] and the single in-flight request.
#[derive(Debug, Default)]
pub struct SubmissionFlow {
    state: PredictionState,
    next_request_id: RequestId,
    in_flight: Option<RequestId>,
    notices: Vec<Notice>,
}

impl SubmissionFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PredictionState {
        &self.state
    }

    /// True while a request is in flight; new submissions are refused.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Notifications raised since the last call.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Admit a new submission: enter Loading and encode the surface.
    ///
    /// Returns `None` when a submission is already in flight, or when encoding failed (the
    /// flow is then in the Error state with a notice queued).
    pub fn begin(&mut self, surface: &Surface) -> Option<PendingSubmission> {
        if self.is_busy() {
            debug!("submission ignored: request already in flight");
            return None;
        }

        self.state = PredictionState::Loading;
        let image = match surface.export_data_url() {
            Ok(image) => image,
            Err(err) => {
                self.fail(err);
                return None;
            }
        };

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.in_flight = Some(request_id);
        info!("submitting drawing (request {})", request_id);

        Some(PendingSubmission {
            request_id,
            request: PredictRequest { image },
        })
    }

    /// Apply an outcome. Returns false when it does not belong to the in-flight request.
    pub fn complete(&mut self, outcome: SubmissionOutcome) -> bool {
        if self.in_flight != Some(outcome.request_id) {
            debug!(
                "dropping stale outcome for request {}",
                outcome.request_id
            );
            return false;
        }
        self.in_flight = None;

        match outcome.result {
            Ok(label) => {
                info!("prediction received: {}", label);
                self.state = PredictionState::Success { label };
                self.notices.push(Notice::success(PREDICTION_RECEIVED));
            }
            Err(err) => self.fail(err),
        }
        true
    }

    /// Begin, send and complete in one call.
    pub async fn submit(
        &mut self,
        surface: &Surface,
        endpoint: &dyn PredictionEndpoint,
    ) -> &PredictionState {
        if let Some(pending) = self.begin(surface) {
            let outcome = run_submission(endpoint, pending).await;
            self.complete(outcome);
        }
        &self.state
    }

    /// Wipe the surface and return to Idle from any state.
    ///
    /// A request still in flight is abandoned: its outcome will be ignored when it arrives.
    /// The UI keeps the Clear affordance disabled while busy, so this only happens when a caller
    /// bypasses it.
    pub fn clear(&mut self, surface: &mut Surface) {
        if let Some(request_id) = self.in_flight.take() {
            debug!("clear abandons request {}", request_id);
        }
        surface.clear();
        self.state = PredictionState::Idle;
        self.notices.push(Notice::success(CANVAS_CLEARED));
    }

    fn fail(&mut self, err: DigitpadError) {
        let message = err.to_string();
        warn!("submission failed: {}", message);
        self.state = PredictionState::Error {
            message: message.clone(),
        };
        self.notices.push(Notice::error(message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predict::protocol::EndpointReply;
    use crate::surface::{Point, StrokeTarget};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Endpoint that replays a fixed reply and counts calls.
    struct CannedEndpoint {
        reply: std::result::Result<(u16, &'static str), &'static str>,
        calls: AtomicUsize,
    }

    impl CannedEndpoint {
        fn ok(status: u16, body: &'static str) -> Self {
            Self {
                reply: Ok((status, body)),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(message: &'static str) -> Self {
            Self {
                reply: Err(message),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl PredictionEndpoint for CannedEndpoint {
        async fn post(&self, request: &PredictRequest) -> Result<EndpointReply> {
            assert!(request.image.starts_with("data:image/png;base64,"));
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.reply {
                Ok((status, body)) => Ok(EndpointReply::new(status, body)),
                Err(message) => Err(DigitpadError::transport(message)),
            }
        }

        fn describe(&self) -> String {
            "canned".to_string()
        }
    }

    fn sketch() -> Surface {
        let mut surface = Surface::new().unwrap();
        surface.begin_stroke(Point::new(140.0, 40.0));
        surface.extend_stroke(Point::new(140.0, 240.0));
        surface.end_stroke();
        surface
    }

    #[tokio::test]
    async fn prediction_field_becomes_label() {
        let endpoint = CannedEndpoint::ok(200, r#"{"prediction": 7}"#);
        let mut flow = SubmissionFlow::new();
        let state = flow.submit(&sketch(), &endpoint).await.clone();

        assert_eq!(
            state,
            PredictionState::Success {
                label: "7".to_string()
            }
        );
        assert!(!flow.is_busy());
        assert_eq!(flow.drain_notices(), vec![Notice::success("Prediction received!")]);
    }

    #[tokio::test]
    async fn digit_field_is_used_without_prediction() {
        let endpoint = CannedEndpoint::ok(200, r#"{"digit": 3}"#);
        let mut flow = SubmissionFlow::new();
        assert_eq!(flow.submit(&sketch(), &endpoint).await.label(), Some("3"));
    }

    #[tokio::test]
    async fn empty_object_yields_question_mark() {
        let endpoint = CannedEndpoint::ok(200, "{}");
        let mut flow = SubmissionFlow::new();
        assert_eq!(flow.submit(&sketch(), &endpoint).await.label(), Some("?"));
    }

    #[test]
    fn string_prediction_is_shown_verbatim() {
        let endpoint = CannedEndpoint::ok(201, r#"{"prediction": "seven", "digit": 7}"#);
        let mut flow = SubmissionFlow::new();
        let surface = sketch();
        let state = tokio_test::block_on(flow.submit(&surface, &endpoint)).clone();
        assert_eq!(state.label(), Some("seven"));
    }

    #[tokio::test]
    async fn server_error_status_becomes_error_state() {
        let endpoint = CannedEndpoint::ok(500, "internal");
        let mut flow = SubmissionFlow::new();
        let state = flow.submit(&sketch(), &endpoint).await.clone();

        assert_eq!(
            state,
            PredictionState::Error {
                message: "Server error: 500".to_string()
            }
        );
        assert!(!flow.is_busy());
        assert_eq!(flow.drain_notices(), vec![Notice::error("Server error: 500")]);
    }

    #[tokio::test]
    async fn transport_failure_keeps_underlying_message() {
        let endpoint = CannedEndpoint::failing("connection refused");
        let mut flow = SubmissionFlow::new();
        assert_eq!(
            flow.submit(&sketch(), &endpoint).await.error(),
            Some("connection refused")
        );
        assert!(!flow.is_busy());
    }

    #[tokio::test]
    async fn second_begin_while_loading_is_refused() {
        let endpoint = CannedEndpoint::ok(200, r#"{"prediction": 1}"#);
        let surface = sketch();
        let mut flow = SubmissionFlow::new();

        let first = flow.begin(&surface).unwrap();
        assert!(flow.state().is_loading());
        assert!(flow.begin(&surface).is_none());
        // submit() goes through the same guard and must not reach the endpoint.
        assert!(flow.submit(&surface, &endpoint).await.is_loading());
        assert_eq!(endpoint.calls.load(Ordering::SeqCst), 0);

        let outcome = run_submission(&endpoint, first).await;
        assert!(flow.complete(outcome));
        assert_eq!(endpoint.calls.load(Ordering::SeqCst), 1);
        assert_eq!(flow.state().label(), Some("1"));
        assert!(flow.begin(&surface).is_some());
    }

    #[tokio::test]
    async fn stale_outcome_is_ignored() {
        let mut flow = SubmissionFlow::new();
        let pending = flow.begin(&sketch()).unwrap();

        let stale = SubmissionOutcome {
            request_id: pending.request_id + 10,
            result: Ok("9".to_string()),
        };
        assert!(!flow.complete(stale));
        assert!(flow.state().is_loading());
        assert!(flow.is_busy());
    }

    #[test]
    fn clear_resets_state_and_surface() {
        let mut surface = sketch();
        let mut flow = SubmissionFlow::new();
        flow.state = PredictionState::Error {
            message: "boom".to_string(),
        };

        flow.clear(&mut surface);
        assert_eq!(flow.state(), &PredictionState::Idle);
        assert!(surface.is_blank());
        assert_eq!(flow.drain_notices(), vec![Notice::success("Canvas cleared")]);
        assert!(flow.drain_notices().is_empty());
    }

    #[tokio::test]
    async fn clear_after_success_returns_to_idle() {
        let endpoint = CannedEndpoint::ok(200, r#"{"prediction": 5}"#);
        let mut surface = sketch();
        let mut flow = SubmissionFlow::new();
        assert_eq!(flow.submit(&surface, &endpoint).await.label(), Some("5"));
        flow.drain_notices();

        flow.clear(&mut surface);
        assert_eq!(flow.state(), &PredictionState::Idle);
        assert!(surface.is_blank());
        assert_eq!(flow.drain_notices(), vec![Notice::success("Canvas cleared")]);
        assert!(flow.begin(&surface).is_some());
    }

    #[test]
    fn clear_while_loading_abandons_request() {
        let mut surface = sketch();
        let mut flow = SubmissionFlow::new();
        let pending = flow.begin(&surface).unwrap();

        flow.clear(&mut surface);
        assert_eq!(flow.state(), &PredictionState::Idle);
        assert!(!flow.is_busy());
        assert!(surface.is_blank());

        let late = SubmissionOutcome {
            request_id: pending.request_id,
            result: Ok("8".to_string()),
        };
        assert!(!flow.complete(late));
        assert_eq!(flow.state(), &PredictionState::Idle);
    }

    #[test]
    fn request_ids_increase() {
        let surface = sketch();
        let mut flow = SubmissionFlow::new();
        let first = flow.begin(&surface).unwrap();
        flow.complete(SubmissionOutcome {
            request_id: first.request_id,
            result: Ok("4".to_string()),
        });
        let second = flow.begin(&surface).unwrap();
        assert!(second.request_id > first.request_id);
    }
}
