//! Submission of the drawn digit to the prediction endpoint.
//!
//! - [`protocol`] - request payload and response label extraction
//! - [`client`] - the endpoint abstraction and its HTTP implementation
//! - [`flow`] - request lifecycle and the resulting [`PredictionState`]

pub mod client;
pub mod flow;
pub mod protocol;

pub use client::{HttpEndpoint, PredictionEndpoint};
pub use flow::{
    run_submission, Notice, NoticeKind, PendingSubmission, PredictionState, SubmissionFlow,
    SubmissionOutcome,
};
pub use protocol::{extract_label, EndpointReply, PredictRequest, RequestId, FALLBACK_LABEL};
