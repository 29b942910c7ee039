use crate::predict::{run_submission, PendingSubmission, PredictionEndpoint, SubmissionOutcome};
use log::debug;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Run a submission on the tokio runtime and post the outcome back to the render loop.
pub fn spawn_submission(
    endpoint: Arc<dyn PredictionEndpoint>,
    pending: PendingSubmission,
    tx: UnboundedSender<SubmissionOutcome>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let outcome = run_submission(endpoint.as_ref(), pending).await;
        if tx.send(outcome).is_err() {
            // The loop already exited; nobody is waiting for this result.
            debug!("submission finished after shutdown");
        }
    })
}
