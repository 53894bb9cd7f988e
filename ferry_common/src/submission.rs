//! The protocol for starting a submission and following it to completion.

use crate::prelude::*;

/// Receives notifications as a submission makes progress.
///
/// Calls always arrive in the same order: `on_submitted` once, then
/// `on_updated` zero or more times, then `on_finished` at most once.
pub trait SubmissionCallback {
    /// The submission has been started. `submission` is the server's first
    /// reply.
    fn on_submitted(&mut self, submission: &Submission) -> Result<()>;

    /// We polled the server, and the submission is still running.
    fn on_updated(&mut self, submission: &Submission) -> Result<()>;

    /// The submission has reached a terminal status.
    fn on_finished(&mut self, submission: &Submission) -> Result<()>;
}

/// How did a blocking wait end?
#[derive(Clone, Debug, PartialEq)]
pub enum WaitOutcome {
    /// The submission reached a terminal status.
    Completed(Submission),
    /// We were cancelled before the submission finished.
    Cancelled,
}

/// A remote service which can run submissions.
pub trait SubmissionService {
    /// Start a submission for `job_id` and return its initial state without
    /// waiting.
    fn start_submission(&self, job_id: JobId) -> Result<Submission>;

    /// Fetch the current state of the latest submission for `job_id`.
    fn fetch_submission(&self, job_id: JobId) -> Result<Submission>;

    /// Ask the server to stop the running submission for `job_id`.
    fn stop_submission(&self, job_id: JobId) -> Result<Submission>;

    /// Start a submission for `job_id`, then poll it every `poll_interval`
    /// until it finishes, reporting progress to `callback`.
    ///
    /// Returns `WaitOutcome::Cancelled` if `cancel` fires while we're
    /// waiting between polls or fetching, in which case `on_finished` is
    /// never called.
    fn start_and_wait(
        &self,
        job_id: JobId,
        callback: &mut dyn SubmissionCallback,
        poll_interval: Duration,
        cancel: &Cancellation,
    ) -> Result<WaitOutcome> {
        let mut submission = self.start_submission(job_id)?;
        callback.on_submitted(&submission)?;

        while !submission.status.has_finished() {
            if cancel.wait(poll_interval) {
                debug!("wait for job {} was cancelled", job_id);
                return Ok(WaitOutcome::Cancelled);
            }

            // A fetch can take a while, and it may even fail because we were
            // cancelled in the middle of it. Either way, a cancellation
            // requested during the fetch wins over whatever it returned.
            let fetched = self.fetch_submission(job_id);
            if cancel.is_cancelled() {
                debug!("wait for job {} was cancelled during a fetch", job_id);
                return Ok(WaitOutcome::Cancelled);
            }
            submission = fetched?;
            trace!("job {} is {}", job_id, submission.status);
            if !submission.status.has_finished() {
                callback.on_updated(&submission)?;
            }
        }

        callback.on_finished(&submission)?;
        Ok(WaitOutcome::Completed(submission))
    }
}
