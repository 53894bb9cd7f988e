//! Starting submissions and following them until they finish.

use ferry_common::{
    prelude::*,
    submission::{SubmissionCallback, SubmissionService, WaitOutcome},
};

use crate::display::SubmissionDisplay;

/// How long to wait between polls when following a submission.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10_000);

/// Starts submissions using a `SubmissionService`, and shows what happens
/// using a `SubmissionDisplay`.
///
/// This holds no state of its own, so calling the same method twice against
/// the same server state shows the same output twice.
pub struct SubmissionMonitor<'a, S: ?Sized, D: ?Sized> {
    service: &'a S,
    display: &'a D,
}

impl<'a, S, D> SubmissionMonitor<'a, S, D>
where
    S: SubmissionService + ?Sized,
    D: SubmissionDisplay + ?Sized,
{
    /// Create a new monitor.
    pub fn new(service: &'a S, display: &'a D) -> Self {
        SubmissionMonitor { service, display }
    }

    /// Start a submission and show its initial state, without waiting for it
    /// to finish.
    #[instrument(level = "trace", skip(self))]
    pub fn start_and_display(&self, job_id: JobId) -> Result<()> {
        let submission = self.service.start_submission(job_id)?;
        self.display_snapshot(&submission)
    }

    /// Show the current state of the latest submission for `job_id`.
    #[instrument(level = "trace", skip(self))]
    pub fn fetch_and_display(&self, job_id: JobId) -> Result<()> {
        let submission = self.service.fetch_submission(job_id)?;
        self.display_snapshot(&submission)
    }

    /// Stop the running submission for `job_id` and summarize it.
    #[instrument(level = "trace", skip(self))]
    pub fn stop_and_display(&self, job_id: JobId) -> Result<()> {
        let submission = self.service.stop_submission(job_id)?;
        self.display.display_footer(&submission)
    }

    /// Start a submission and follow it, polling every `poll_interval`,
    /// until it finishes or `cancel` fires.
    ///
    /// Cancellation is logged, but it isn't an error.
    #[instrument(level = "trace", skip(self, cancel))]
    pub fn start_and_poll(
        &self,
        job_id: JobId,
        poll_interval: Duration,
        cancel: &Cancellation,
    ) -> Result<WaitOutcome> {
        let mut callback = DisplayCallback {
            display: self.display,
        };
        let outcome =
            self.service
                .start_and_wait(job_id, &mut callback, poll_interval, cancel)?;
        if outcome == WaitOutcome::Cancelled {
            error!("interrupted while waiting for job {} to finish", job_id);
        }
        Ok(outcome)
    }

    /// Show a single observation of a submission. Failed submissions only
    /// get a summary, because their progress means nothing.
    fn display_snapshot(&self, submission: &Submission) -> Result<()> {
        if submission.status.is_failure() {
            self.display.display_footer(submission)
        } else {
            self.display.display_header(submission)?;
            self.display.display_progress(submission)
        }
    }
}

/// Forwards submission events to a display.
struct DisplayCallback<'a, D: ?Sized> {
    display: &'a D,
}

impl<D: SubmissionDisplay + ?Sized> SubmissionCallback for DisplayCallback<'_, D> {
    fn on_submitted(&mut self, submission: &Submission) -> Result<()> {
        self.display.display_header(submission)?;
        self.display.display_progress(submission)
    }

    fn on_updated(&mut self, submission: &Submission) -> Result<()> {
        self.display.display_progress(submission)
    }

    fn on_finished(&mut self, submission: &Submission) -> Result<()> {
        self.display.display_footer(submission)
    }
}
