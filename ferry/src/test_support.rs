//! Fake collaborators for testing commands without a server.

use ferry_common::{cancel::CancelHandle, prelude::*, submission::SubmissionService};
use std::{cell::RefCell, collections::VecDeque};

use crate::display::SubmissionDisplay;

/// A service which replies with a scripted sequence of statuses, and records
/// which calls were made.
pub struct ScriptedService {
    statuses: RefCell<VecDeque<SubmissionStatus>>,
    pub calls: RefCell<Vec<(&'static str, JobId)>>,
    /// If set, cancel this during every fetch, before it returns.
    pub cancel_during_fetch: Option<CancelHandle>,
}

impl ScriptedService {
    pub fn new(statuses: &[SubmissionStatus]) -> Self {
        ScriptedService {
            statuses: RefCell::new(statuses.iter().copied().collect()),
            calls: RefCell::new(vec![]),
            cancel_during_fetch: None,
        }
    }

    fn next(&self, call: &'static str, job_id: JobId) -> Result<Submission> {
        self.calls.borrow_mut().push((call, job_id));
        let status = self
            .statuses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| format_err!("script ran out of statuses"))?;
        Ok(Submission::factory(job_id, status))
    }
}

impl SubmissionService for ScriptedService {
    fn start_submission(&self, job_id: JobId) -> Result<Submission> {
        self.next("start", job_id)
    }

    fn fetch_submission(&self, job_id: JobId) -> Result<Submission> {
        if let Some(handle) = &self.cancel_during_fetch {
            handle.cancel();
        }
        self.next("fetch", job_id)
    }

    fn stop_submission(&self, job_id: JobId) -> Result<Submission> {
        self.next("stop", job_id)
    }
}

/// One call to a `SubmissionDisplay`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shown {
    Header(JobId, SubmissionStatus),
    Progress(JobId, SubmissionStatus),
    Footer(JobId, SubmissionStatus),
}

/// A display which remembers what it was asked to show.
#[derive(Default)]
pub struct RecordingDisplay {
    pub shown: RefCell<Vec<Shown>>,
    /// If set, cancel this as soon as the header is shown.
    pub cancel_after_header: Option<CancelHandle>,
}

impl SubmissionDisplay for RecordingDisplay {
    fn display_header(&self, submission: &Submission) -> Result<()> {
        self.shown
            .borrow_mut()
            .push(Shown::Header(submission.job_id, submission.status));
        if let Some(handle) = &self.cancel_after_header {
            handle.cancel();
        }
        Ok(())
    }

    fn display_progress(&self, submission: &Submission) -> Result<()> {
        self.shown
            .borrow_mut()
            .push(Shown::Progress(submission.job_id, submission.status));
        Ok(())
    }

    fn display_footer(&self, submission: &Submission) -> Result<()> {
        self.shown
            .borrow_mut()
            .push(Shown::Footer(submission.job_id, submission.status));
        Ok(())
    }
}
