//! Data returned by the server.

use std::str::FromStr;

use crate::prelude::*;

mod counters;
mod submission;

pub use self::counters::*;
pub use self::submission::*;

/// The ID of a job known to the server. Jobs are created and numbered by the
/// server; we only ever pass these back to it.
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct JobId(pub u64);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for JobId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let id = s
            .trim()
            .parse::<u64>()
            .with_context(|| format!("invalid job ID {:?}", s))?;
        Ok(JobId(id))
    }
}

/// Possible states of a submission.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
    /// The server could not determine the state of the submission.
    Unknown,
    /// The submission has been accepted and the execution engine is
    /// preparing to run it.
    Booting,
    /// The execution engine refused the submission outright.
    FailureOnSubmit,
    /// The submission is running.
    Running,
    /// The submission finished successfully.
    Succeeded,
    /// The submission ran and failed.
    Failed,
    /// The server would not accept the submission, usually because the job
    /// is misconfigured.
    Unacceptable,
    /// The job has never been submitted.
    NeverExecuted,
}

impl SubmissionStatus {
    /// Is the submission still in progress?
    pub fn is_running(self) -> bool {
        match self {
            SubmissionStatus::Booting | SubmissionStatus::Running => true,
            _ => false,
        }
    }

    /// Did the submission fail?
    pub fn is_failure(self) -> bool {
        match self {
            SubmissionStatus::FailureOnSubmit
            | SubmissionStatus::Failed
            | SubmissionStatus::Unacceptable => true,
            _ => false,
        }
    }

    /// Will this status never change again? Anything which isn't running
    /// counts, including `Unknown`, because the server has nothing more to
    /// tell us.
    pub fn has_finished(self) -> bool {
        !self.is_running()
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match *self {
            SubmissionStatus::Unknown => "UNKNOWN",
            SubmissionStatus::Booting => "BOOTING",
            SubmissionStatus::FailureOnSubmit => "FAILURE_ON_SUBMIT",
            SubmissionStatus::Running => "RUNNING",
            SubmissionStatus::Succeeded => "SUCCEEDED",
            SubmissionStatus::Failed => "FAILED",
            SubmissionStatus::Unacceptable => "UNACCEPTABLE",
            SubmissionStatus::NeverExecuted => "NEVER_EXECUTED",
        };
        s.fmt(f)
    }
}
