use chrono::serde::ts_milliseconds_option;
use serde::{Deserializer, Serializer};

use crate::prelude::*;

/// The server's view of the most recent execution of a job.
///
/// We never modify these locally. Each call to the server returns a fresh
/// value, and the old one is simply dropped.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Submission {
    /// The job this submission belongs to.
    #[serde(rename = "job")]
    pub job_id: JobId,
    /// The current status of this submission.
    pub status: SubmissionStatus,
    /// How far along we are, as a fraction between 0 and 1, if the execution
    /// engine can tell. The server sends `-1` when it can't.
    #[serde(
        default,
        deserialize_with = "deserialize_progress",
        serialize_with = "serialize_progress"
    )]
    pub progress: Option<f64>,
    /// When this submission was created.
    #[serde(default, with = "ts_milliseconds_option")]
    pub creation_date: Option<DateTime<Utc>>,
    /// When the server last heard anything about this submission.
    #[serde(default, with = "ts_milliseconds_option")]
    pub last_update_date: Option<DateTime<Utc>>,
    /// The ID assigned by the execution engine.
    #[serde(default)]
    pub external_id: Option<String>,
    /// A link to the execution engine's own status page.
    #[serde(default)]
    pub external_link: Option<String>,
    /// Counters reported by the execution engine.
    #[serde(default)]
    pub counters: Option<Counters>,
    /// A short description of what went wrong, if anything did.
    #[serde(default)]
    pub exception: Option<String>,
    /// The server-side stack trace for `exception`.
    #[serde(default)]
    pub exception_trace: Option<String>,
}

impl Submission {
    /// Progress as a percentage, if known.
    pub fn progress_percent(&self) -> Option<f64> {
        self.progress.map(|p| p * 100.0)
    }

    /// The time we should show next to this submission's status.
    pub fn last_seen(&self) -> Option<DateTime<Utc>> {
        self.last_update_date.or(self.creation_date)
    }

    /// Generate a submission for testing.
    #[doc(hidden)]
    pub fn factory(job_id: JobId, status: SubmissionStatus) -> Submission {
        let now = Utc::now();
        Submission {
            job_id,
            status,
            progress: if status.is_running() { Some(0.5) } else { None },
            creation_date: Some(now),
            last_update_date: Some(now),
            external_id: Some(format!("job_{}_0001", job_id)),
            external_link: None,
            counters: None,
            exception: None,
            exception_trace: None,
        }
    }
}

/// Map the server's "-1 means unknown" convention onto `Option`.
fn deserialize_progress<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw.filter(|p| *p >= 0.0))
}

fn serialize_progress<S>(progress: &Option<f64>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(progress.unwrap_or(-1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_running_submission() {
        let json = r#"{
            "job": 7,
            "status": "RUNNING",
            "progress": 0.25,
            "creation-date": 1400000000000,
            "last-update-date": 1400000060000,
            "external-id": "job_1400000000000_0007",
            "external-link": "http://jobtracker:50030/jobdetails.jsp?jobid=job_1400000000000_0007",
            "counters": {
                "org.apache.hadoop.mapreduce.TaskCounter": {
                    "MAP_INPUT_RECORDS": 1000
                }
            }
        }"#;
        let submission: Submission = serde_json::from_str(json).expect("parse failed");
        assert_eq!(submission.job_id, JobId(7));
        assert_eq!(submission.status, SubmissionStatus::Running);
        assert_eq!(submission.progress_percent(), Some(25.0));
        assert_eq!(
            submission.last_seen().map(|d| d.timestamp_millis()),
            Some(1_400_000_060_000),
        );
        let counters = submission.counters.expect("no counters");
        assert_eq!(
            counters.iter().collect::<Vec<_>>(),
            vec![("org.apache.hadoop.mapreduce.TaskCounter", "MAP_INPUT_RECORDS", 1000)],
        );
    }

    #[test]
    fn negative_progress_means_unknown() {
        let json = r#"{ "job": 3, "status": "BOOTING", "progress": -1 }"#;
        let submission: Submission = serde_json::from_str(json).expect("parse failed");
        assert_eq!(submission.progress, None);
        assert_eq!(submission.creation_date, None);
        assert_eq!(submission.last_seen(), None);
    }

    #[test]
    fn missing_progress_means_unknown() {
        let json = r#"{ "job": 3, "status": "NEVER_EXECUTED" }"#;
        let submission: Submission = serde_json::from_str(json).expect("parse failed");
        assert_eq!(submission.progress, None);
        assert!(submission.status.has_finished());
    }
}
