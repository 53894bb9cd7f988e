//! A client for the server's REST API.

use backoff::ExponentialBackoff;
use reqwest::{
    blocking::{self, Response},
    header::USER_AGENT,
    Method, StatusCode,
};
use std::result;
use url::Url;

use crate::{ferry_common_version, prelude::*, submission::SubmissionService};

/// The envelope used by the server for lists of submissions.
#[derive(Debug, Deserialize, Serialize)]
pub struct SubmissionList {
    /// The submissions returned by the server.
    pub all: Vec<Submission>,
}

/// A client for talking to the server.
pub struct Client {
    config: Config,
    client: blocking::Client,
    /// The first delay between retries.
    pub retry_initial_interval: Duration,
    /// Give up retrying once this much time has passed.
    pub retry_max_elapsed_time: Duration,
    /// The longest single delay between retries.
    pub retry_max_interval: Duration,
    /// Stop retrying once this fires.
    cancel: Cancellation,
}

impl Client {
    /// Create a new client using `config`.
    pub fn new(config: Config) -> Result<Client> {
        let client = blocking::Client::builder()
            .build()
            .context("could not build HTTP client")?;
        Ok(Client {
            config,
            client,
            retry_initial_interval: Duration::from_millis(500),
            retry_max_elapsed_time: Duration::from_secs(120),
            retry_max_interval: Duration::from_secs(5),
            cancel: Cancellation::never(),
        })
    }

    /// Give up on retries as soon as `cancel` fires.
    pub fn with_cancellation(mut self, cancel: Cancellation) -> Client {
        self.cancel = cancel;
        self
    }

    /// A fresh backoff policy. Each retried request gets its own, so the
    /// elapsed-time limit counts from the first attempt.
    fn retry_backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            current_interval: self.retry_initial_interval,
            initial_interval: self.retry_initial_interval,
            max_interval: self.retry_max_interval,
            max_elapsed_time: Some(self.retry_max_elapsed_time),
            ..ExponentialBackoff::default()
        }
    }

    /// The URL used to act on submissions for `job_id`.
    fn submission_url(&self, job_id: JobId) -> Result<Url> {
        let path = format!("v1/submission/action/{}", job_id);
        self.config
            .server_url
            .join(&path)
            .with_context(|| format!("could not build URL for {:?}", path))
    }

    /// Send a request about `job_id`, retrying if `retry` is true and the
    /// failure looks temporary.
    #[instrument(level = "trace", skip(self))]
    fn submission_request(
        &self,
        method: Method,
        job_id: JobId,
        retry: bool,
    ) -> Result<Submission> {
        let url = self.submission_url(job_id)?;
        let result = if retry {
            backoff::retry(self.retry_backoff(), || {
                self.submission_request_once(&method, &url)
                    .map_err(|err| match err {
                        backoff::Error::Transient { err, .. } if self.cancel.is_cancelled() => {
                            backoff::Error::permanent(err.context("cancelled while retrying"))
                        }
                        err => err,
                    })
            })
        } else {
            self.submission_request_once(&method, &url)
        };

        // Unwrap the backoff error into something we can handle.
        result
            .map_err(|err| match err {
                backoff::Error::Permanent(err) => err,
                backoff::Error::Transient { err, .. } => err,
            })
            .with_context(|| format!("error talking to server about job {}", job_id))
    }

    /// Make a single attempt at a request, classifying any failure as either
    /// transient or permanent.
    fn submission_request_once(
        &self,
        method: &Method,
        url: &Url,
    ) -> result::Result<Submission, backoff::Error<Error>> {
        trace!("{} {}", method, url);
        let resp = self
            .client
            .request(method.clone(), url.clone())
            .query(&[("user.name", &self.config.user)])
            .header(USER_AGENT, format!("ferry/{}", ferry_common_version()))
            .send()
            .map_err(|err| {
                let transient = err.is_connect() || err.is_timeout();
                let err = Error::new(err).context(format!("could not {} {}", method, url));
                if transient {
                    backoff::Error::transient(err)
                } else {
                    backoff::Error::permanent(err)
                }
            })?;
        Self::parse_submission(resp)
    }

    /// Turn a response into a single submission.
    fn parse_submission(
        resp: Response,
    ) -> result::Result<Submission, backoff::Error<Error>> {
        let status = resp.status();
        let url = resp.url().clone();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            let err = format_err!("server returned {} for {}: {}", status, url, body.trim());
            return Err(if is_transient_status(status) {
                backoff::Error::transient(err)
            } else {
                backoff::Error::permanent(err)
            });
        }
        let list = resp
            .json::<SubmissionList>()
            .with_context(|| format!("could not parse submission from {}", url))
            .map_err(backoff::Error::permanent)?;
        list.all.into_iter().next().ok_or_else(|| {
            backoff::Error::permanent(format_err!("no submission returned by {}", url))
        })
    }
}

/// Is this an HTTP status that might go away if we try again?
fn is_transient_status(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

impl SubmissionService for Client {
    fn start_submission(&self, job_id: JobId) -> Result<Submission> {
        debug!("starting submission for job {}", job_id);
        self.submission_request(Method::POST, job_id, false)
    }

    fn fetch_submission(&self, job_id: JobId) -> Result<Submission> {
        self.submission_request(Method::GET, job_id, self.config.retry_fetches)
    }

    fn stop_submission(&self, job_id: JobId) -> Result<Submission> {
        debug!("stopping submission for job {}", job_id);
        self.submission_request(Method::DELETE, job_id, false)
    }
}
