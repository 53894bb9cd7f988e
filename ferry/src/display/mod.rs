//! Showing submissions to the user.

use ferry_common::prelude::*;
use prettytable::{format::consts::FORMAT_CLEAN, row, Table};
use std::{cell::RefCell, io};

use crate::description::render_description;

/// Template for the banner shown when we start following a submission.
const HEADER_TEMPLATE: &str = include_str!("header.txt.hbs");

/// Template for the summary shown when a submission has finished.
const FOOTER_TEMPLATE: &str = include_str!("footer.txt.hbs");

/// Something which can show submissions to the user.
pub trait SubmissionDisplay {
    /// Show a one-time banner identifying the submission.
    fn display_header(&self, submission: &Submission) -> Result<()>;

    /// Show the current progress of the submission.
    fn display_progress(&self, submission: &Submission) -> Result<()>;

    /// Show a final summary of the submission.
    fn display_footer(&self, submission: &Submission) -> Result<()>;
}

/// Parameters used to render `HEADER_TEMPLATE`.
#[derive(Serialize)]
struct HeaderParams<'a> {
    job_id: JobId,
    server_url: &'a str,
    creation_date: Option<String>,
    external_id: Option<&'a str>,
    external_link: Option<&'a str>,
}

/// Parameters used to render `FOOTER_TEMPLATE`.
#[derive(Serialize)]
struct FooterParams<'a> {
    job_id: JobId,
    status: SubmissionStatus,
    last_update_date: Option<String>,
    exception: Option<&'a str>,
    exception_trace: Option<&'a str>,
    counters: Option<String>,
}

/// Writes human-readable submission information to a terminal (or anything
/// else which implements `Write`).
pub struct ConsoleDisplay<W: io::Write> {
    out: RefCell<W>,
    server_url: String,
}

impl ConsoleDisplay<io::Stdout> {
    /// Display submissions on standard output.
    pub fn stdout(config: &Config) -> Self {
        ConsoleDisplay::new(io::stdout(), config.server_url.as_str())
    }
}

impl<W: io::Write> ConsoleDisplay<W> {
    /// Display submissions by writing to `out`.
    pub fn new(out: W, server_url: impl Into<String>) -> Self {
        ConsoleDisplay {
            out: RefCell::new(out),
            server_url: server_url.into(),
        }
    }

    /// Recover our output.
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn emit(&self, s: &str) -> Result<()> {
        let mut out = self.out.borrow_mut();
        out.write_all(s.as_bytes())
            .and_then(|()| out.flush())
            .context("could not write output")
    }
}

impl<W: io::Write> SubmissionDisplay for ConsoleDisplay<W> {
    fn display_header(&self, submission: &Submission) -> Result<()> {
        let params = HeaderParams {
            job_id: submission.job_id,
            server_url: &self.server_url,
            creation_date: submission.creation_date.map(format_date),
            external_id: submission.external_id.as_deref(),
            external_link: submission.external_link.as_deref(),
        };
        self.emit(&render_description(HEADER_TEMPLATE, &params)?)
    }

    fn display_progress(&self, submission: &Submission) -> Result<()> {
        self.emit(&format!("{}\n", progress_line(submission)))
    }

    fn display_footer(&self, submission: &Submission) -> Result<()> {
        let counters = submission
            .counters
            .as_ref()
            .filter(|c| !c.is_empty())
            .map(counters_table);
        let params = FooterParams {
            job_id: submission.job_id,
            status: submission.status,
            last_update_date: submission.last_update_date.map(format_date),
            exception: submission.exception.as_deref(),
            exception_trace: submission.exception_trace.as_deref(),
            counters,
        };
        self.emit(&render_description(FOOTER_TEMPLATE, &params)?)
    }
}

/// Format a timestamp for humans.
fn format_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M:%S %Z").to_string()
}

/// A one-line summary of where a submission is.
fn progress_line(submission: &Submission) -> String {
    let when = submission
        .last_seen()
        .map(format_date)
        .unwrap_or_else(|| "(unknown time)".to_owned());
    match submission.progress_percent() {
        Some(pct) => format!("{}: {} {:.2} %", when, submission.status, pct),
        None => format!("{}: {}", when, submission.status),
    }
}

/// Lay out counters as a table.
fn counters_table(counters: &Counters) -> String {
    let mut table = Table::new();
    table.set_format(*FORMAT_CLEAN);
    table.add_row(row!["GROUP", "COUNTER", "VALUE"]);
    for (group, name, value) in counters.iter() {
        table.add_row(row![group, name, value]);
    }
    table.to_string()
}
