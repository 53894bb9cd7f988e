//! The `submission start` subcommand.

use ferry_common::{prelude::*, rest_api::Client, submission::SubmissionService};
use structopt::StructOpt;

use super::JobOpt;
use crate::display::{ConsoleDisplay, SubmissionDisplay};
use crate::monitor::{SubmissionMonitor, DEFAULT_POLL_INTERVAL};

/// Options for `submission start`.
#[derive(Debug, StructOpt)]
pub struct StartOpt {
    #[structopt(flatten)]
    pub job: JobOpt,

    /// Wait for the submission to finish, printing progress as it goes.
    #[structopt(short = "s", long = "synchronous")]
    pub synchronous: bool,

    /// Milliseconds to wait between status checks. Only used with
    /// `--synchronous`.
    #[structopt(short = "p", long = "poll-timeout")]
    pub poll_timeout: Option<u64>,
}

impl StartOpt {
    /// How long should we wait between polls?
    pub fn poll_interval(&self) -> Duration {
        self.poll_timeout
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_POLL_INTERVAL)
    }
}

/// The `submission start` subcommand.
pub fn run(config: &Config, opt: &StartOpt) -> Result<()> {
    let job_id = match opt.job.job_id() {
        Some(job_id) => job_id,
        None => return Ok(()),
    };

    // A long wait shouldn't be ruined by one failed poll.
    let config = config.clone().with_retry_fetches(opt.synchronous);
    let display = ConsoleDisplay::stdout(&config);

    // Control-C interrupts both the sleeps between polls and any retries.
    let cancel = if opt.synchronous {
        Cancellation::on_ctrl_c()?
    } else {
        Cancellation::never()
    };
    let client = Client::new(config)?.with_cancellation(cancel.clone());
    execute(job_id, opt, &client, &display, &cancel)
}

/// Start the submission, in whichever mode `opt` asks for.
fn execute<S, D>(
    job_id: JobId,
    opt: &StartOpt,
    service: &S,
    display: &D,
    cancel: &Cancellation,
) -> Result<()>
where
    S: SubmissionService + ?Sized,
    D: SubmissionDisplay + ?Sized,
{
    let monitor = SubmissionMonitor::new(service, display);
    if opt.synchronous {
        let poll_interval = opt.poll_interval();
        if poll_interval == Duration::from_millis(0) {
            return Err(format_err!("--poll-timeout must be greater than 0"));
        }
        monitor.start_and_poll(job_id, poll_interval, cancel)?;
    } else {
        if opt.poll_timeout.is_some() {
            debug!("ignoring --poll-timeout because --synchronous was not given");
        }
        monitor.start_and_display(job_id)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{RecordingDisplay, ScriptedService, Shown};
    use ferry_common::models::SubmissionStatus::*;
    use std::time::Instant;

    fn parse(args: &[&str]) -> StartOpt {
        StartOpt::from_iter_safe(args).expect("could not parse arguments")
    }

    #[test]
    fn parse_short_and_long_flags() {
        let opt = parse(&["start", "-j", "42", "-s", "-p", "250"]);
        assert_eq!(opt.job.jid, Some(JobId(42)));
        assert!(opt.synchronous);
        assert_eq!(opt.poll_interval(), Duration::from_millis(250));

        let opt = parse(&["start", "--jid", "42", "--synchronous", "--poll-timeout", "250"]);
        assert_eq!(opt.job.jid, Some(JobId(42)));
        assert!(opt.synchronous);
        assert_eq!(opt.poll_timeout, Some(250));
    }

    #[test]
    fn default_poll_interval() {
        let opt = parse(&["start", "-j", "7", "-s"]);
        assert_eq!(opt.poll_interval(), Duration::from_millis(10_000));
    }

    #[test]
    fn reject_non_numeric_job_id() {
        assert!(StartOpt::from_iter_safe(&["start", "-j", "abc"]).is_err());
    }

    #[test]
    fn missing_job_id_makes_no_calls() {
        let opt = parse(&["start", "-s"]);
        assert_eq!(opt.job.jid, None);
        // Nothing listens on this port, so any request would fail.
        let config = Config::new("http://127.0.0.1:9/", "alice").unwrap();
        run(&config, &opt).expect("missing --jid should not be an error");
    }

    #[test]
    fn poll_timeout_ignored_without_synchronous() {
        let opt = parse(&["start", "-j", "42", "-p", "1"]);
        let service = ScriptedService::new(&[Succeeded]);
        let display = RecordingDisplay::default();
        execute(JobId(42), &opt, &service, &display, &Cancellation::never()).unwrap();
        assert_eq!(*service.calls.borrow(), vec![("start", JobId(42))]);
        assert_eq!(
            display.shown.into_inner(),
            vec![Shown::Header(JobId(42), Succeeded), Shown::Progress(JobId(42), Succeeded)],
        );
    }

    #[test]
    fn synchronous_uses_poll_timeout() {
        let opt = parse(&["start", "-j", "7", "-s", "-p", "1"]);
        let service = ScriptedService::new(&[Running, Running, Succeeded]);
        let display = RecordingDisplay::default();
        let started = Instant::now();
        execute(JobId(7), &opt, &service, &display, &Cancellation::never()).unwrap();
        // Two waits at the default interval would take 20 seconds.
        assert!(
            started.elapsed() < Duration::from_secs(5),
            "took {:?}, so --poll-timeout was ignored",
            started.elapsed(),
        );
        assert_eq!(
            *service.calls.borrow(),
            vec![("start", JobId(7)), ("fetch", JobId(7)), ("fetch", JobId(7))],
        );
        assert_eq!(display.shown.borrow().last(), Some(&Shown::Footer(JobId(7), Succeeded)));
    }

    #[test]
    fn zero_poll_timeout_is_rejected() {
        let opt = parse(&["start", "-j", "7", "-s", "-p", "0"]);
        let service = ScriptedService::new(&[Running]);
        let display = RecordingDisplay::default();
        assert!(execute(JobId(7), &opt, &service, &display, &Cancellation::never()).is_err());
        assert!(service.calls.borrow().is_empty());
    }
}
