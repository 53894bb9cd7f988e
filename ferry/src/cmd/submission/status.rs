//! The `submission status` subcommand.

use ferry_common::{prelude::*, rest_api::Client};

use super::JobOpt;
use crate::display::ConsoleDisplay;
use crate::monitor::SubmissionMonitor;

/// The `submission status` subcommand.
pub fn run(config: &Config, opt: &JobOpt) -> Result<()> {
    let job_id = match opt.job_id() {
        Some(job_id) => job_id,
        None => return Ok(()),
    };
    let display = ConsoleDisplay::stdout(config);
    let client = Client::new(config.clone().with_retry_fetches(true))?;
    SubmissionMonitor::new(&client, &display).fetch_and_display(job_id)
}
