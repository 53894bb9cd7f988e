//! The `submission stop` subcommand.

use ferry_common::{prelude::*, rest_api::Client};

use super::JobOpt;
use crate::display::ConsoleDisplay;
use crate::monitor::SubmissionMonitor;

/// The `submission stop` subcommand.
pub fn run(config: &Config, opt: &JobOpt) -> Result<()> {
    let job_id = match opt.job_id() {
        Some(job_id) => job_id,
        None => return Ok(()),
    };
    let display = ConsoleDisplay::stdout(config);
    let client = Client::new(config.clone())?;
    SubmissionMonitor::new(&client, &display).stop_and_display(job_id)
}
