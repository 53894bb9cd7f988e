//! The `submission` subcommand.

use ferry_common::prelude::*;
use structopt::StructOpt;

use crate::messages;

mod start;
mod status;
mod stop;

pub use self::start::StartOpt;

/// Options for commands which act on an existing job.
#[derive(Debug, StructOpt)]
pub struct JobOpt {
    /// Job ID.
    #[structopt(short = "j", long = "jid")]
    pub jid: Option<JobId>,
}

impl JobOpt {
    /// Return our job ID, or tell the user it's missing.
    pub fn job_id(&self) -> Option<JobId> {
        if self.jid.is_none() {
            messages::print(messages::ARGS_JID_MISSING);
        }
        self.jid
    }
}

/// The `submission` subcommand.
#[derive(Debug, StructOpt)]
pub enum Opt {
    /// Start a submission for a job.
    #[structopt(name = "start")]
    Start(StartOpt),

    /// Show the status of the latest submission for a job.
    #[structopt(name = "status")]
    Status(JobOpt),

    /// Stop the running submission for a job.
    #[structopt(name = "stop")]
    Stop(JobOpt),
}

/// Run the `submission` subcommand.
pub fn run(config: &Config, opt: &Opt) -> Result<()> {
    match opt {
        Opt::Start(opt) => start::run(config, opt),
        Opt::Status(opt) => status::run(config, opt),
        Opt::Stop(opt) => stop::run(config, opt),
    }
}
