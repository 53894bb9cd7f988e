//! `ferry`: start and follow data-transfer submissions from the command line.

use ferry_common::{prelude::*, quick_main};
use structopt::StructOpt;

mod cmd;
mod description;
mod display;
mod messages;
mod monitor;
#[cfg(test)]
mod test_support;

/// Command-line options, parsed using `structopt`.
#[derive(Debug, StructOpt)]
#[structopt(about = "A tool for running jobs on a data-transfer server.")]
struct Opt {
    /// The server to talk to. Defaults to `$FERRY_SERVER_URL`, or a server
    /// running on localhost.
    #[structopt(long = "server-url", global = true)]
    server_url: Option<String>,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Submission-related commands.
    #[structopt(name = "submission")]
    Submission {
        #[structopt(subcommand)]
        cmd: cmd::submission::Opt,
    },
}

quick_main!(run);

fn run() -> Result<()> {
    let opt = Opt::from_args();
    debug!("Args: {:?}", opt);
    let config = Config::from_env(opt.server_url.as_deref())?;
    debug!("server: {}", config.server_url);

    match opt.cmd {
        Command::Submission { ref cmd } => cmd::submission::run(&config, cmd),
    }
}
