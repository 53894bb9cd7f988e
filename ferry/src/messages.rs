//! User-facing messages, kept in one place so they're easy to find and
//! reword.

/// Shown when a command needs a job ID, but none was given.
pub const ARGS_JID_MISSING: &str = "Required argument --jid is missing.";

/// Print a message for the user.
pub fn print(message: &str) {
    println!("{}", message);
}
