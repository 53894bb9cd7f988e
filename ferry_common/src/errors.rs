//! Error-reporting helpers for command-line tools.

use std::fmt;

use anyhow::Error;

/// Extension methods for showing an error along with everything that caused
/// it.
pub trait DisplayCausesExt {
    /// Display the error, its causes, and a backtrace if one was captured.
    fn display_causes_and_backtrace(&self) -> DisplayCauses<'_>;

    /// Display the error and its causes.
    fn display_causes(&self) -> DisplayCauses<'_>;
}

impl DisplayCausesExt for Error {
    fn display_causes_and_backtrace(&self) -> DisplayCauses<'_> {
        DisplayCauses {
            err: self,
            show_backtrace: true,
        }
    }

    fn display_causes(&self) -> DisplayCauses<'_> {
        DisplayCauses {
            err: self,
            show_backtrace: false,
        }
    }
}

/// A wrapper which implements `Display` for an error chain.
pub struct DisplayCauses<'a> {
    err: &'a Error,
    show_backtrace: bool,
}

impl fmt::Display for DisplayCauses<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ERROR: {}", self.err)?;
        for cause in self.err.chain().skip(1) {
            writeln!(f, "  caused by: {}", cause)?;
        }

        // `anyhow` prints "disabled backtrace" unless `RUST_BACKTRACE` is set,
        // which is just noise for our users.
        if self.show_backtrace {
            let backtrace = self.err.backtrace().to_string();
            if !backtrace.is_empty() && !backtrace.starts_with("disabled") {
                write!(f, "{}", backtrace)?;
            }
        }
        Ok(())
    }
}

/// Generate a `main` function which initializes tracing and then calls the
/// specified function. If it fails, print the error chain to standard error
/// and exit with status 1.
#[macro_export]
macro_rules! quick_main {
    ($wrapped:ident) => {
        fn main() {
            $crate::tracing_support::initialize_tracing();
            if let Err(err) = $wrapped() {
                use ::std::io::Write;
                use $crate::errors::DisplayCausesExt;
                let stderr = ::std::io::stderr();
                let _ = write!(
                    &mut stderr.lock(),
                    "{}",
                    err.display_causes_and_backtrace()
                );
                ::std::process::exit(1);
            }
        }
    };
}
