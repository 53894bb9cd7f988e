//! Code shared between the `ferry` command-line tool and anything else which
//! needs to talk to a data-transfer server.

#![warn(missing_docs)]

pub use chrono;
pub use serde_json;
pub use tracing;

pub mod cancel;
pub mod config;
pub mod errors;
pub mod models;
pub mod rest_api;
pub mod submission;
pub mod tracing_support;

/// Common imports used by many modules.
pub mod prelude {
    pub use anyhow::{format_err, Context as _};
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use std::{
        collections::BTreeMap,
        fmt,
        io::Write,
        time::Duration,
    };
    pub use tracing::{debug, error, info, instrument, trace, warn};

    pub use super::cancel::Cancellation;
    pub use super::config::Config;
    pub use super::models::*;
    pub use super::{Error, Result};
}

/// Error type for this crate's functions.
pub use anyhow::Error;

/// Result type for this crate's functions.
pub use anyhow::Result;

/// The version of `ferry_common` that we're using. Sent along with each
/// request so the server can log which client it is talking to.
pub fn ferry_common_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
