//! Where is the server, and who are we?

use std::env;
use url::Url;

use crate::prelude::*;

/// The server URL to use if nothing else is configured.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:12000/sqoop/";

/// Client configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// The base URL of the server. Always ends with `/`, so that relative
    /// paths can be joined onto it.
    pub server_url: Url,
    /// The user name to send to the server.
    pub user: String,
    /// Should we retry failed status fetches? Starting and stopping
    /// submissions are never retried, because they're not idempotent.
    pub retry_fetches: bool,
}

impl Config {
    /// Build a configuration from the environment, using `server_url` in
    /// place of `FERRY_SERVER_URL` if supplied.
    pub fn from_env(server_url: Option<&str>) -> Result<Config> {
        // Check the environment first, so it can be overridden for testing.
        let env_url = env::var("FERRY_SERVER_URL").ok();
        let server_url = server_url
            .or_else(|| env_url.as_deref())
            .unwrap_or(DEFAULT_SERVER_URL);
        let user = env::var("FERRY_USER")
            .or_else(|_| env::var("USER"))
            .unwrap_or_else(|_| "ferry".to_owned());
        Config::new(server_url, user)
    }

    /// Build a configuration for a specific server and user.
    pub fn new(server_url: &str, user: impl Into<String>) -> Result<Config> {
        Ok(Config {
            server_url: parse_server_url(server_url)?,
            user: user.into(),
            retry_fetches: false,
        })
    }

    /// Return a copy of this configuration with fetch retries turned on or
    /// off.
    pub fn with_retry_fetches(mut self, retry_fetches: bool) -> Config {
        self.retry_fetches = retry_fetches;
        self
    }
}

/// Parse a server URL, making sure it has a trailing slash.
fn parse_server_url(server_url: &str) -> Result<Url> {
    let mut url = Url::parse(server_url)
        .with_context(|| format!("invalid server URL {:?}", server_url))?;
    if url.cannot_be_a_base() {
        return Err(format_err!("server URL {:?} cannot be a base URL", server_url));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
