// Client configuration: base URL, API token, transport timeout.
//
// Credential resolution is explicit. The transport core never touches the
// process environment; callers either pass a token directly or invoke
// `ClientConfig::from_env()` themselves, once, at startup.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::Error;

/// Default Masthead API host.
pub const DEFAULT_BASE_URL: &str = "https://metadata.mastheadata.com";

/// Environment variable consulted by [`ClientConfig::from_env`].
pub const TOKEN_ENV_VAR: &str = "MASTHEAD_API_TOKEN";

/// Fixed per-request timeout. There is no per-call override.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for a [`MastheadClient`](crate::MastheadClient).
///
/// Immutable once the client is built. The token is held as a
/// [`SecretString`] so it never shows up in `Debug` output or logs.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub token: SecretString,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Config for the default Masthead host with an explicit token.
    ///
    /// Fails with [`Error::Authentication`] when the token is empty --
    /// there is no anonymous access to the client API.
    pub fn new(token: SecretString) -> Result<Self, Error> {
        if token.expose_secret().is_empty() {
            return Err(Error::Authentication {
                message: format!(
                    "Masthead API token is required; pass one explicitly or set {TOKEN_ENV_VAR}"
                ),
            });
        }

        // DEFAULT_BASE_URL is a compile-time constant and always parses.
        let base_url = Url::parse(DEFAULT_BASE_URL)?;

        Ok(Self {
            base_url,
            token,
            timeout: REQUEST_TIMEOUT,
        })
    }

    /// Resolve the token from `MASTHEAD_API_TOKEN`.
    ///
    /// This is the only place the crate reads the environment, and only
    /// when the caller asks for it.
    pub fn from_env() -> Result<Self, Error> {
        match std::env::var(TOKEN_ENV_VAR) {
            Ok(token) if !token.is_empty() => Self::new(token.into()),
            _ => Err(Error::Authentication {
                message: format!(
                    "Masthead API token is required; set the {TOKEN_ENV_VAR} environment variable"
                ),
            }),
        }
    }

    /// Override the base URL (e.g. a staging host or a test server).
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Override the transport timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
