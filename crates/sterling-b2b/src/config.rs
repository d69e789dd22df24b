//! Connection profile for the Sterling B2Bi REST API

use crate::error::{SterlingError, SterlingResult};
use std::fmt;
use std::time::Duration;
use url::Url;

pub const HOST_ENV: &str = "B2BI_RESTAPI_URL";
pub const USERNAME_ENV: &str = "B2BI_USERNAME";
pub const PASSWORD_ENV: &str = "B2BI_PASSWORD";
pub const VERIFY_SSL_ENV: &str = "B2BI_VERIFY_SSL";
pub const TIMEOUT_ENV: &str = "B2BI_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Host, credentials and TLS policy for one Sterling B2Bi installation.
///
/// Only constructible through [`ConnectionProfile::new`] or the env loaders,
/// so a profile in hand is always a validated one.
#[derive(Clone)]
pub struct ConnectionProfile {
    host: String,
    username: String,
    password: String,
    verify_ssl: bool,
    timeout: Duration,
}

impl ConnectionProfile {
    /// Validate and build a profile. Certificate verification is off and the
    /// request timeout is 30 seconds until changed with the `with_*` setters.
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> SterlingResult<Self> {
        let host = host.into();
        let host = host.trim().trim_end_matches('/').to_string();
        if host.is_empty() {
            return Err(SterlingError::MissingConfig { var: HOST_ENV });
        }

        let username = username.into();
        if username.is_empty() {
            return Err(SterlingError::MissingConfig { var: USERNAME_ENV });
        }
        let password = password.into();
        if password.is_empty() {
            return Err(SterlingError::MissingConfig { var: PASSWORD_ENV });
        }

        let parsed = Url::parse(&host)
            .map_err(|e| SterlingError::InvalidConfig(format!("{} '{}': {}", HOST_ENV, host, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
            return Err(SterlingError::InvalidConfig(format!(
                "{} must be an http(s) URL, got '{}'",
                HOST_ENV, host
            )));
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(SterlingError::InvalidConfig(format!(
                "{} must not carry a query or fragment, got '{}'",
                HOST_ENV, host
            )));
        }

        Ok(Self {
            host,
            username,
            password,
            verify_ssl: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Load the profile from process environment variables
    pub fn from_env() -> SterlingResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the profile through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> SterlingResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(HOST_ENV).unwrap_or_default();
        let username = lookup(USERNAME_ENV).unwrap_or_default();
        let password = lookup(PASSWORD_ENV).unwrap_or_default();

        let verify_ssl = lookup(VERIFY_SSL_ENV)
            .map(|s| s.eq_ignore_ascii_case("true") || s == "1")
            .unwrap_or(false);

        let timeout = match lookup(TIMEOUT_ENV) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                SterlingError::InvalidConfig(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    TIMEOUT_ENV, raw
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self::new(host, username, password)?
            .with_verify_ssl(verify_ssl)
            .with_timeout(Duration::from_secs(timeout)))
    }

    pub fn with_verify_ssl(mut self, verify_ssl: bool) -> Self {
        self.verify_ssl = verify_ssl;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base address without trailing slash
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    pub fn verify_ssl(&self) -> bool {
        self.verify_ssl
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl fmt::Debug for ConnectionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionProfile")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"XXXXXXX")
            .field("verify_ssl", &self.verify_ssl)
            .field("timeout", &self.timeout)
            .finish()
    }
}
