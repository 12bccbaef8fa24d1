//! Checker configuration: where to send lookups, how long to wait for them,
//! and how fast to walk the credential list.
use std::fmt;
use std::time::Duration;

use url::Url;

use crate::credential::DEFAULT_PREVIEW_LEN;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_DELAY_MS: u64 = 1000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("endpoint must use http or https, got {0}")]
    UnsupportedScheme(String),
    #[error("endpoint {0} has no host")]
    MissingHost(String),
    #[error("timeout must be greater than zero")]
    ZeroTimeout,
}

#[derive(Clone)]
pub struct CheckerConfig {
    /// Identity-lookup URL queried once per credential.
    pub endpoint: Url,
    /// Host serving avatar images. Defaults to the endpoint's origin.
    pub avatar_base: Url,
    pub timeout: Duration,
    /// Pause between consecutive lookups.
    pub delay: Duration,
    pub preview_len: usize,
}

impl fmt::Debug for CheckerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckerConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("avatar_base", &self.avatar_base.as_str())
            .field("timeout_secs", &self.timeout.as_secs())
            .field("delay_ms", &self.delay.as_millis())
            .field("preview_len", &self.preview_len)
            .finish()
    }
}

impl CheckerConfig {
    /// Configuration with default timing for `endpoint`.
    pub fn new(endpoint: Url) -> Result<Self, ConfigError> {
        validate_endpoint(&endpoint)?;
        let avatar_base = origin_of(&endpoint)?;
        Ok(Self {
            endpoint,
            avatar_base,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            preview_len: DEFAULT_PREVIEW_LEN,
        })
    }

    pub fn with_avatar_base(mut self, base: Url) -> Self {
        self.avatar_base = base;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ConfigError> {
        if timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        self.timeout = timeout;
        Ok(self)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

fn validate_endpoint(url: &Url) -> Result<(), ConfigError> {
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
    if url.host_str().is_none() {
        return Err(ConfigError::MissingHost(url.to_string()));
    }
    Ok(())
}

fn origin_of(url: &Url) -> Result<Url, ConfigError> {
    let origin = url.origin().ascii_serialization();
    Url::parse(&origin).map_err(|_| ConfigError::MissingHost(url.to_string()))
}
