//! Configuration structures for SoftLayer clients and provisioning workflows.
//!
//! [`SoftLayerConfig`] describes how to reach and authenticate against the API.
//! [`ProvisioningConfig`] carries the timing of the order wait and the cancellation retry
//! loop used by resource controllers.

use crate::client::{
    DEFAULT_ENDPOINT_URL, DEFAULT_MAX_RETRIES, DEFAULT_REQUEST_TIMEOUT_SECS,
};
use crate::Error;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use url::Url;
use validator::Validate;

/// Environment variables consulted for the API username, first match wins.
pub const USERNAME_ENV_VARS: &[&str] = &["SL_USERNAME", "SOFTLAYER_USERNAME"];
/// Environment variables consulted for the API key, first match wins.
pub const API_KEY_ENV_VARS: &[&str] = &["SL_API_KEY", "SOFTLAYER_API_KEY"];
/// Environment variables consulted for the endpoint URL, first match wins.
pub const ENDPOINT_ENV_VARS: &[&str] = &["SL_ENDPOINT_URL", "SOFTLAYER_ENDPOINT_URL"];

/// Connection settings for the SoftLayer API.
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct SoftLayerConfig {
    /// API username
    #[validate(length(min = 1))]
    pub username: String,

    /// API key, sent as the basic-auth password
    #[serde(skip_serializing)]
    pub api_key: SecretString,

    /// REST endpoint base URL
    #[validate(url)]
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Transport retries per request; zero sends every request once
    #[validate(range(min = 0, max = 10))]
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_endpoint_url() -> String {
    DEFAULT_ENDPOINT_URL.to_string()
}

const fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

const fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

impl SoftLayerConfig {
    /// Create a configuration for the default endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if validation fails.
    pub fn new(username: impl Into<String>, api_key: impl Into<String>) -> Result<Self, Error> {
        let config = Self {
            username: username.into(),
            api_key: SecretString::from(api_key.into()),
            endpoint_url: default_endpoint_url(),
            request_timeout_secs: default_request_timeout_secs(),
            max_retries: default_max_retries(),
        };

        config
            .validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;

        Ok(config)
    }

    /// Load the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if credentials are missing or invalid.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if credentials are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |keys: &[&str]| {
            keys.iter()
                .find_map(|key| lookup(*key).filter(|value| !value.is_empty()))
        };

        let username = first(USERNAME_ENV_VARS).ok_or_else(|| {
            Error::ConfigError(format!("missing username, set one of {USERNAME_ENV_VARS:?}"))
        })?;
        let api_key = first(API_KEY_ENV_VARS).ok_or_else(|| {
            Error::ConfigError(format!("missing API key, set one of {API_KEY_ENV_VARS:?}"))
        })?;

        let mut config = Self::new(username, api_key)?;
        if let Some(endpoint) = first(ENDPOINT_ENV_VARS) {
            debug!(endpoint = %endpoint, "Using endpoint from environment");
            config = config.with_endpoint_url(endpoint)?;
        }
        Ok(config)
    }

    /// Override the endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the URL does not parse.
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Result<Self, Error> {
        self.endpoint_url = endpoint_url.into();
        self.parse_endpoint_url()?;
        Ok(self)
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Set maximum transport retries.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Parse the endpoint URL, normalised to end with a slash so paths join beneath it.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn parse_endpoint_url(&self) -> Result<Url, Error> {
        let raw = if self.endpoint_url.ends_with('/') {
            self.endpoint_url.clone()
        } else {
            format!("{}/", self.endpoint_url)
        };
        Url::parse(&raw).map_err(|e| Error::ConfigError(format!("Invalid endpoint URL: {e}")))
    }
}

/// Timing of the wait for an ordered VLAN to appear on the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct OrderWaitConfig {
    /// Delay before the first poll, in seconds
    #[validate(range(max = 300))]
    #[serde(default = "default_initial_delay_secs")]
    pub initial_delay_secs: u64,

    /// Minimum interval between polls, in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_min_interval_secs")]
    pub min_interval_secs: u64,

    /// Total time allowed for the order to complete, in seconds
    #[validate(range(min = 1, max = 86_400))]
    #[serde(default = "default_order_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_initial_delay_secs() -> u64 {
    5
}

const fn default_min_interval_secs() -> u64 {
    3
}

const fn default_order_timeout_secs() -> u64 {
    600
}

impl OrderWaitConfig {
    /// Defaults: 5 s initial delay, 3 s interval, 10 min bound.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            initial_delay_secs: default_initial_delay_secs(),
            min_interval_secs: default_min_interval_secs(),
            timeout_secs: default_order_timeout_secs(),
        }
    }

    /// Delay before the first poll.
    #[must_use]
    pub const fn initial_delay(&self) -> Duration {
        Duration::from_secs(self.initial_delay_secs)
    }

    /// Minimum interval between polls.
    #[must_use]
    pub const fn min_interval(&self) -> Duration {
        Duration::from_secs(self.min_interval_secs)
    }

    /// Total bound on the wait.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for OrderWaitConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Retry settings for billing cancellation blocked by attached servers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CancelRetryConfig {
    /// Fixed wait between attempts, in seconds
    #[validate(range(max = 3600))]
    #[serde(default = "default_cancel_backoff_secs")]
    pub backoff_secs: u64,

    /// Retries after the first attempt
    #[validate(range(max = 20))]
    #[serde(default = "default_cancel_max_retries")]
    pub max_retries: u32,
}

const fn default_cancel_backoff_secs() -> u64 {
    60
}

const fn default_cancel_max_retries() -> u32 {
    5
}

impl CancelRetryConfig {
    /// Defaults: one minute backoff, five retries.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            backoff_secs: default_cancel_backoff_secs(),
            max_retries: default_cancel_max_retries(),
        }
    }

    /// Wait between attempts.
    #[must_use]
    pub const fn backoff(&self) -> Duration {
        Duration::from_secs(self.backoff_secs)
    }
}

impl Default for CancelRetryConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Timing configuration for provisioning workflows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ProvisioningConfig {
    /// Order completion wait
    #[validate(nested)]
    #[serde(default)]
    pub order_wait: OrderWaitConfig,

    /// Cancellation retry loop
    #[validate(nested)]
    #[serde(default)]
    pub cancel_retry: CancelRetryConfig,
}

impl ProvisioningConfig {
    /// Validate and return the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if a value is out of range.
    pub fn validated(self) -> Result<Self, Error> {
        self.validate()
            .map_err(|e| Error::ConfigError(format!("Invalid provisioning configuration: {e}")))?;
        Ok(self)
    }

    /// Replace the order wait settings.
    #[must_use]
    pub const fn with_order_wait(mut self, order_wait: OrderWaitConfig) -> Self {
        self.order_wait = order_wait;
        self
    }

    /// Replace the cancellation retry settings.
    #[must_use]
    pub const fn with_cancel_retry(mut self, cancel_retry: CancelRetryConfig) -> Self {
        self.cancel_retry = cancel_retry;
        self
    }
}
