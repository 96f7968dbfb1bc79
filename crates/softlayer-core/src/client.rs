//! HTTP transport settings and retry policy.
//!
//! Transport retries are opt-in; the default settings send every request once. An enabled
//! policy covers transport failures only: connect errors, timeouts, 429 and 5xx responses
//! without a SoftLayer exception body. Client errors and API exceptions such as a refused
//! cancellation are returned to the caller on the first attempt.

use crate::error::Error;
use std::time::Duration;

/// SoftLayer REST endpoint used when none is configured.
pub const DEFAULT_ENDPOINT_URL: &str = "https://api.softlayer.com/rest/v3.1/";

/// Per-request timeout in seconds. `placeOrder` regularly takes tens of seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// TCP connect timeout in seconds.
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Seconds an idle pooled connection is kept.
pub const IDLE_CONNECTION_SECS: u64 = 90;

/// Idle pooled connections kept per host.
pub const MAX_IDLE_CONNECTIONS: usize = 4;

/// Transport retries after the first attempt when none are configured.
pub const DEFAULT_MAX_RETRIES: u32 = 0;

/// Retry budget of [`RetryPolicy::new`].
pub const STANDARD_MAX_RETRIES: u32 = 3;

/// Wait before the first transport retry, in milliseconds.
pub const RETRY_BASE_DELAY_MS: u64 = 500;

/// Upper bound on the wait between transport retries, in milliseconds.
pub const RETRY_DELAY_CAP_MS: u64 = 8_000;

/// Transport retry policy; the wait doubles after every retry up to a cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,

    /// Wait before the first retry
    pub base_delay: Duration,

    /// Longest wait between retries
    pub delay_cap: Duration,
}

impl RetryPolicy {
    /// Three retries starting at 500 ms, capped at 8 s.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_retries: STANDARD_MAX_RETRIES,
            base_delay: Duration::from_millis(RETRY_BASE_DELAY_MS),
            delay_cap: Duration::from_millis(RETRY_DELAY_CAP_MS),
        }
    }

    /// A policy that never retries.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
            delay_cap: Duration::ZERO,
        }
    }

    /// Sets the retry budget.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Sets the wait before the first retry.
    #[must_use]
    pub const fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Wait before retry number `retry`, counting from 1.
    #[must_use]
    pub fn backoff(&self, retry: u32) -> Duration {
        let Some(doublings) = retry.checked_sub(1) else {
            return Duration::ZERO;
        };
        2_u32
            .checked_pow(doublings)
            .and_then(|factor| self.base_delay.checked_mul(factor))
            .map_or(self.delay_cap, |delay| delay.min(self.delay_cap))
    }

    /// Whether retry number `retry` may follow a request that failed with `error`.
    #[must_use]
    pub const fn allows(&self, retry: u32, error: &Error) -> bool {
        retry <= self.max_retries && error.is_retryable()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::disabled()
    }
}

/// Connection settings for the REST client.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// Per-request timeout
    pub request_timeout: Duration,

    /// TCP connect timeout
    pub connect_timeout: Duration,

    /// How long idle pooled connections are kept
    pub idle_timeout: Duration,

    /// Idle pooled connections kept per host
    pub max_idle_per_host: usize,

    /// Accept gzip-encoded responses
    pub gzip: bool,

    /// Transport retry policy
    pub retry: RetryPolicy,
}

impl HttpSettings {
    /// Default settings, without transport retries.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            idle_timeout: Duration::from_secs(IDLE_CONNECTION_SECS),
            max_idle_per_host: MAX_IDLE_CONNECTIONS,
            gzip: true,
            retry: RetryPolicy::disabled(),
        }
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets the retry policy.
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Turns gzip response decoding on or off.
    #[must_use]
    pub const fn with_gzip(mut self, enabled: bool) -> Self {
        self.gzip = enabled;
        self
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self::new()
    }
}
