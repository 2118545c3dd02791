//! Widget configuration.

use std::env;
use std::time::Duration;

use thiserror::Error;

/// Default window for the simulated typing delay of canned replies.
pub const DEFAULT_DELAY_MS: (u64, u64) = (1000, 3000);

/// Default upper bound on each backend call.
pub const DEFAULT_REPLY_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Inclusive range of milliseconds to wait before a canned reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl DelayRange {
    /// Build a range, swapping the bounds if given in the wrong order.
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms: min_ms.min(max_ms),
            max_ms: min_ms.max(max_ms),
        }
    }

    /// No delay at all.
    pub fn immediate() -> Self {
        Self::new(0, 0)
    }

    /// Parse `"MIN-MAX"` or a single `"MS"`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        match value.split_once('-') {
            Some((min, max)) => Some(Self::new(
                min.trim().parse().ok()?,
                max.trim().parse().ok()?,
            )),
            None => value.parse().ok().map(|ms| Self::new(ms, ms)),
        }
    }
}

impl Default for DelayRange {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY_MS.0, DEFAULT_DELAY_MS.1)
    }
}

/// Resolved widget settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    /// Base URL of the external price/negotiation backend. When set the
    /// widget runs in remote mode.
    pub backend_url: Option<String>,
    /// Upper bound on each backend call. Never zero.
    pub reply_timeout: Duration,
    /// Simulated typing delay for canned replies.
    pub delay: DelayRange,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            backend_url: None,
            reply_timeout: DEFAULT_REPLY_TIMEOUT,
            delay: DelayRange::default(),
        }
    }
}

impl WidgetConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                       | Default      |
    /// |--------------------------------|--------------|
    /// | `STORECHAT_BACKEND_URL`        | unset        |
    /// | `STORECHAT_REPLY_TIMEOUT_SECS` | `30`         |
    /// | `STORECHAT_REPLY_DELAY_MS`     | `1000-3000`  |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`WidgetConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        config.backend_url = lookup("STORECHAT_BACKEND_URL").filter(|v| !v.trim().is_empty());

        if let Some(value) = lookup("STORECHAT_REPLY_TIMEOUT_SECS") {
            let secs = value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    key: "STORECHAT_REPLY_TIMEOUT_SECS",
                    value: value.clone(),
                })?;
            config.reply_timeout = Duration::from_secs(secs);
        }

        if let Some(value) = lookup("STORECHAT_REPLY_DELAY_MS") {
            config.delay = DelayRange::parse(&value).ok_or(ConfigError::Invalid {
                key: "STORECHAT_REPLY_DELAY_MS",
                value,
            })?;
        }

        Ok(config)
    }

    pub fn is_remote(&self) -> bool {
        self.backend_url.is_some()
    }
}
