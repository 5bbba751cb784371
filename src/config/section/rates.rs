//! `[rates]` section configuration.
//!
//! Controls the currency rate source feeding the evaluator's live table.
//!
//! # Example
//!
//! ```toml
//! [rates]
//! url = "https://www.floatrates.com/daily/usd.json"
//! refresh = 3600    # Recurring refresh interval in seconds; 0 = fetch once at startup
//! timeout = 10      # Per-request HTTP timeout in seconds
//! ```
//!
//! The staleness label ("updated N minutes ago") keeps ticking regardless of
//! the refresh setting; with `refresh = 0` it simply grows without bound
//! until a manual refresh is requested.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default rate endpoint: the floatrates daily USD table.
pub const DEFAULT_RATES_URL: &str = "https://www.floatrates.com/daily/usd.json";

/// Currency rate source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RatesConfig {
    /// Rate endpoint returning `{ "<code>": { "rate": <number>, ... }, ... }`.
    pub url: String,

    /// Recurring refresh interval in seconds. `0` disables recurring
    /// refresh entirely (one fetch at startup, then manual only).
    pub refresh: u64,

    /// Per-request HTTP timeout in seconds.
    pub timeout: u64,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_RATES_URL.to_string(),
            refresh: 3600,
            timeout: 10,
        }
    }
}

impl RatesConfig {
    /// Recurring refresh period, `None` when disabled.
    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh > 0).then(|| Duration::from_secs(self.refresh))
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}
