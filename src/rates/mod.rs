//! Currency rate snapshots and staleness display.

mod source;

pub use source::{HttpRateSource, RateError, RateSource, RateTable};

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use arc_swap::ArcSwap;
use rustc_hash::FxHashMap;

use crate::utils::plural::plural_s;

/// Immutable view of the currency table at one fetch.
///
/// Replaced wholesale on a successful refresh; a failed refresh leaves the
/// previous snapshot untouched, so displayed rates only ever grow stale,
/// never disappear.
#[derive(Debug, Default, Clone)]
pub struct RateSnapshot {
    rates: FxHashMap<String, f64>,
    fetched_at: Option<SystemTime>,
}

impl RateSnapshot {
    pub fn new(rates: FxHashMap<String, f64>, fetched_at: SystemTime) -> Self {
        Self {
            rates,
            fetched_at: Some(fetched_at),
        }
    }

    /// Rate for a currency code, if present.
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// When this snapshot was fetched, `None` before the first success.
    pub fn fetched_at(&self) -> Option<SystemTime> {
        self.fetched_at
    }

    /// Elapsed time since the fetch, `None` before the first success.
    pub fn age(&self) -> Option<Duration> {
        self.fetched_at
            .map(|at| at.elapsed().unwrap_or(Duration::ZERO))
    }
}

/// Shared rate state: the snapshot plus a human-readable staleness label.
///
/// Written by the rate actor, read by the display layer. Both halves are
/// swapped atomically, so readers always see a complete table.
#[derive(Clone)]
pub struct RateState {
    snapshot: Arc<ArcSwap<RateSnapshot>>,
    status: Arc<ArcSwap<String>>,
}

impl Default for RateState {
    fn default() -> Self {
        Self {
            snapshot: Arc::new(ArcSwap::from_pointee(RateSnapshot::default())),
            status: Arc::new(ArcSwap::from_pointee(String::from("-"))),
        }
    }
}

impl RateState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<RateSnapshot> {
        self.snapshot.load_full()
    }

    /// Replace the snapshot atomically.
    pub(crate) fn replace(&self, snapshot: RateSnapshot) {
        self.snapshot.store(Arc::new(snapshot));
    }

    /// Staleness label, e.g. `updated 5 minutes ago` (`-` before the
    /// first successful fetch).
    pub fn status(&self) -> Arc<String> {
        self.status.load_full()
    }

    pub(crate) fn set_status(&self, label: String) {
        self.status.store(Arc::new(label));
    }
}

/// Human-readable elapsed time, coarsest unit that fits.
pub fn time_ago(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs < 5 {
        return "just now".to_string();
    }
    if secs < 60 {
        return format!("{secs} seconds ago");
    }

    let (amount, unit) = if secs < 3600 {
        (secs / 60, "minute")
    } else if secs < 86400 {
        (secs / 3600, "hour")
    } else {
        (secs / 86400, "day")
    };
    format!("{} {}{} ago", amount, unit, plural_s(amount as usize))
}
