//! Rate Refresh Actor
//!
//! Owns the currency snapshot lifecycle: fetches the remote table in a
//! background task (at most one in flight), pushes fresh pairs into the
//! evaluator's live table, and keeps the staleness label ticking once per
//! second. The label tick never triggers a fetch; recurring refresh, when
//! configured, goes through the same in-flight gate as a manual trigger.

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Interval, MissedTickBehavior};

use super::messages::RateMsg;
use crate::core::PadContext;
use crate::rates::{RateError, RateSnapshot, RateSource, RateState, RateTable, time_ago};

/// Staleness label tick period
const STATUS_TICK: Duration = Duration::from_secs(1);

/// In-flight fetch handle; `Some` IS the `Fetching` state
type FetchTask = JoinHandle<Result<RateTable, RateError>>;

/// Rate refresh actor - the only writer of the rate snapshot
pub struct RateActor<S: RateSource> {
    rx: mpsc::Receiver<RateMsg>,
    source: Arc<S>,
    ctx: Arc<PadContext>,
    state: RateState,
    fetch: Option<FetchTask>,
}

impl<S: RateSource> RateActor<S> {
    pub fn new(
        rx: mpsc::Receiver<RateMsg>,
        source: Arc<S>,
        ctx: Arc<PadContext>,
        state: RateState,
    ) -> Self {
        Self {
            rx,
            source,
            ctx,
            state,
            fetch: None,
        }
    }

    /// Run the actor event loop
    pub async fn run(mut self) {
        let mut ticker = tokio::time::interval(STATUS_TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // Recurring refresh starts one full period out; the startup fetch
        // arrives as an ordinary Refresh message
        let mut recurring = self.ctx.config.rates.refresh_interval().map(|period| {
            tokio::time::interval_at(tokio::time::Instant::now() + period, period)
        });

        loop {
            tokio::select! {
                biased;

                msg = self.rx.recv() => match msg {
                    Some(RateMsg::Refresh) => self.trigger(),
                    Some(RateMsg::Shutdown) | None => {
                        crate::debug!("rates"; "shutting down");
                        if let Some(task) = self.fetch.take() {
                            task.abort();
                        }
                        break;
                    }
                },

                result = wait_fetch(&mut self.fetch) => {
                    // Clear the in-flight slot before anything else, on
                    // every completion path
                    self.fetch = None;
                    self.complete(result);
                }

                _ = next_recurring(&mut recurring) => self.trigger(),

                _ = ticker.tick() => self.update_status(),
            }
        }
    }

    /// Start a fetch unless one is already in flight.
    fn trigger(&mut self) {
        if self.fetch.is_some() {
            crate::debug!("rates"; "refresh already in flight, ignoring");
            return;
        }

        crate::debug!("rates"; "fetching");
        let source = Arc::clone(&self.source);
        self.fetch = Some(tokio::spawn(async move { source.fetch().await }));
    }

    /// Handle fetch completion. The failure side leaves the previous
    /// snapshot and timestamp untouched.
    fn complete(&mut self, result: Result<RateTable, RateError>) {
        match result {
            Ok(table) => self.ingest(table),
            Err(e) => crate::log!("rates"; "refresh failed: {}", e),
        }
    }

    /// Replace the snapshot and push every pair into the evaluator.
    fn ingest(&mut self, table: RateTable) {
        let mut rates = RateTable::default();
        for (code, rate) in table {
            // The snapshot carries positive real rates only
            if !rate.is_finite() || rate <= 0.0 {
                crate::debug!("rates"; "dropping {} ({})", code, rate);
                continue;
            }
            rates.insert(code, rate);
        }

        // Best effort, pair by pair: one rejected code must not block the
        // rest, and already-pushed pairs stay pushed
        let mut pushed = 0usize;
        {
            let mut evaluator = self.ctx.evaluator.lock();
            for (code, rate) in &rates {
                match evaluator.update_currency(code, *rate) {
                    Ok(()) => pushed += 1,
                    Err(e) => crate::debug!("rates"; "{}: {}", code, e),
                }
            }
        }

        crate::log!("rates"; "updated {} rates ({} accepted by engine)", rates.len(), pushed);
        self.state.replace(RateSnapshot::new(rates, SystemTime::now()));
        self.state.set_status(format!("updated {}", time_ago(Duration::ZERO)));
    }

    /// Recompute the staleness label. Never triggers a fetch.
    fn update_status(&self) {
        let label = match self.state.snapshot().age() {
            Some(age) => format!("updated {}", time_ago(age)),
            None => String::from("-"),
        };
        self.state.set_status(label);
    }
}

/// Wait for the in-flight fetch (pends forever while idle). A panicked or
/// aborted fetch task surfaces as an ordinary failure, so the in-flight
/// slot is always cleared by the caller.
async fn wait_fetch(task: &mut Option<FetchTask>) -> Result<RateTable, RateError> {
    match task.as_mut() {
        Some(handle) => handle
            .await
            .unwrap_or_else(|e| Err(RateError::Source(e.to_string()))),
        None => std::future::pending().await,
    }
}

/// Tick the recurring refresh timer, if one is configured.
async fn next_recurring(timer: &mut Option<Interval>) {
    match timer {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}
