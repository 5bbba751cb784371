//! Coordinator - Wires up and Runs the Pipeline Actors
//!
//! The Coordinator is a thin orchestrator that:
//! - Creates communication channels
//! - Wires up actors
//! - Issues the startup work (initial evaluation + initial rate fetch)
//! - Runs the actors concurrently

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossbeam::channel::Receiver;
use tokio::sync::mpsc;

use super::eval::EvalActor;
use super::messages::{EvalMsg, RateMsg, ReconcileMsg};
use super::rates::RateActor;
use super::reconcile::ReconcileActor;
use crate::core::PadContext;
use crate::rates::{RateSource, RateState};

const CHANNEL_BUFFER: usize = 32;

/// Handle for driving the running pipeline from the embedding editor.
///
/// Clone freely; all clones feed the same actors.
#[derive(Clone)]
pub struct PadHandle {
    eval_tx: mpsc::Sender<EvalMsg>,
    rate_tx: mpsc::Sender<RateMsg>,
    rates: RateState,
}

impl PadHandle {
    /// Notify the pipeline that the document changed.
    pub async fn document_changed(&self) {
        let _ = self.eval_tx.send(EvalMsg::DocumentChanged).await;
    }

    /// Switch the active language (persists the preference and
    /// re-evaluates the document).
    pub async fn set_language(&self, code: impl Into<String>) {
        let _ = self.eval_tx.send(EvalMsg::SetLanguage(code.into())).await;
    }

    /// Request a rate refresh (no-op while one is already in flight).
    pub async fn refresh_rates(&self) {
        let _ = self.rate_tx.send(RateMsg::Refresh).await;
    }

    /// Shared rate snapshot and staleness label, read-only.
    pub fn rates(&self) -> &RateState {
        &self.rates
    }
}

/// Coordinator - wires up and runs the actor system.
pub struct Coordinator<S: RateSource> {
    ctx: Arc<PadContext>,
    source: Arc<S>,
    shutdown_rx: Option<Receiver<()>>,
    handle: PadHandle,
    eval_rx: mpsc::Receiver<EvalMsg>,
    rate_rx: mpsc::Receiver<RateMsg>,
}

impl<S: RateSource> Coordinator<S> {
    /// Create from a context and a rate source.
    pub fn new(ctx: Arc<PadContext>, source: S) -> Self {
        let (eval_tx, eval_rx) = mpsc::channel(CHANNEL_BUFFER);
        let (rate_tx, rate_rx) = mpsc::channel(CHANNEL_BUFFER);

        let handle = PadHandle {
            eval_tx,
            rate_tx,
            rates: RateState::new(),
        };

        Self {
            ctx,
            source: Arc::new(source),
            shutdown_rx: None,
            handle,
            eval_rx,
            rate_rx,
        }
    }

    /// Set shutdown signal receiver.
    pub fn with_shutdown_signal(mut self, rx: Receiver<()>) -> Self {
        self.shutdown_rx = Some(rx);
        self
    }

    /// Handle for the embedding editor.
    pub fn handle(&self) -> PadHandle {
        self.handle.clone()
    }

    /// Run the actor system until shutdown.
    pub async fn run(self) -> Result<()> {
        let (reconcile_tx, reconcile_rx) = mpsc::channel::<ReconcileMsg>(CHANNEL_BUFFER);

        let eval = EvalActor::new(self.eval_rx, reconcile_tx.clone(), Arc::clone(&self.ctx));
        let reconcile = ReconcileActor::new(reconcile_rx, Arc::clone(&self.ctx));
        let rates = RateActor::new(
            self.rate_rx,
            Arc::clone(&self.source),
            Arc::clone(&self.ctx),
            self.handle.rates.clone(),
        );

        // Startup: evaluate the restored document, fetch the first table
        self.handle.document_changed().await;
        self.handle.refresh_rates().await;

        crate::debug!("actor"; "start");

        let reconcile_handle = tokio::spawn(reconcile.run());
        let eval_handle = tokio::spawn(eval.run());
        let rate_handle = tokio::spawn(rates.run());

        if let Some(rx) = self.shutdown_rx {
            loop {
                if rx.try_recv().is_ok() {
                    crate::debug!("actor"; "shutdown signal received");
                    break;
                }
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
        } else {
            tokio::select! {
                _ = eval_handle => {}
                _ = rate_handle => {}
            }
        }

        let _ = self.handle.eval_tx.send(EvalMsg::Shutdown).await;
        let _ = self.handle.rate_tx.send(RateMsg::Shutdown).await;
        let _ = reconcile_tx.send(ReconcileMsg::Shutdown).await;
        let _ = tokio::time::timeout(Duration::from_millis(500), reconcile_handle).await;

        crate::debug!("actor"; "stopped");
        Ok(())
    }
}
