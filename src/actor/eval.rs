//! Evaluation Actor - Document Change Coalescing
//!
//! Every edit notification produces exactly one evaluation request (no
//! debouncing): the actor snapshots the document and the active language,
//! claims the next request generation, and offloads the engine call to a
//! blocking worker so large documents never stall the message loops.
//! Responses flow to the reconcile actor, which drops any generation that
//! is no longer the latest, so overlapping requests are harmless and
//! cancellation is unnecessary.

use std::sync::Arc;

use tokio::sync::mpsc;

use super::messages::{EvalMsg, ReconcileMsg};
use crate::core::PadContext;
use crate::prefs::LANGUAGE_KEY;

/// Evaluation actor - turns edit notifications into tagged engine calls
pub struct EvalActor {
    rx: mpsc::Receiver<EvalMsg>,
    reconcile_tx: mpsc::Sender<ReconcileMsg>,
    ctx: Arc<PadContext>,
}

impl EvalActor {
    pub fn new(
        rx: mpsc::Receiver<EvalMsg>,
        reconcile_tx: mpsc::Sender<ReconcileMsg>,
        ctx: Arc<PadContext>,
    ) -> Self {
        Self {
            rx,
            reconcile_tx,
            ctx,
        }
    }

    /// Run the actor event loop
    pub async fn run(mut self) {
        while let Some(msg) = self.rx.recv().await {
            match msg {
                EvalMsg::DocumentChanged => self.evaluate(),

                EvalMsg::SetLanguage(code) => {
                    self.ctx.set_language(&code);
                    if let Err(e) = self.ctx.prefs.set(LANGUAGE_KEY, &code) {
                        crate::debug!("eval"; "language preference not saved: {}", e);
                    }
                    // A language switch re-evaluates the whole document
                    self.evaluate();
                }

                EvalMsg::Shutdown => {
                    crate::debug!("eval"; "shutting down");
                    break;
                }
            }
        }
    }

    /// Issue one evaluation request for the current document.
    ///
    /// Snapshot (text, language, generation) is captured synchronously at
    /// the moment of the edit; only the engine call itself is offloaded.
    fn evaluate(&self) {
        let source = self.ctx.surface.text();
        let language = self.ctx.language();
        let generation = self.ctx.generations.next();

        let evaluator = Arc::clone(&self.ctx.evaluator);
        let reconcile_tx = self.reconcile_tx.clone();

        crate::debug!("eval"; "request #{} ({} bytes)", generation, source.len());

        tokio::spawn(async move {
            let text = source.clone();
            let results = tokio::task::spawn_blocking(move || {
                evaluator.lock().execute(&language, &text)
            })
            .await
            .unwrap_or_default();

            let _ = reconcile_tx
                .send(ReconcileMsg::Apply {
                    generation,
                    source,
                    results,
                })
                .await;
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::mpsc;

    use super::*;
    use crate::prefs::LANGUAGE_KEY;
    use crate::testing::test_context;

    #[tokio::test]
    async fn test_edit_produces_tagged_request() {
        let (_dir, ctx, _evaluator, _surface) = test_context("1 + 1");
        let (tx, rx) = mpsc::channel(8);
        let (reconcile_tx, mut reconcile_rx) = mpsc::channel(8);

        let actor = EvalActor::new(rx, reconcile_tx, Arc::clone(&ctx));
        let handle = tokio::spawn(actor.run());

        tx.send(EvalMsg::DocumentChanged).await.unwrap();

        let msg = reconcile_rx.recv().await.unwrap();
        let ReconcileMsg::Apply {
            generation,
            source,
            results,
        } = msg
        else {
            panic!("expected Apply");
        };

        assert_eq!(generation, 1);
        assert_eq!(source, "1 + 1");
        assert_eq!(results.len(), 1);
        assert!(results[0].status);

        tx.send(EvalMsg::Shutdown).await.unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_every_edit_claims_a_new_generation() {
        let (_dir, ctx, _evaluator, _surface) = test_context("1 + 1");
        let (tx, rx) = mpsc::channel(8);
        let (reconcile_tx, mut reconcile_rx) = mpsc::channel(8);

        let actor = EvalActor::new(rx, reconcile_tx, Arc::clone(&ctx));
        let handle = tokio::spawn(actor.run());

        tx.send(EvalMsg::DocumentChanged).await.unwrap();
        tx.send(EvalMsg::DocumentChanged).await.unwrap();

        let mut generations = Vec::new();
        for _ in 0..2 {
            if let Some(ReconcileMsg::Apply { generation, .. }) = reconcile_rx.recv().await {
                generations.push(generation);
            }
        }

        generations.sort_unstable();
        assert_eq!(generations, vec![1, 2]);
        assert_eq!(ctx.generations.latest(), 2);

        tx.send(EvalMsg::Shutdown).await.unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_language_switch_persists_and_reevaluates() {
        let (_dir, ctx, _evaluator, _surface) = test_context("1 + 1");
        let (tx, rx) = mpsc::channel(8);
        let (reconcile_tx, mut reconcile_rx) = mpsc::channel(8);

        let actor = EvalActor::new(rx, reconcile_tx, Arc::clone(&ctx));
        let handle = tokio::spawn(actor.run());

        tx.send(EvalMsg::SetLanguage("tr".to_string())).await.unwrap();

        // The switch triggers one evaluation
        let msg = reconcile_rx.recv().await.unwrap();
        assert!(matches!(msg, ReconcileMsg::Apply { generation: 1, .. }));

        assert_eq!(ctx.language(), "tr");
        assert_eq!(ctx.prefs.get(LANGUAGE_KEY), Some("tr".to_string()));

        tx.send(EvalMsg::Shutdown).await.unwrap();
        handle.await.unwrap();
    }
}
