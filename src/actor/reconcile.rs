//! Reconcile Actor - Evaluation Results to Editor Decorations
//!
//! Applies a per-line result set to the surface: clear every gutter marker
//! and highlight first, then redraw row by row. The clear-first policy
//! means a result set computed for a differently-sized document can never
//! leave a stale decoration behind, and reapplying the same result set is
//! idempotent. Responses from superseded request generations are dropped
//! here, at the reconciliation boundary.

use std::sync::Arc;

use tokio::sync::mpsc;

use super::messages::ReconcileMsg;
use crate::core::PadContext;
use crate::engine::{LineResult, style_class};
use crate::prefs::DOCUMENT_KEY;
use crate::surface::Renderer;
use crate::utils::plural::plural_count;

/// Reconcile actor - the only writer of editor decorations
pub struct ReconcileActor {
    rx: mpsc::Receiver<ReconcileMsg>,
    renderer: Renderer,
    ctx: Arc<PadContext>,
    /// Display strings from the last applied pass, one per result row
    outputs: Vec<String>,
}

impl ReconcileActor {
    pub fn new(rx: mpsc::Receiver<ReconcileMsg>, ctx: Arc<PadContext>) -> Self {
        let renderer = Renderer::new(Arc::clone(&ctx.surface));
        Self {
            rx,
            renderer,
            ctx,
            outputs: Vec::new(),
        }
    }

    /// Run the actor event loop
    pub async fn run(mut self) {
        while let Some(msg) = self.rx.recv().await {
            match msg {
                ReconcileMsg::Apply {
                    generation,
                    source,
                    results,
                } => self.apply(generation, &source, &results),

                ReconcileMsg::Shutdown => {
                    crate::debug!("reconcile"; "shutting down");
                    break;
                }
            }
        }
    }

    /// Apply one evaluation response, unless it has been superseded.
    fn apply(&mut self, generation: u64, source: &str, results: &[LineResult]) {
        let latest = self.ctx.generations.latest();
        if generation != latest {
            crate::debug!("reconcile"; "discarding stale response #{} (latest is #{})", generation, latest);
            return;
        }

        self.outputs = decorate(&self.renderer, source, results);
        crate::debug!("reconcile"; "applied #{} ({} rows)", generation, self.outputs.len());

        // The last-seen document stays recoverable even when lines fail
        if let Err(e) = self.ctx.prefs.set(DOCUMENT_KEY, source) {
            crate::debug!("reconcile"; "document preference not saved: {}", e);
        }

        let failed = results.iter().filter(|line| !line.status).count();
        if failed > 0 {
            crate::logger::status_error(
                &format!("{} of {} failed", failed, plural_count(results.len(), "line")),
                "",
            );
        } else {
            crate::logger::status_success(&format!(
                "evaluated {}",
                plural_count(results.len(), "line")
            ));
        }
    }
}

/// Clear-then-redraw a result set; returns the display string per row.
///
/// Tolerates a result sequence shorter or longer than the document: rows
/// beyond the current line count stay undecorated, and the clear-first
/// pass already removed anything a shorter result set would leave behind.
/// Token spans that fall outside their owning line are skipped.
pub(crate) fn decorate(renderer: &Renderer, source: &str, results: &[LineResult]) -> Vec<String> {
    renderer.clear_markers();
    renderer.clear_highlights();

    // Visual rows, including a trailing empty row after a final newline
    let line_lens: Vec<usize> = source.split('\n').map(|line| line.chars().count()).collect();
    let mut outputs = Vec::with_capacity(results.len());

    for (row, line) in results.iter().enumerate() {
        let len = line_lens.get(row).copied();

        if !line.status {
            outputs.push(String::new());
            if len.is_some() {
                renderer.marker(row, "");
            }
            continue;
        }

        outputs.push(line.output.clone());

        // Engine returned more rows than the document has
        let Some(len) = len else { continue };

        renderer.marker(row, &line.output);

        for token in &line.tokens {
            if !token.fits(len) {
                crate::debug!("reconcile"; "dropping span {}..{} on row {} (line is {} chars)",
                    token.start, token.end, row, len);
                continue;
            }
            if let Some(class) = style_class(token.kind) {
                renderer.highlight(row, token.start, token.end, class);
            }
        }
    }

    outputs
}
