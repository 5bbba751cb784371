//! Test doubles shared across the crate's tests.
//!
//! - [`RecordingSurface`] - editor surface that records decoration calls
//! - [`StubEvaluator`] - scripted engine with a live currency table
//! - [`ScriptedRateSource`] - rate source replaying canned responses
//! - [`test_context`] - a fully wired [`PadContext`] over a temp directory

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tempfile::TempDir;
use tokio::sync::Semaphore;

use crate::config::PadConfig;
use crate::core::PadContext;
use crate::engine::{EngineError, Evaluator, LineResult, TokenKind, TokenSpan};
use crate::prefs::PrefStore;
use crate::rates::{RateError, RateSource, RateTable};
use crate::surface::EditorSurface;

// =============================================================================
// Surface double
// =============================================================================

/// One recorded decoration call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SurfaceOp {
    ClearMarkers,
    ClearHighlights,
    Marker(usize, String),
    Highlight(usize, usize, usize, String),
}

/// Editor surface that records every decoration call in order.
pub(crate) struct RecordingSurface {
    text: Mutex<String>,
    ops: Mutex<Vec<SurfaceOp>>,
}

impl RecordingSurface {
    pub(crate) fn new(text: &str) -> Arc<Self> {
        Arc::new(Self {
            text: Mutex::new(text.to_string()),
            ops: Mutex::new(Vec::new()),
        })
    }

    /// Simulate an edit by replacing the document text.
    pub(crate) fn set_text(&self, text: &str) {
        *self.text.lock() = text.to_string();
    }

    pub(crate) fn ops(&self) -> Vec<SurfaceOp> {
        self.ops.lock().clone()
    }

    pub(crate) fn clear_ops(&self) {
        self.ops.lock().clear();
    }

    /// Recorded gutter markers, in application order.
    pub(crate) fn markers(&self) -> Vec<(usize, String)> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                SurfaceOp::Marker(row, content) => Some((row, content)),
                _ => None,
            })
            .collect()
    }

    /// Recorded highlights, in application order.
    pub(crate) fn highlights(&self) -> Vec<(usize, usize, usize, String)> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                SurfaceOp::Highlight(row, start, end, class) => Some((row, start, end, class)),
                _ => None,
            })
            .collect()
    }
}

impl EditorSurface for RecordingSurface {
    fn text(&self) -> String {
        self.text.lock().clone()
    }

    fn clear_markers(&self) {
        self.ops.lock().push(SurfaceOp::ClearMarkers);
    }

    fn clear_highlights(&self) {
        self.ops.lock().push(SurfaceOp::ClearHighlights);
    }

    fn set_marker(&self, row: usize, content: &str) {
        self.ops
            .lock()
            .push(SurfaceOp::Marker(row, content.to_string()));
    }

    fn highlight(&self, row: usize, start: usize, end: usize, class: &str) {
        self.ops
            .lock()
            .push(SurfaceOp::Highlight(row, start, end, class.to_string()));
    }
}

// =============================================================================
// Engine double
// =============================================================================

/// Scripted engine: deterministic per-line rules plus a live currency
/// table fed through `update_currency`, mirroring the real engine's seam.
pub(crate) struct StubEvaluator {
    pub(crate) currencies: FxHashMap<String, f64>,
}

impl StubEvaluator {
    pub(crate) fn new() -> Self {
        Self {
            currencies: FxHashMap::default(),
        }
    }
}

impl Evaluator for StubEvaluator {
    fn execute(&self, _language: &str, source: &str) -> Vec<LineResult> {
        source
            .split('\n')
            .map(|line| eval_line(line, &self.currencies))
            .collect()
    }

    fn update_currency(&mut self, code: &str, rate: f64) -> Result<(), EngineError> {
        if code.is_empty() {
            return Err(EngineError::UnknownCurrency(code.to_string()));
        }
        self.currencies.insert(code.to_string(), rate);
        Ok(())
    }
}

/// Line rules:
/// - empty line → success with empty output
/// - line ending in `??` → failure
/// - `10% of 200` → `20` with classified spans
/// - `<amount> usd as <code>` → amount × table rate, failure if unknown
/// - anything else → echoed back as success
fn eval_line(line: &str, currencies: &FxHashMap<String, f64>) -> LineResult {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineResult::success("", vec![]);
    }
    if trimmed.ends_with("??") {
        return LineResult::failure();
    }
    if trimmed == "10% of 200" {
        return LineResult::success(
            "20",
            vec![
                TokenSpan::new(TokenKind::Number, 0, 3),
                TokenSpan::new(TokenKind::Text, 4, 6),
                TokenSpan::new(TokenKind::Number, 7, 10),
            ],
        );
    }

    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    if parts.len() == 4 && parts[1] == "usd" && parts[2] == "as" {
        if let Ok(amount) = parts[0].parse::<f64>() {
            let code = parts[3].to_ascii_uppercase();
            return match currencies.get(&code) {
                Some(rate) => {
                    let value = (amount * rate * 10_000.0).round() / 10_000.0;
                    LineResult::success(
                        value.to_string(),
                        vec![TokenSpan::new(TokenKind::Number, 0, parts[0].len())],
                    )
                }
                None => LineResult::failure(),
            };
        }
    }

    LineResult::success(trimmed, vec![])
}

// =============================================================================
// Rate source double
// =============================================================================

/// Rate source replaying canned responses, with an optional gate for
/// holding a fetch in flight.
pub(crate) struct ScriptedRateSource {
    results: Mutex<VecDeque<Result<Vec<(String, f64)>, String>>>,
    calls: AtomicUsize,
    gate: Semaphore,
}

impl ScriptedRateSource {
    pub(crate) fn with_results(results: Vec<Result<Vec<(String, f64)>, String>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            calls: AtomicUsize::new(0),
            gate: Semaphore::new(Semaphore::MAX_PERMITS),
        }
    }

    /// Close the gate: each fetch blocks until `release` is called.
    pub(crate) fn gated(self) -> Self {
        Self {
            gate: Semaphore::new(0),
            ..self
        }
    }

    /// Let one gated fetch through.
    pub(crate) fn release(&self) {
        self.gate.add_permits(1);
    }

    /// Number of fetches started so far.
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RateSource for ScriptedRateSource {
    async fn fetch(&self) -> Result<RateTable, RateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let permit = self.gate.acquire().await.expect("gate never closes");
        permit.forget();

        let next = self.results.lock().pop_front();
        match next {
            Some(Ok(pairs)) => Ok(pairs.into_iter().collect()),
            Some(Err(message)) => Err(RateError::Source(message)),
            None => Err(RateError::Source("script exhausted".to_string())),
        }
    }
}

// =============================================================================
// Wiring helpers
// =============================================================================

/// A fully wired context over a fresh temp directory.
///
/// Returns the temp dir (keep it alive), the context, and the concrete
/// evaluator/surface handles for assertions.
pub(crate) fn test_context(
    text: &str,
) -> (
    TempDir,
    Arc<PadContext>,
    Arc<Mutex<StubEvaluator>>,
    Arc<RecordingSurface>,
) {
    let dir = TempDir::new().unwrap();
    let evaluator = Arc::new(Mutex::new(StubEvaluator::new()));
    let surface = RecordingSurface::new(text);
    let prefs = PrefStore::open(dir.path());

    let ctx = Arc::new(PadContext::new(
        PadConfig::default(),
        evaluator.clone(),
        surface.clone(),
        prefs,
    ));

    (dir, ctx, evaluator, surface)
}

/// Poll `cond` until it holds, panicking after ~5 seconds.
pub(crate) async fn wait_until(mut cond: impl FnMut() -> bool) {
    for _ in 0..500 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not met within 5s");
}
