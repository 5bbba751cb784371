//! Expression engine boundary.
//!
//! The engine itself (grammar, evaluation, symbol tables) lives outside
//! this crate. This module owns the seam: the [`Evaluator`] trait plus the
//! per-line result model the reconciler consumes.

mod style;

pub use style::style_class;

use thiserror::Error;

/// Engine-side failure when updating the live currency table.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("currency update rejected: {0}")]
    Rejected(String),
}

/// Classification of a highlighted source span.
///
/// Closed set: the style table in `style.rs` matches it exhaustively, and
/// kinds without a style entry simply render unstyled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Text,
    Number,
    MoneySymbol,
    DateTime,
    Month,
    Operator,
    Comment,
    VariableDefinition,
    VariableUse,
}

/// A classified character span within a single line, half-open `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl TokenSpan {
    pub const fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Self { kind, start, end }
    }

    /// Span invariant against the owning line: `start <= end <= line_len`.
    pub fn fits(&self, line_len: usize) -> bool {
        self.start <= self.end && self.end <= line_len
    }
}

/// Evaluation outcome for one document line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineResult {
    /// `false` marks a line the engine could not evaluate.
    pub status: bool,
    /// Display text; empty when `status` is false.
    pub output: String,
    /// Classified spans, in source order.
    pub tokens: Vec<TokenSpan>,
}

impl LineResult {
    pub fn success(output: impl Into<String>, tokens: Vec<TokenSpan>) -> Self {
        Self {
            status: true,
            output: output.into(),
            tokens,
        }
    }

    pub fn failure() -> Self {
        Self {
            status: false,
            output: String::new(),
            tokens: Vec::new(),
        }
    }
}

/// Expression evaluation engine.
///
/// `execute` is expected to be pure for a fixed (language, source, currency
/// table): repeated calls return identical result sequences, one entry per
/// input line in document order. `update_currency` mutates the engine's
/// live table and is callable independently per code.
pub trait Evaluator: Send {
    fn execute(&self, language: &str, source: &str) -> Vec<LineResult>;

    fn update_currency(&mut self, code: &str, rate: f64) -> Result<(), EngineError>;
}
