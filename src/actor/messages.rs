//! Actor Message Definitions
//!
//! Message types for inter-actor communication.
//!
//! ```text
//! edits --EvalMsg--> EvalActor --ReconcileMsg--> ReconcileActor
//! timers/manual --RateMsg--> RateActor
//! ```

use crate::engine::LineResult;

// =============================================================================
// EvalActor Messages
// =============================================================================

/// Messages to the evaluation actor
#[derive(Debug)]
pub enum EvalMsg {
    /// The document changed; snapshot and evaluate it
    DocumentChanged,
    /// Switch the active language, persist it, and re-evaluate
    SetLanguage(String),
    /// Shutdown
    Shutdown,
}

// =============================================================================
// ReconcileActor Messages
// =============================================================================

/// Messages to the reconcile actor
#[derive(Debug)]
pub enum ReconcileMsg {
    /// Apply an evaluation response to the surface
    Apply {
        /// Request generation this response belongs to
        generation: u64,
        /// Document snapshot the response was computed from
        source: String,
        /// One result per input line, in document order
        results: Vec<LineResult>,
    },
    /// Shutdown
    Shutdown,
}

// =============================================================================
// RateActor Messages
// =============================================================================

/// Messages to the rate refresh actor
#[derive(Debug)]
pub enum RateMsg {
    /// Trigger a fetch (no-op while one is already in flight)
    Refresh,
    /// Shutdown
    Shutdown,
}
