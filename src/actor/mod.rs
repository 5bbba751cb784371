//! Actor System for Live Evaluation
//!
//! Message-passing pipeline for an editing session:
//!
//! ```text
//! edits --> EvalActor --> ReconcileActor --> gutter markers + highlights
//!           (engine)      (decorations)
//!           RateActor --> evaluator currency table
//!           (fetch + staleness)
//! ```
//!
//! # Module Structure
//!
//! - `messages` - Message types for inter-actor communication
//! - `eval` - Document change coalescing and engine invocation
//! - `reconcile` - Result-to-decoration reconciliation
//! - `rates` - Currency table refresh and staleness label
//! - `coordinator` - Wires up and runs actors

pub mod coordinator;
pub mod eval;
pub mod messages;
pub mod rates;
pub mod reconcile;


pub use coordinator::{Coordinator, PadHandle};
