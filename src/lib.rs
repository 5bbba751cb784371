//! Calcpad - live-evaluation core for a calculator notepad.
//!
//! Keeps an editable multi-line document, an external expression engine,
//! and the editor's visual decorations in sync:
//!
//! ```text
//! edits --> EvalActor --> ReconcileActor --> gutter markers + highlights
//!           (engine)      (decorations)
//!           RateActor --> evaluator currency table
//!           (fetch + staleness)
//! ```
//!
//! The engine itself, the editor widget, and the rate endpoint are
//! collaborators behind traits ([`engine::Evaluator`],
//! [`surface::EditorSurface`], [`rates::RateSource`]); this crate owns the
//! pipeline between them.

pub mod actor;
pub mod config;
pub mod core;
pub mod engine;
pub mod logger;
pub mod prefs;
pub mod rates;
pub mod surface;
mod utils;

#[cfg(test)]
pub(crate) mod testing;

pub use actor::{Coordinator, PadHandle};
pub use config::PadConfig;
pub use core::PadContext;
