//! Application context shared by the pipeline actors.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::config::PadConfig;
use crate::core::GenerationCounter;
use crate::engine::Evaluator;
use crate::prefs::PrefStore;
use crate::surface::EditorSurface;

/// Everything the actors need, constructed once at startup and passed by
/// `Arc` into each of them. Replaces the ambient globals (current engine,
/// active language, timer handles) of a typical editor shell.
pub struct PadContext {
    pub config: PadConfig,
    /// The expression engine. Locked for the duration of one `execute` or
    /// one currency update; rate merges and evaluations never interleave.
    pub evaluator: Arc<Mutex<dyn Evaluator>>,
    pub surface: Arc<dyn EditorSurface>,
    pub prefs: PrefStore,
    /// Request generation source for stale-response discard.
    pub generations: GenerationCounter,
    language: RwLock<String>,
}

impl PadContext {
    /// Build the context, restoring the persisted language preference
    /// (falling back to the configured default).
    pub fn new(
        config: PadConfig,
        evaluator: Arc<Mutex<dyn Evaluator>>,
        surface: Arc<dyn EditorSurface>,
        prefs: PrefStore,
    ) -> Self {
        let language = prefs.language(&config.editor.language);
        Self {
            config,
            evaluator,
            surface,
            prefs,
            generations: GenerationCounter::new(),
            language: RwLock::new(language),
        }
    }

    /// Active evaluation language.
    pub fn language(&self) -> String {
        self.language.read().clone()
    }

    pub(crate) fn set_language(&self, code: &str) {
        *self.language.write() = code.to_string();
    }
}
