//! `[editor]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [editor]
//! language = "en"    # Fallback language when no preference is saved
//! ```

use serde::{Deserialize, Serialize};

/// Editor defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Fallback language when no preference is saved.
    /// The persisted `language` preference, once written, takes priority.
    pub language: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
        }
    }
}
