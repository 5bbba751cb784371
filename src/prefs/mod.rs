//! Preference persistence - a JSON-backed key/value store.
//!
//! Two keys matter to the pipeline: [`LANGUAGE_KEY`] (active language,
//! written on language switch) and [`DOCUMENT_KEY`] (document text, written
//! after every reconcile pass so the last-seen document survives restarts).
//! The store itself is a plain string map; it neither retries failed writes
//! nor validates values.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

/// State directory name (inside the application root)
const STATE_DIR: &str = ".calcpad";

/// Preferences file name
const PREFS_FILE: &str = "prefs.json";

/// Preference key for the active language.
pub const LANGUAGE_KEY: &str = "language";

/// Preference key for the document text.
pub const DOCUMENT_KEY: &str = "code";

/// Sample document shown on first launch, before any document preference
/// has been saved.
pub const DEFAULT_DOCUMENT: &str = "tomorrow + 3 weeks
3/3/2021 to 3/3/2000
12/02/2020 - 11680 days
jan 28, 2019 - 14 months 33 days
3:35 am + 7 hours 15 minutes

date information = 11:30
date information add 1 hour 1 minute 30 second

8 / (45 - 20%)

10% of 200 try
180 is 10% of what

10% off 200

10 * 20 + 40

22250mb - 250.1mb
1024mb + (1024kb * 24)

$1k earning / 5 people";

/// Key/value preference store backed by a single JSON file.
///
/// Values are loaded once at open; each `set` rewrites the whole file.
pub struct PrefStore {
    root: PathBuf,
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl PrefStore {
    /// Open the store under `root`, loading any persisted values.
    pub fn open(root: &Path) -> Self {
        let path = root.join(STATE_DIR).join(PREFS_FILE);
        let values = restore(&path).unwrap_or_default();
        Self {
            root: root.to_path_buf(),
            path,
            values: Mutex::new(values),
        }
    }

    /// Application root this store lives under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read a preference.
    pub fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    /// Write a preference, rewriting the backing file.
    pub fn set(&self, key: &str, value: &str) -> std::io::Result<()> {
        let mut values = self.values.lock();
        values.insert(key.to_string(), value.to_string());
        persist(&self.path, &values)
    }

    /// Active language preference, or `fallback` when none is saved.
    pub fn language(&self, fallback: &str) -> String {
        self.get(LANGUAGE_KEY)
            .unwrap_or_else(|| fallback.to_string())
    }

    /// Last saved document text, or the built-in sample on first launch.
    pub fn document(&self) -> String {
        self.get(DOCUMENT_KEY)
            .unwrap_or_else(|| DEFAULT_DOCUMENT.to_string())
    }
}

fn restore(path: &Path) -> Option<BTreeMap<String, String>> {
    if !path.exists() {
        return None;
    }
    let json = fs::read_to_string(path).ok()?;
    serde_json::from_str(&json).ok()
}

fn persist(path: &Path, values: &BTreeMap<String, String>) -> std::io::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let json = serde_json::to_string_pretty(values)?;

    if file_content_matches(path, &json) {
        crate::debug!("prefs"; "unchanged, skipping write");
        return Ok(());
    }

    fs::write(path, json)
}

/// Check if file content is the same as new content
fn file_content_matches(path: &Path, content: &str) -> bool {
    path.exists() && fs::read_to_string(path).is_ok_and(|existing| existing == content)
}
