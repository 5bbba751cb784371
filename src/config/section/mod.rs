//! Configuration section definitions.

mod editor;
mod rates;

pub use editor::EditorConfig;
pub use rates::RatesConfig;
