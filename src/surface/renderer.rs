//! Decoration renderer - the surface-facing half of reconciliation.

use std::sync::Arc;

use super::EditorSurface;

/// Stateless adapter over the surface's marker primitives.
///
/// Every reconcile pass starts from `clear_all`, so the renderer never
/// tracks what is currently decorated.
#[derive(Clone)]
pub struct Renderer {
    surface: Arc<dyn EditorSurface>,
}

impl Renderer {
    pub fn new(surface: Arc<dyn EditorSurface>) -> Self {
        Self { surface }
    }

    /// Clear all gutter markers and all highlight ranges.
    pub fn clear_all(&self) {
        self.surface.clear_markers();
        self.surface.clear_highlights();
    }

    /// Clear all gutter markers.
    pub fn clear_markers(&self) {
        self.surface.clear_markers();
    }

    /// Clear all text-highlight ranges.
    pub fn clear_highlights(&self) {
        self.surface.clear_highlights();
    }

    /// Attach a gutter marker at `row`.
    pub fn marker(&self, row: usize, content: &str) {
        self.surface.set_marker(row, content);
    }

    /// Highlight characters `[start, end)` on `row` with a style class.
    pub fn highlight(&self, row: usize, start: usize, end: usize, class: &str) {
        self.surface.highlight(row, start, end, class);
    }
}
