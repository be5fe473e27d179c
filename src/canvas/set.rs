use std::collections::HashMap;

use super::Canvas;

/// Independent canvases addressed by name, one per drawing surface.
#[derive(Debug)]
pub struct CanvasSet {
    canvases: HashMap<String, Canvas>,
    overlap_margin: i32,
}

impl Default for CanvasSet {
    fn default() -> Self {
        Self::new(10)
    }
}

impl CanvasSet {
    pub fn new(overlap_margin: i32) -> Self {
        Self {
            canvases: HashMap::new(),
            overlap_margin,
        }
    }

    pub fn canvas(&self, name: &str) -> Option<&Canvas> {
        self.canvases.get(name)
    }

    /// Returns the named canvas, creating an empty one if there is none yet.
    pub fn canvas_mut(&mut self, name: &str) -> &mut Canvas {
        let overlap_margin = self.overlap_margin;

        self.canvases
            .entry(name.to_owned())
            .or_insert_with(|| Canvas::new(overlap_margin))
    }

    pub fn remove(&mut self, name: &str) -> Option<Canvas> {
        self.canvases.remove(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.canvases.keys().map(String::as_str)
    }
}
