//! The editing surface the user types into.
//!
//! While a section is active the surface, not the store, holds its current
//! content. The store only reads and replaces the surface wholesale.

pub trait EditingSurface {
    /// Current rich-text state of the surface.
    fn get_content(&self) -> String;

    /// Replace the displayed state.
    fn set_content(&mut self, markup: &str);
}

/// A surface backed by a plain string buffer.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemorySurface {
    buffer: String,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates the user typing at the end of the surface.
    pub fn type_text(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }
}

impl EditingSurface for MemorySurface {
    fn get_content(&self) -> String {
        self.buffer.clone()
    }

    fn set_content(&mut self, markup: &str) {
        self.buffer.clear();
        self.buffer.push_str(markup);
    }
}
