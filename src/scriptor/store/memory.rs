use super::StorageBackend;
use crate::error::{Result, ScriptorError};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the editor is single-threaded.
#[derive(Debug, Default)]
pub struct MemBackend {
    values: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
    simulate_write_error: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value without counting it as a write.
    pub fn with_value(self, key: &str, value: &str) -> Self {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl StorageBackend for MemBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(ScriptorError::Store("Simulated write error".to_string()));
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::PROJECT_KEY;

    #[test]
    fn read_missing_key_is_none() {
        let backend = MemBackend::new();
        assert_eq!(backend.read(PROJECT_KEY).unwrap(), None);
    }

    #[test]
    fn write_then_read() {
        let backend = MemBackend::new();
        backend.write(PROJECT_KEY, "{}").unwrap();
        assert_eq!(backend.read(PROJECT_KEY).unwrap().as_deref(), Some("{}"));
        assert_eq!(backend.write_count(), 1);
    }

    #[test]
    fn simulated_write_error_keeps_old_value() {
        let backend = MemBackend::new().with_value(PROJECT_KEY, "old");
        backend.set_simulate_write_error(true);

        assert!(backend.write(PROJECT_KEY, "new").is_err());
        assert_eq!(backend.value(PROJECT_KEY).as_deref(), Some("old"));
        assert_eq!(backend.write_count(), 0);
    }

    #[test]
    fn remove_is_idempotent() {
        let backend = MemBackend::new().with_value(PROJECT_KEY, "x");
        backend.remove(PROJECT_KEY).unwrap();
        backend.remove(PROJECT_KEY).unwrap();
        assert_eq!(backend.value(PROJECT_KEY), None);
    }
}
