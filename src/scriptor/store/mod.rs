//! # Storage Layer
//!
//! The project is persisted as a handful of string values under fixed keys,
//! the same shape as browser local storage. [`StorageBackend`] is that
//! key-value surface; nothing above it knows whether the bytes land on disk or
//! in memory.
//!
//! ## Implementations
//!
//! - [`fs::FsBackend`]: one file per key under a data directory
//!   - `crafted.v4.project.json`, `crafted.v4.daily.json`, ...
//!   - Writes go to a temp file first and are renamed into place
//!
//! - [`memory::MemBackend`]: in-memory map for testing
//!   - Counts writes, can simulate a full disk
//!
//! ## Keys
//!
//! | Key | Value |
//! |-----|-------|
//! | [`PROJECT_KEY`] | the project record (see [`crate::codec`]) |
//! | [`DAILY_KEY`] | date the daily word goal was last reached |
//! | [`PROMPTS_KEY`] | per-category prompt cursor positions |

use crate::error::Result;

pub mod fs;
pub mod memory;

pub const PROJECT_KEY: &str = "crafted.v4.project";
pub const DAILY_KEY: &str = "crafted.v4.daily";
pub const PROMPTS_KEY: &str = "crafted.v4.prompts";

/// Abstract key-value storage.
///
/// All methods take `&self`; the process has a single writer, so
/// implementations manage their own interior state.
pub trait StorageBackend {
    /// Read the value under `key`. `Ok(None)` when nothing is stored.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    /// Must not leave a partially written value behind on failure.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
