//! # Scriptor Architecture
//!
//! Scriptor is the core of a **multi-section manuscript editor**: a book is an
//! ordered list of named sections (title page, copyright, chapters, ...), one
//! of which is open on an editing surface at a time. The core keeps that list
//! consistent, never loses what was typed when switching sections, and writes
//! the whole project to a key-value store without hammering it on every
//! keystroke.
//!
//! The library has no terminal or UI assumptions. The `scriptor` binary is one
//! client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs)                                     │
//! │  - Parses arguments, prints results, exit codes             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - One controller per project, built at startup             │
//! │  - Boot + restore, immediate vs debounced saves             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business logic over a Workspace                          │
//! │  - Reports how its changes should be saved                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (outline.rs, codec.rs, scheduler.rs)                  │
//! │  - Section store and activation state machine               │
//! │  - Versioned project record                                 │
//! │  - Save debouncing                                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - StorageBackend key-value trait                           │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Surface Owns the Open Section
//!
//! While a section is open, what the user sees on the [`surface`] is newer
//! than the stored copy. Everything that could lose that state (switching,
//! deleting, saving) captures the surface first. See [`outline`].
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr, never exits the
//! process, and reports through `log` and returned values only. Storage
//! failures are logged and survived; the in-memory project is always the
//! source of truth.
//!
//! ## Testing Strategy
//!
//! 1. **Core and commands**: unit tests next to the code, against
//!    `MemorySurface` and `SequentialIds`.
//! 2. **API**: `MemBackend` and `ManualClock` make saves countable and time
//!    controllable, so debouncing is tested without sleeping.
//! 3. **CLI**: `tests/` runs the binary against a temporary data directory.
//!
//! ## Module Overview
//!
//! - [`api`]: The controller, entry point for all operations
//! - [`commands`]: Business logic for each command, and the [`commands::Workspace`]
//! - [`outline`]: Section store and activation
//! - [`codec`]: Project record encoding and restore
//! - [`scheduler`]: Debounced save timer and clocks
//! - [`store`]: Key-value storage abstraction and implementations
//! - [`model`]: Core data types (`Section`, `Theme`, `PageSize`)
//! - [`ids`]: Section id generation
//! - [`index`]: Position-based section selection
//! - [`surface`]: The editing surface trait
//! - [`markup`]: Word counts, plain text, markdown rendering
//! - [`prompts`]: Writing prompt library
//! - [`config`]: Configuration management
//! - [`editor`]: External editor integration
//! - [`error`]: Error types

pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod ids;
pub mod index;
pub mod markup;
pub mod model;
pub mod outline;
pub mod prompts;
pub mod scheduler;
pub mod store;
pub mod surface;
