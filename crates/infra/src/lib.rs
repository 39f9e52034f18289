//! `smartstock-infra` — persistence and process plumbing.
//!
//! The store itself is pure in-memory state; this crate is where it meets
//! the outside world: a string-keyed key-value backend holding one JSON
//! document per collection, the built-in seed dataset used when an entry is
//! absent or unreadable, and tracing initialization.

pub mod backend;
pub mod persistence;
pub mod seed;
pub mod telemetry;

pub use backend::{JsonFileBackend, KeyValueBackend, MemoryBackend};
pub use persistence::{load_store, save_store};
