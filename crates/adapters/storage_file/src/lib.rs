//! # helpline-adapter-storage-file
//!
//! JSON file persistence adapter.
//!
//! ## Responsibilities
//! - Implement the `KeyValueStore` port defined in `helpline-app::ports::storage`
//! - Keep all keys in a single JSON object on disk, one string value per key
//! - Replace the file atomically on every write (temp file + rename)
//! - Survive a corrupt file by setting it aside and starting empty
//!
//! ## Dependency rule
//! Depends on `helpline-app` (for port traits) and `helpline-domain` (for error types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod file_store;

pub use error::StorageError;
pub use file_store::{Config, FileStore};
