//! # helpline-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `KeyValueStore` — raw persistence medium
//!   - `UserPrompt` — blocking confirm/alert primitives
//!   - `Clipboard` — writing text to the system clipboard
//!   - `ElementLocator` — finding the page's interactive elements
//!   - `ViewSurface` — the page regions the view is rendered into
//! - Own the state: `PersistentStore` (typed, self-healing) and `Ledger`
//!   (the single writer of credit, favorites, copies and call history)
//! - Define **driving/inbound ports** as use-case structs:
//!   - `InteractionHandlers` — place call, copy number, toggle favorite, clear history
//!   - `ViewSynchronizer` — idempotent rendering of ledger state
//!   - `Session` — bind page elements once and dispatch activations
//! - Provide **in-process infrastructure** that doesn't need IO
//!   (in-memory store, transient timers, clipboard fallback chain)
//!
//! ## Dependency rule
//! Depends on `helpline-domain` only (plus `tokio` for timers and channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod bindings;
pub mod clipboard;
pub mod handlers;
pub mod ledger;
pub mod ports;
pub mod session;
pub mod store;
pub mod transient;
pub mod view_sync;

#[cfg(test)]
mod testing;
