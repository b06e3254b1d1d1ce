//! # helpline-domain
//!
//! Pure domain model for the helpline emergency-service directory.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Service cards** (a displayed service name and phone number)
//! - Define the **Credit balance** spent on calls
//! - Define **Favorites** (toggle set keyed by number)
//! - Define the **History log** (bounded, newest-first call record)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod credit;
pub mod favorite;
pub mod history;
pub mod service;
