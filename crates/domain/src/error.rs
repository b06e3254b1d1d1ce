//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`HelplineError`] via `#[from]` (no `String` variants).

/// Top-level error shared by the application core and its adapters.
#[derive(Debug, thiserror::Error)]
pub enum HelplineError {
    /// The credit balance does not cover the cost of the action.
    #[error("insufficient credit: balance {balance}, cost {cost}")]
    InsufficientCredit { balance: u32, cost: u32 },

    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("clipboard error")]
    Clipboard(#[from] ClipboardError),

    /// The persistence medium failed. Adapters box their own error here.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A domain invariant was violated while constructing a value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("service name must not be empty")]
    EmptyServiceName,

    #[error("phone number must not be empty")]
    EmptyNumber,

    #[error("phone number {0:?} is listed more than once")]
    DuplicateNumber(String),
}

/// A looked-up item does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} {id} not found")]
pub struct NotFoundError {
    pub kind: &'static str,
    pub id: String,
}

/// Writing to the clipboard failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    /// A single mechanism could not be used.
    #[error("clipboard mechanism {mechanism} failed: {reason}")]
    Mechanism {
        mechanism: &'static str,
        reason: String,
    },

    /// Every mechanism was tried and none succeeded.
    #[error("no clipboard mechanism is available")]
    Unavailable,
}
