//! Identifiers for page elements and transient notices.

use std::fmt;

use uuid::Uuid;

/// Unique identifier for a transient notice shown on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoticeId(Uuid);

impl NoticeId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NoticeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifier of an interactive element on the page (a button, a toggle).
///
/// Assigned by the element locator; opaque to the core.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(String);

impl ElementId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
