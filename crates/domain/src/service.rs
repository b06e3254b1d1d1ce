//! Service card — one emergency-service entry of the directory.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A directory card as the core sees it: a displayed service name and a
/// displayed phone number. The number is the card's identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCard {
    pub service_name: String,
    pub number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ServiceCard {
    /// Create a builder for constructing a [`ServiceCard`].
    #[must_use]
    pub fn builder() -> ServiceCardBuilder {
        ServiceCardBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the name or the number is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.service_name.trim().is_empty() {
            return Err(ValidationError::EmptyServiceName);
        }
        if self.number.trim().is_empty() {
            return Err(ValidationError::EmptyNumber);
        }
        Ok(())
    }
}

/// Step-by-step builder for [`ServiceCard`].
///
/// Name and number are trimmed, the way they are read off the page.
#[derive(Debug, Default)]
pub struct ServiceCardBuilder {
    service_name: Option<String>,
    number: Option<String>,
    category: Option<String>,
}

impl ServiceCardBuilder {
    #[must_use]
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Consume the builder, validate, and return a [`ServiceCard`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the name or number is missing or blank.
    pub fn build(self) -> Result<ServiceCard, ValidationError> {
        let card = ServiceCard {
            service_name: self.service_name.unwrap_or_default().trim().to_string(),
            number: self.number.unwrap_or_default().trim().to_string(),
            category: self.category,
        };
        card.validate()?;
        Ok(card)
    }
}

/// Check that every number in the directory is listed once.
///
/// # Errors
///
/// Returns [`ValidationError::DuplicateNumber`] naming the first repeat.
pub fn ensure_unique_numbers<'a>(
    cards: impl IntoIterator<Item = &'a ServiceCard>,
) -> Result<(), ValidationError> {
    let mut seen = std::collections::HashSet::new();
    for card in cards {
        if !seen.insert(card.number.as_str()) {
            return Err(ValidationError::DuplicateNumber(card.number.clone()));
        }
    }
    Ok(())
}
