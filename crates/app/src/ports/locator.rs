//! Element locator port — resolving interactive page elements to cards.

use helpline_domain::id::ElementId;
use helpline_domain::service::ServiceCard;

/// Semantic role of an interactive element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerRole {
    /// A card's "Call" button.
    Call,
    /// A card's "Copy" button.
    Copy,
    /// A card's favorite (heart) toggle.
    FavoriteToggle,
    /// The history panel's "Clear" button.
    ClearHistory,
}

impl TriggerRole {
    /// Every role, in binding order.
    pub const ALL: [Self; 4] = [
        Self::Call,
        Self::Copy,
        Self::FavoriteToggle,
        Self::ClearHistory,
    ];

    /// Whether elements of this role belong to a service card.
    #[must_use]
    pub fn is_card_bound(self) -> bool {
        !matches!(self, Self::ClearHistory)
    }
}

/// An element found by the locator, with the card it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedElement {
    pub element: ElementId,
    /// Owning card; `None` for page-level triggers such as "Clear".
    pub card: Option<ServiceCard>,
}

/// Finds the page elements playing a given role.
pub trait ElementLocator {
    fn locate(&self, role: TriggerRole) -> Vec<LocatedElement>;
}
