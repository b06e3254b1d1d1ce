//! Element bindings — which page element triggers which action on which card.
//!
//! Resolved once at start-up from the [`ElementLocator`]; afterwards every
//! activation is a plain map lookup.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use helpline_domain::id::ElementId;
use helpline_domain::service::ServiceCard;

use crate::ports::{ElementLocator, TriggerRole};
use crate::view_sync::FavoriteToggle;

/// What activating an element does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub role: TriggerRole,
    pub card: Option<ServiceCard>,
}

/// Role/card mapping for every interactive element on the page.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    by_element: BTreeMap<ElementId, Binding>,
}

impl Bindings {
    /// Ask the locator for every role and bind what it returns.
    ///
    /// An element reported twice keeps its first binding. Card-bound roles
    /// reported without a card are ignored.
    pub fn resolve<L: ElementLocator + ?Sized>(locator: &L) -> Self {
        let mut by_element = BTreeMap::new();
        for role in TriggerRole::ALL {
            for located in locator.locate(role) {
                if role.is_card_bound() && located.card.is_none() {
                    tracing::warn!(element = %located.element, ?role, "element has no owning card, skipped");
                    continue;
                }
                match by_element.entry(located.element) {
                    Entry::Vacant(slot) => {
                        slot.insert(Binding {
                            role,
                            card: located.card,
                        });
                    }
                    Entry::Occupied(existing) => {
                        tracing::warn!(
                            element = %existing.key(),
                            ?role,
                            kept = ?existing.get().role,
                            "element located twice, keeping first binding"
                        );
                    }
                }
            }
        }
        tracing::debug!(count = by_element.len(), "page elements bound");
        Self { by_element }
    }

    #[must_use]
    pub fn get(&self, element: &ElementId) -> Option<&Binding> {
        self.by_element.get(element)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_element.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_element.is_empty()
    }

    /// Elements bound to `role`, in element order.
    pub fn elements_for(&self, role: TriggerRole) -> impl Iterator<Item = (&ElementId, &Binding)> {
        self.by_element
            .iter()
            .filter(move |(_, binding)| binding.role == role)
    }

    /// Favorite toggles with the number of their card.
    #[must_use]
    pub fn favorite_toggles(&self) -> Vec<FavoriteToggle> {
        self.elements_for(TriggerRole::FavoriteToggle)
            .filter_map(|(element, binding)| {
                binding.card.as_ref().map(|card| FavoriteToggle {
                    element: element.clone(),
                    number: card.number.clone(),
                })
            })
            .collect()
    }
}
