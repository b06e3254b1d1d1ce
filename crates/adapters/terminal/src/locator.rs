//! Element locator backed by the configured directory.

use helpline_app::ports::{ElementLocator, LocatedElement, TriggerRole};
use helpline_domain::id::ElementId;
use helpline_domain::service::ServiceCard;

/// Id of the single clear-history button.
pub const CLEAR_ELEMENT: &str = "clear";

/// Id of the element playing `role` on card `index` (1-based).
///
/// The clear button is page-level, so `index` is ignored for it.
#[must_use]
pub fn element_id(role: TriggerRole, index: usize) -> ElementId {
    match role {
        TriggerRole::Call => ElementId::new(format!("call-{index}")),
        TriggerRole::Copy => ElementId::new(format!("copy-{index}")),
        TriggerRole::FavoriteToggle => ElementId::new(format!("fav-{index}")),
        TriggerRole::ClearHistory => ElementId::new(CLEAR_ELEMENT),
    }
}

/// Every card gets a call button, a copy button and a favorite toggle; the
/// page has one clear button.
#[derive(Debug, Clone)]
pub struct DirectoryLocator {
    cards: Vec<ServiceCard>,
}

impl DirectoryLocator {
    #[must_use]
    pub fn new(cards: Vec<ServiceCard>) -> Self {
        Self { cards }
    }

    #[must_use]
    pub fn cards(&self) -> &[ServiceCard] {
        &self.cards
    }
}

impl ElementLocator for DirectoryLocator {
    fn locate(&self, role: TriggerRole) -> Vec<LocatedElement> {
        if !role.is_card_bound() {
            return vec![LocatedElement {
                element: element_id(role, 0),
                card: None,
            }];
        }
        self.cards
            .iter()
            .enumerate()
            .map(|(i, card)| LocatedElement {
                element: element_id(role, i + 1),
                card: Some(card.clone()),
            })
            .collect()
    }
}
