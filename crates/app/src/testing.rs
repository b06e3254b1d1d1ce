//! In-memory port fakes shared by the unit tests of this crate.

use std::collections::{HashMap, HashSet, VecDeque};
use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use helpline_domain::error::{ClipboardError, HelplineError};
use helpline_domain::id::{ElementId, NoticeId};
use helpline_domain::service::ServiceCard;

use crate::ports::{
    Clipboard, CounterSlot, ElementLocator, FavoriteMarker, HistoryRegion, LocatedElement,
    TriggerRole, UserPrompt, ViewSurface,
};

/// Page model recording whatever the synchronizer writes.
pub struct FakePage {
    slots: HashSet<CounterSlot>,
    history: Mutex<Option<HistoryRegion>>,
    markers: Mutex<HashMap<ElementId, FavoriteMarker>>,
    counters: Mutex<HashMap<CounterSlot, String>>,
    indicator: Mutex<bool>,
    notices: Mutex<Vec<(NoticeId, String)>>,
}

impl Default for FakePage {
    fn default() -> Self {
        Self::with_slots(&[CounterSlot::Favorites, CounterSlot::Copies, CounterSlot::Credit])
    }
}

impl FakePage {
    pub fn with_slots(slots: &[CounterSlot]) -> Self {
        Self {
            slots: slots.iter().copied().collect(),
            history: Mutex::new(None),
            markers: Mutex::new(HashMap::new()),
            counters: Mutex::new(HashMap::new()),
            indicator: Mutex::new(false),
            notices: Mutex::new(Vec::new()),
        }
    }

    pub fn history(&self) -> Option<HistoryRegion> {
        self.history.lock().unwrap().clone()
    }

    pub fn marker(&self, element: &str) -> Option<FavoriteMarker> {
        self.markers
            .lock()
            .unwrap()
            .get(&ElementId::new(element))
            .copied()
    }

    pub fn counter(&self, slot: CounterSlot) -> Option<String> {
        self.counters.lock().unwrap().get(&slot).cloned()
    }

    pub fn new_indicator(&self) -> bool {
        *self.indicator.lock().unwrap()
    }

    pub fn notices(&self) -> Vec<(NoticeId, String)> {
        self.notices.lock().unwrap().clone()
    }

    pub fn notice_texts(&self) -> Vec<String> {
        self.notices().into_iter().map(|(_, text)| text).collect()
    }
}

impl ViewSurface for FakePage {
    fn replace_history(&self, region: HistoryRegion) {
        *self.history.lock().unwrap() = Some(region);
    }

    fn set_favorite_marker(&self, element: &ElementId, marker: FavoriteMarker) {
        self.markers.lock().unwrap().insert(element.clone(), marker);
    }

    fn has_counter_slot(&self, slot: CounterSlot) -> bool {
        self.slots.contains(&slot)
    }

    fn write_counter(&self, slot: CounterSlot, text: &str) {
        self.counters.lock().unwrap().insert(slot, text.to_string());
    }

    fn set_new_indicator(&self, visible: bool) {
        *self.indicator.lock().unwrap() = visible;
    }

    fn show_notice(&self, id: NoticeId, message: &str) {
        self.notices.lock().unwrap().push((id, message.to_string()));
    }

    fn remove_notice(&self, id: NoticeId) {
        self.notices.lock().unwrap().retain(|(n, _)| *n != id);
    }
}

/// Prompt answering confirmations from a script; unscripted confirms cancel.
#[derive(Default)]
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<bool>>,
    confirms: Mutex<Vec<String>>,
    alerts: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            ..Self::default()
        }
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl UserPrompt for ScriptedPrompt {
    fn confirm(&self, message: &str) -> bool {
        self.confirms.lock().unwrap().push(message.to_string());
        self.answers.lock().unwrap().pop_front().unwrap_or(false)
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

/// Clipboard that records writes or fails on demand.
pub struct FakeClipboard {
    name: &'static str,
    working: bool,
    attempts: AtomicUsize,
    contents: Mutex<Option<String>>,
}

impl FakeClipboard {
    pub fn working(name: &'static str) -> Self {
        Self {
            name,
            working: true,
            attempts: AtomicUsize::new(0),
            contents: Mutex::new(None),
        }
    }

    pub fn broken(name: &'static str) -> Self {
        Self {
            working: false,
            ..Self::working(name)
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().unwrap().clone()
    }
}

impl Clipboard for FakeClipboard {
    fn mechanism(&self) -> &'static str {
        self.name
    }

    fn write_text(&self, text: &str) -> impl Future<Output = Result<(), HelplineError>> + Send {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let result = if self.working {
            *self.contents.lock().unwrap() = Some(text.to_string());
            Ok(())
        } else {
            Err(ClipboardError::Mechanism {
                mechanism: self.name,
                reason: "not supported".to_string(),
            }
            .into())
        };
        async { result }
    }
}

/// Locator over a fixed list of cards, one call/copy/favorite trigger each,
/// plus a single clear button.
pub struct StaticLocator {
    cards: Vec<ServiceCard>,
}

impl StaticLocator {
    pub fn new(cards: &[(&str, &str)]) -> Self {
        Self {
            cards: cards
                .iter()
                .map(|(name, number)| {
                    ServiceCard::builder()
                        .service_name(*name)
                        .number(*number)
                        .build()
                        .unwrap()
                })
                .collect(),
        }
    }
}

impl ElementLocator for StaticLocator {
    fn locate(&self, role: TriggerRole) -> Vec<LocatedElement> {
        let prefix = match role {
            TriggerRole::Call => "call",
            TriggerRole::Copy => "copy",
            TriggerRole::FavoriteToggle => "fav",
            TriggerRole::ClearHistory => {
                return vec![LocatedElement {
                    element: ElementId::new("clear"),
                    card: None,
                }];
            }
        };
        self.cards
            .iter()
            .map(|card| LocatedElement {
                element: ElementId::new(format!("{prefix}-{}", card.number)),
                card: Some(card.clone()),
            })
            .collect()
    }
}
