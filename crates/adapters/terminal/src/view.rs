//! Terminal page surface.
//!
//! The synchronizer writes into a screen model; the binary prints
//! [`TerminalView`]'s `Display` output after each command.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use helpline_app::ports::{CounterSlot, FavoriteMarker, HistoryRegion, TriggerRole, ViewSurface};
use helpline_domain::id::{ElementId, NoticeId};
use helpline_domain::service::ServiceCard;

use crate::locator::{CLEAR_ELEMENT, element_id};

const RULE_WIDTH: usize = 64;

#[derive(Debug, Default)]
struct Screen {
    history: Option<HistoryRegion>,
    markers: HashMap<ElementId, FavoriteMarker>,
    counters: HashMap<CounterSlot, String>,
    new_indicator: bool,
    notices: Vec<(NoticeId, String)>,
}

impl Screen {
    fn counter(&self, slot: CounterSlot) -> &str {
        self.counters.get(&slot).map_or("-", String::as_str)
    }
}

/// Screen model of the directory page.
#[derive(Debug)]
pub struct TerminalView {
    title: String,
    cards: Vec<ServiceCard>,
    screen: Mutex<Screen>,
}

impl TerminalView {
    /// A page listing `cards` in order, numbered the way
    /// [`DirectoryLocator`](crate::DirectoryLocator) numbers them.
    #[must_use]
    pub fn new(title: impl Into<String>, cards: Vec<ServiceCard>) -> Self {
        Self {
            title: title.into(),
            cards,
            screen: Mutex::new(Screen::default()),
        }
    }

    fn screen(&self) -> MutexGuard<'_, Screen> {
        self.screen.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current text of a counter slot, if it was written.
    #[must_use]
    pub fn counter(&self, slot: CounterSlot) -> Option<String> {
        self.screen().counters.get(&slot).cloned()
    }

    #[must_use]
    pub fn marker(&self, element: &ElementId) -> Option<FavoriteMarker> {
        self.screen().markers.get(element).copied()
    }

    #[must_use]
    pub fn history(&self) -> Option<HistoryRegion> {
        self.screen().history.clone()
    }

    #[must_use]
    pub fn new_indicator(&self) -> bool {
        self.screen().new_indicator
    }

    /// Messages of the notices currently shown, oldest first.
    #[must_use]
    pub fn notice_texts(&self) -> Vec<String> {
        self.screen()
            .notices
            .iter()
            .map(|(_, text)| text.clone())
            .collect()
    }

    /// The whole page as text.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl ViewSurface for TerminalView {
    fn replace_history(&self, region: HistoryRegion) {
        self.screen().history = Some(region);
    }

    fn set_favorite_marker(&self, element: &ElementId, marker: FavoriteMarker) {
        self.screen().markers.insert(element.clone(), marker);
    }

    fn has_counter_slot(&self, _slot: CounterSlot) -> bool {
        true
    }

    fn write_counter(&self, slot: CounterSlot, text: &str) {
        self.screen().counters.insert(slot, text.to_string());
    }

    fn set_new_indicator(&self, visible: bool) {
        self.screen().new_indicator = visible;
    }

    fn show_notice(&self, id: NoticeId, message: &str) {
        self.screen().notices.push((id, message.to_string()));
    }

    fn remove_notice(&self, id: NoticeId) {
        self.screen().notices.retain(|(shown, _)| *shown != id);
    }
}

impl fmt::Display for TerminalView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let screen = self.screen();
        let rule = "-".repeat(RULE_WIDTH);

        writeln!(
            f,
            "{}   {} {} | {} | {} coins",
            self.title,
            FavoriteMarker::Favorited.glyph(),
            screen.counter(CounterSlot::Favorites),
            screen.counter(CounterSlot::Copies),
            screen.counter(CounterSlot::Credit),
        )?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;

        let mut category = None;
        for (i, card) in self.cards.iter().enumerate() {
            let index = i + 1;
            if card.category.is_some() && card.category != category {
                category.clone_from(&card.category);
                writeln!(f, "[{}]", card.category.as_deref().unwrap_or_default())?;
            }
            let glyph = screen
                .markers
                .get(&element_id(TriggerRole::FavoriteToggle, index))
                .map_or(" ", |marker| marker.glyph());
            writeln!(
                f,
                "{index:>3}. {glyph} {:<28} {:>10}   call-{index} copy-{index} fav-{index}",
                card.service_name, card.number
            )?;
        }

        writeln!(f, "{rule}")?;
        let badge = if screen.new_indicator { " [new]" } else { "" };
        writeln!(f, "Call History{badge}   ({CLEAR_ELEMENT})")?;
        match &screen.history {
            None => {}
            Some(HistoryRegion::Empty { message }) => writeln!(f, "  {message}")?,
            Some(HistoryRegion::Rows(rows)) => {
                for row in rows {
                    writeln!(f, "  {:<28} {:>10}   {}", row.service_name, row.number, row.time)?;
                }
            }
        }

        if !screen.notices.is_empty() {
            writeln!(f, "{rule}")?;
            for (_, text) in &screen.notices {
                writeln!(f, "  * {text}")?;
            }
        }
        Ok(())
    }
}
