//! View synchronizer — renders ledger state into the page surface.
//!
//! Every render reads the current ledger snapshot and overwrites the target
//! region, so renders can be repeated at any time with no effect beyond the
//! page itself.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use helpline_domain::id::{ElementId, NoticeId};

use crate::ledger::{Ledger, LedgerSnapshot};
use crate::ports::{CounterSlot, FavoriteMarker, HistoryRegion, HistoryRow, KeyValueStore, ViewSurface};
use crate::transient::{TRANSIENT_DURATION, expire_after};

/// Shown in the history panel when no call was placed yet.
pub const EMPTY_HISTORY_MESSAGE: &str = "No call history";

/// A favorite toggle on the page and the number of the card it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteToggle {
    pub element: ElementId,
    pub number: String,
}

/// Keeps the page in sync with the [`Ledger`].
pub struct ViewSynchronizer<S, V> {
    ledger: Arc<Ledger<S>>,
    surface: Arc<V>,
    toggles: Vec<FavoriteToggle>,
}

impl<S, V> ViewSynchronizer<S, V>
where
    S: KeyValueStore,
    V: ViewSurface + Send + Sync + 'static,
{
    pub fn new(ledger: Arc<Ledger<S>>, surface: Arc<V>, toggles: Vec<FavoriteToggle>) -> Self {
        Self {
            ledger,
            surface,
            toggles,
        }
    }

    #[must_use]
    pub fn surface(&self) -> &Arc<V> {
        &self.surface
    }

    /// Replace the history panel with the current log, newest first.
    pub fn render_history(&self) {
        self.surface
            .replace_history(history_region(&self.ledger.snapshot()));
    }

    /// Set every favorite toggle from the persisted favorite set.
    pub fn render_favorite_markers(&self) {
        let snapshot = self.ledger.snapshot();
        for toggle in &self.toggles {
            let marker = FavoriteMarker::from_membership(snapshot.favorites.contains(&toggle.number));
            self.surface.set_favorite_marker(&toggle.element, marker);
        }
    }

    /// Set the toggles of the cards listing `number`.
    pub fn render_marker(&self, number: &str) {
        let marker = FavoriteMarker::from_membership(self.ledger.is_favorite(number));
        for toggle in self.toggles.iter().filter(|t| t.number == number) {
            self.surface.set_favorite_marker(&toggle.element, marker);
        }
    }

    /// Write the favorite, copy and credit counters. Slots missing from the
    /// page are skipped.
    pub fn render_counters(&self) {
        let snapshot = self.ledger.snapshot();
        let values = [
            (CounterSlot::Favorites, snapshot.favorite_count().to_string()),
            (CounterSlot::Copies, format!("{} Copy", snapshot.copy_count)),
            (CounterSlot::Credit, snapshot.credit.to_string()),
        ];
        for (slot, text) in values {
            if self.surface.has_counter_slot(slot) {
                self.surface.write_counter(slot, &text);
            } else {
                tracing::debug!(?slot, "counter slot not on page, skipped");
            }
        }
    }

    /// Show the "new" badge while the ledger's new-item flag is raised.
    pub fn render_new_indicator(&self) {
        self.surface
            .set_new_indicator(self.ledger.new_item_flag().is_raised());
    }

    pub fn render_all(&self) {
        self.render_history();
        self.render_favorite_markers();
        self.render_counters();
        self.render_new_indicator();
    }

    /// Keep the "new" badge following the flag, including its expiry.
    ///
    /// Returns `None` outside a tokio runtime.
    pub fn watch_new_indicator(&self) -> Option<JoinHandle<()>> {
        let handle = tokio::runtime::Handle::try_current().ok()?;
        let mut changes = self.ledger.new_item_flag().subscribe();
        let surface = Arc::clone(&self.surface);
        Some(handle.spawn(async move {
            while changes.changed().await.is_ok() {
                let visible = *changes.borrow_and_update();
                surface.set_new_indicator(visible);
            }
        }))
    }

    /// Show `message` for the default three seconds.
    pub fn show_transient_notice(&self, message: &str) -> NoticeId {
        self.show_notice_for(message, TRANSIENT_DURATION)
    }

    /// Show `message` and remove it after `duration`. Each notice has its
    /// own timer.
    pub fn show_notice_for(&self, message: &str, duration: Duration) -> NoticeId {
        let id = NoticeId::new();
        self.surface.show_notice(id, message);
        let surface = Arc::clone(&self.surface);
        expire_after(duration, move || surface.remove_notice(id));
        id
    }

    /// Remove a notice before its timer fires.
    pub fn dismiss_notice(&self, id: NoticeId) {
        self.surface.remove_notice(id);
    }
}

fn history_region(snapshot: &LedgerSnapshot) -> HistoryRegion {
    if snapshot.history.is_empty() {
        return HistoryRegion::Empty {
            message: EMPTY_HISTORY_MESSAGE,
        };
    }
    HistoryRegion::Rows(
        snapshot
            .history
            .iter()
            .map(|item| HistoryRow {
                service_name: item.service_name.clone(),
                number: item.number.clone(),
                time: item.display_time.clone(),
            })
            .collect(),
    )
}
