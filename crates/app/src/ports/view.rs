//! View port — the rendered page regions the synchronizer writes into.

use helpline_domain::id::{ElementId, NoticeId};

/// Counter display slots in the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterSlot {
    Favorites,
    Copies,
    Credit,
}

/// Visual state of a card's favorite toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FavoriteMarker {
    Favorited,
    Unfavorited,
}

impl FavoriteMarker {
    #[must_use]
    pub fn from_membership(is_favorite: bool) -> Self {
        if is_favorite {
            Self::Favorited
        } else {
            Self::Unfavorited
        }
    }

    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Favorited => "\u{2665}",
            Self::Unfavorited => "\u{2661}",
        }
    }
}

/// One rendered row of the call history panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub service_name: String,
    pub number: String,
    pub time: String,
}

/// Full content of the call history panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryRegion {
    Empty { message: &'static str },
    Rows(Vec<HistoryRow>),
}

/// The page as seen by the view synchronizer.
///
/// Every method replaces state rather than appending to it, so the same
/// call repeated yields the same page.
pub trait ViewSurface {
    /// Replace the whole history panel.
    fn replace_history(&self, region: HistoryRegion);

    /// Set the glyph/style of a favorite toggle element.
    fn set_favorite_marker(&self, element: &ElementId, marker: FavoriteMarker);

    /// Whether the page has a display slot for `slot`.
    fn has_counter_slot(&self, slot: CounterSlot) -> bool;

    /// Write `text` into a counter slot. Only called for existing slots.
    fn write_counter(&self, slot: CounterSlot, text: &str);

    /// Show or hide the "new" badge next to the history title.
    fn set_new_indicator(&self, visible: bool);

    /// Add a dismissible notice.
    fn show_notice(&self, id: NoticeId, message: &str);

    /// Remove a notice. Removing an unknown id is a no-op.
    fn remove_notice(&self, id: NoticeId);
}

impl<T: ViewSurface + ?Sized> ViewSurface for std::sync::Arc<T> {
    fn replace_history(&self, region: HistoryRegion) {
        (**self).replace_history(region);
    }

    fn set_favorite_marker(&self, element: &ElementId, marker: FavoriteMarker) {
        (**self).set_favorite_marker(element, marker);
    }

    fn has_counter_slot(&self, slot: CounterSlot) -> bool {
        (**self).has_counter_slot(slot)
    }

    fn write_counter(&self, slot: CounterSlot, text: &str) {
        (**self).write_counter(slot, text);
    }

    fn set_new_indicator(&self, visible: bool) {
        (**self).set_new_indicator(visible);
    }

    fn show_notice(&self, id: NoticeId, message: &str) {
        (**self).show_notice(id, message);
    }

    fn remove_notice(&self, id: NoticeId) {
        (**self).remove_notice(id);
    }
}
