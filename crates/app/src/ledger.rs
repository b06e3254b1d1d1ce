//! Ledger — the single owner and writer of the directory's persisted state.
//!
//! Holds the credit balance, favorite set, copy counter and call history.
//! Each operation takes the state lock once, mutates, persists and returns,
//! so no caller ever observes a half-applied change. The favorite count is
//! never stored on its own: it is derived from the favorite set and written
//! next to it.

use std::sync::{Mutex, MutexGuard, PoisonError};

use helpline_domain::credit::{CALL_COST, CreditBalance};
use helpline_domain::error::HelplineError;
use helpline_domain::favorite::{FavoriteEntry, FavoriteState, Favorites};
use helpline_domain::history::{HistoryItem, HistoryLog};
use helpline_domain::time::now;

use crate::ports::KeyValueStore;
use crate::store::{PersistentStore, keys};
use crate::transient::{TRANSIENT_DURATION, TransientFlag};

/// Copy count of a fresh installation.
pub const INITIAL_COPY_COUNT: u32 = 2;

/// Point-in-time copy of the ledger, used for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerSnapshot {
    pub credit: CreditBalance,
    pub favorites: Favorites,
    pub copy_count: u32,
    pub history: HistoryLog,
}

impl LedgerSnapshot {
    #[must_use]
    pub fn favorite_count(&self) -> usize {
        self.favorites.len()
    }
}

/// In-memory state mirrored to the persistent store.
pub struct Ledger<S> {
    store: PersistentStore<S>,
    state: Mutex<LedgerSnapshot>,
    new_item: TransientFlag,
}

impl<S: KeyValueStore> Ledger<S> {
    /// Load every key from `store`, defaulting what is absent or unreadable.
    ///
    /// A stored favorite count that disagrees with the stored favorite set is
    /// replaced by the set's size.
    #[tracing::instrument(skip(store))]
    pub fn load(store: PersistentStore<S>) -> Self {
        let favorites: Favorites = store.get_or_else(keys::FAVORITES, Favorites::new);
        let stored_count: Option<usize> = store.get_or(keys::FAVORITE_COUNT, None);
        let drifted = match stored_count {
            Some(stored) => stored != favorites.len(),
            None => !favorites.is_empty(),
        };
        if drifted {
            if stored_count.is_some() {
                tracing::warn!(
                    stored = ?stored_count,
                    actual = favorites.len(),
                    "favorite count out of sync with favorite set, repairing"
                );
            }
            store.set(keys::FAVORITE_COUNT, &favorites.len());
        }

        let snapshot = LedgerSnapshot {
            credit: store.get_or_else(keys::CREDIT, CreditBalance::default),
            favorites,
            copy_count: store.get_or(keys::COPY_COUNT, INITIAL_COPY_COUNT),
            history: store.get_or_else(keys::CALL_HISTORY, HistoryLog::new),
        };
        tracing::debug!(
            credit = snapshot.credit.amount(),
            favorites = snapshot.favorites.len(),
            copies = snapshot.copy_count,
            history = snapshot.history.len(),
            "ledger loaded"
        );

        Self {
            store,
            state: Mutex::new(snapshot),
            new_item: TransientFlag::new(),
        }
    }

    fn state(&self) -> MutexGuard<'_, LedgerSnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Take [`CALL_COST`] off the credit balance.
    ///
    /// # Errors
    ///
    /// Returns [`HelplineError::InsufficientCredit`] when the balance is
    /// below the call cost; nothing is changed or persisted in that case.
    pub fn deduct_for_call(&self) -> Result<CreditBalance, HelplineError> {
        let mut state = self.state();
        state.credit.try_spend(CALL_COST)?;
        self.store.set(keys::CREDIT, &state.credit);
        tracing::debug!(credit = state.credit.amount(), "call cost deducted");
        Ok(state.credit)
    }

    /// Prepend a call to the history, stamped with the current time, and
    /// raise the "new item" flag.
    pub fn record_history(&self, service_name: &str, number: &str) -> HistoryItem {
        let item = {
            let mut state = self.state();
            let item = state
                .history
                .push(HistoryItem::new(service_name, number, now()))
                .clone();
            self.store.set(keys::CALL_HISTORY, &state.history);
            item
        };
        self.new_item.raise_for(TRANSIENT_DURATION);
        tracing::debug!(service = service_name, number, "call recorded");
        item
    }

    /// Add `number` to the favorites, or remove it when already present.
    pub fn toggle_favorite(&self, service_name: &str, number: &str) -> FavoriteState {
        let mut state = self.state();
        let result = state
            .favorites
            .toggle(FavoriteEntry::new(service_name, number));
        self.store.set(keys::FAVORITES, &state.favorites);
        self.store.set(keys::FAVORITE_COUNT, &state.favorites.len());
        tracing::debug!(number, ?result, count = state.favorites.len(), "favorite toggled");
        result
    }

    /// Count one more successful copy and return the new total.
    pub fn increment_copy_count(&self) -> u32 {
        let mut state = self.state();
        state.copy_count = state.copy_count.saturating_add(1);
        self.store.set(keys::COPY_COUNT, &state.copy_count);
        tracing::debug!(copies = state.copy_count, "copy counted");
        state.copy_count
    }

    /// Empty the call history. Counters and favorites are left alone.
    pub fn clear_history(&self) {
        let mut state = self.state();
        state.history.clear();
        self.store.remove(keys::CALL_HISTORY);
        tracing::debug!("call history cleared");
    }

    #[must_use]
    pub fn snapshot(&self) -> LedgerSnapshot {
        self.state().clone()
    }

    #[must_use]
    pub fn credit(&self) -> CreditBalance {
        self.state().credit
    }

    #[must_use]
    pub fn is_favorite(&self, number: &str) -> bool {
        self.state().favorites.contains(number)
    }

    /// Flag raised for a few seconds after each recorded call.
    #[must_use]
    pub fn new_item_flag(&self) -> &TransientFlag {
        &self.new_item
    }

    /// Borrow the backing store.
    pub fn store(&self) -> &PersistentStore<S> {
        &self.store
    }
}
