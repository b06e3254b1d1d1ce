//! Interaction handlers — the use-cases behind each button on the page.
//!
//! Each handler validates against the ledger, asks the user where a
//! confirmation is required, commits through the ledger and then has the
//! view synchronizer redraw what changed.
//!
//! A call attempt moves through
//! `Idle -> PendingConfirm -> {Committed | Cancelled}`, and a committed
//! attempt ends either with the call recorded or rejected for lack of
//! credit.

use std::sync::Arc;

use helpline_domain::credit::CALL_COST;
use helpline_domain::favorite::FavoriteState;
use helpline_domain::history::HistoryItem;
use helpline_domain::service::ServiceCard;

use crate::ledger::Ledger;
use crate::ports::{Clipboard, KeyValueStore, UserPrompt, ViewSurface};
use crate::view_sync::ViewSynchronizer;

/// Terminal state of a call attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    /// Credit was deducted and the call is in the history.
    Placed(HistoryItem),
    /// The user declined the confirmation.
    Cancelled,
    /// Not enough credit; nothing changed.
    Rejected,
}

/// Result of a copy attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// No clipboard mechanism worked; the counter was not touched.
    Failed,
}

/// Result of the clear-history action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    Cleared,
    Cancelled,
}

fn insufficient_credit_message() -> String {
    format!("Insufficient coins! You need at least {CALL_COST} coins to make a call.")
}

/// Use-cases triggered by the page's buttons.
pub struct InteractionHandlers<S, P, C, V> {
    ledger: Arc<Ledger<S>>,
    prompt: P,
    clipboard: C,
    view: ViewSynchronizer<S, V>,
}

impl<S, P, C, V> InteractionHandlers<S, P, C, V>
where
    S: KeyValueStore,
    P: UserPrompt,
    C: Clipboard,
    V: ViewSurface + Send + Sync + 'static,
{
    pub fn new(
        ledger: Arc<Ledger<S>>,
        prompt: P,
        clipboard: C,
        view: ViewSynchronizer<S, V>,
    ) -> Self {
        Self {
            ledger,
            prompt,
            clipboard,
            view,
        }
    }

    #[must_use]
    pub fn ledger(&self) -> &Arc<Ledger<S>> {
        &self.ledger
    }

    #[must_use]
    pub fn view(&self) -> &ViewSynchronizer<S, V> {
        &self.view
    }

    /// Place a call to `card` after the user confirms the cost.
    ///
    /// With too little credit the user is told so and no confirmation is
    /// asked. Cancelling at the confirmation changes nothing.
    #[tracing::instrument(skip(self, card), fields(service = %card.service_name, number = %card.number))]
    pub fn place_call(&self, card: &ServiceCard) -> CallOutcome {
        if !self.ledger.credit().covers(CALL_COST) {
            tracing::info!("call rejected before confirmation, credit too low");
            self.prompt.alert(&insufficient_credit_message());
            return CallOutcome::Rejected;
        }

        let question = format!(
            "Call {} at {}?\nThis will cost {CALL_COST} coins.",
            card.service_name, card.number
        );
        if !self.prompt.confirm(&question) {
            tracing::debug!("call cancelled by user");
            return CallOutcome::Cancelled;
        }

        // Credit may have been spent while the confirmation was open.
        if let Err(err) = self.ledger.deduct_for_call() {
            tracing::info!(%err, "call rejected at commit");
            self.prompt.alert(&insufficient_credit_message());
            return CallOutcome::Rejected;
        }

        let item = self.ledger.record_history(&card.service_name, &card.number);
        self.view.render_history();
        self.view.render_counters();
        self.view.render_new_indicator();
        self.view.show_transient_notice(&format!(
            "Calling {} at {}...",
            card.service_name, card.number
        ));
        tracing::info!("call placed");
        CallOutcome::Placed(item)
    }

    /// Copy `card`'s number to the clipboard.
    ///
    /// The copy counter is incremented only after the clipboard write
    /// resolved, exactly once, and never when every mechanism failed.
    #[tracing::instrument(skip(self, card), fields(service = %card.service_name, number = %card.number))]
    pub async fn copy_number(&self, card: &ServiceCard) -> CopyOutcome {
        if let Err(err) = self.clipboard.write_text(&card.number).await {
            tracing::warn!(%err, mechanism = self.clipboard.mechanism(), "copy failed");
            self.prompt.alert(&format!(
                "Could not copy {} number {} to the clipboard. Please copy it manually.",
                card.service_name, card.number
            ));
            return CopyOutcome::Failed;
        }

        self.ledger.increment_copy_count();
        self.view.render_counters();
        self.view.show_transient_notice(&format!(
            "{} number {} copied to clipboard!",
            card.service_name, card.number
        ));
        CopyOutcome::Copied
    }

    /// Add or remove `card` from the favorites. Always succeeds.
    #[tracing::instrument(skip(self, card), fields(number = %card.number))]
    pub fn toggle_favorite(&self, card: &ServiceCard) -> FavoriteState {
        let state = self
            .ledger
            .toggle_favorite(&card.service_name, &card.number);
        self.view.render_marker(&card.number);
        self.view.render_counters();
        state
    }

    /// Empty the call history after the user confirms.
    #[tracing::instrument(skip(self))]
    pub fn clear_history(&self) -> ClearOutcome {
        if !self.prompt.confirm("Clear all call history?") {
            return ClearOutcome::Cancelled;
        }
        self.ledger.clear_history();
        self.view.render_history();
        self.view.show_transient_notice("Call history cleared!");
        ClearOutcome::Cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::FallbackClipboard;
    use crate::ports::{CounterSlot, FavoriteMarker, HistoryRegion};
    use crate::store::{MemoryStore, PersistentStore, keys};
    use crate::testing::{FakeClipboard, FakePage, ScriptedPrompt};
    use crate::view_sync::{EMPTY_HISTORY_MESSAGE, FavoriteToggle};
    use helpline_domain::id::ElementId;
    use proptest::prelude::*;

    type Handlers<C> = InteractionHandlers<MemoryStore, ScriptedPrompt, C, FakePage>;

    fn police() -> ServiceCard {
        ServiceCard::builder()
            .service_name("Police")
            .number("100")
            .build()
            .unwrap()
    }

    fn handlers_with<C: Clipboard>(medium: MemoryStore, prompt: ScriptedPrompt, clipboard: C) -> Handlers<C> {
        let ledger = Arc::new(Ledger::load(PersistentStore::new(medium)));
        let view = ViewSynchronizer::new(
            Arc::clone(&ledger),
            Arc::new(FakePage::default()),
            vec![FavoriteToggle {
                element: ElementId::new("fav-100"),
                number: "100".to_string(),
            }],
        );
        InteractionHandlers::new(ledger, prompt, clipboard, view)
    }

    fn handlers(answers: &[bool]) -> Handlers<FakeClipboard> {
        handlers_with(
            MemoryStore::new(),
            ScriptedPrompt::answering(answers),
            FakeClipboard::working("api"),
        )
    }

    #[test]
    fn should_place_call_when_confirmed() {
        let h = handlers(&[true]);

        let outcome = h.place_call(&police());

        let CallOutcome::Placed(item) = outcome else {
            panic!("expected placed call, got {outcome:?}");
        };
        assert_eq!(item.service_name, "Police");
        let snap = h.ledger().snapshot();
        assert_eq!(snap.credit.amount(), 80);
        assert_eq!(snap.history.newest(), Some(&item));
        assert_eq!(
            h.prompt.confirms(),
            ["Call Police at 100?\nThis will cost 20 coins."]
        );
        let page = h.view().surface();
        assert_eq!(page.counter(CounterSlot::Credit).as_deref(), Some("80"));
        assert!(matches!(page.history(), Some(HistoryRegion::Rows(rows)) if rows.len() == 1));
        assert!(page.new_indicator());
        assert_eq!(page.notice_texts(), ["Calling Police at 100..."]);
    }

    #[test]
    fn should_do_nothing_when_call_cancelled() {
        let h = handlers(&[false]);
        assert_eq!(h.place_call(&police()), CallOutcome::Cancelled);
        let snap = h.ledger().snapshot();
        assert_eq!(snap.credit.amount(), 100);
        assert!(snap.history.is_empty());
        assert!(h.prompt.alerts().is_empty());
        assert!(h.view().surface().notices().is_empty());
    }

    #[test]
    fn should_reject_call_without_asking_when_credit_low() {
        let h = handlers_with(
            MemoryStore::with_items([(keys::CREDIT, "10")]),
            ScriptedPrompt::answering(&[true]),
            FakeClipboard::working("api"),
        );

        assert_eq!(h.place_call(&police()), CallOutcome::Rejected);

        assert!(h.prompt.confirms().is_empty());
        assert_eq!(
            h.prompt.alerts(),
            ["Insufficient coins! You need at least 20 coins to make a call."]
        );
        assert_eq!(h.ledger().credit().amount(), 10);
    }

    /// Spends the caller's credit while the confirmation is open.
    struct SpendingPrompt {
        ledger: Arc<Ledger<MemoryStore>>,
        alerts: ScriptedPrompt,
    }

    impl UserPrompt for SpendingPrompt {
        fn confirm(&self, _message: &str) -> bool {
            while self.ledger.deduct_for_call().is_ok() {}
            true
        }

        fn alert(&self, message: &str) {
            self.alerts.alert(message);
        }
    }

    #[test]
    fn should_reject_call_when_credit_is_gone_at_commit() {
        let medium = MemoryStore::with_items([(keys::CREDIT, "30")]);
        let ledger = Arc::new(Ledger::load(PersistentStore::new(medium)));
        let view = ViewSynchronizer::new(Arc::clone(&ledger), Arc::new(FakePage::default()), Vec::new());
        let prompt = SpendingPrompt {
            ledger: Arc::clone(&ledger),
            alerts: ScriptedPrompt::default(),
        };
        let h = InteractionHandlers::new(ledger, prompt, FakeClipboard::working("api"), view);

        assert_eq!(h.place_call(&police()), CallOutcome::Rejected);

        assert_eq!(
            h.prompt.alerts.alerts(),
            ["Insufficient coins! You need at least 20 coins to make a call."]
        );
        let snap = h.ledger().snapshot();
        assert_eq!(snap.credit.amount(), 10);
        assert!(snap.history.is_empty());
        assert!(h.view().surface().notices().is_empty());
    }

    #[test]
    fn should_keep_ten_most_recent_after_eleven_calls() {
        let h = handlers_with(
            MemoryStore::with_items([(keys::CREDIT, "1000")]),
            ScriptedPrompt::answering(&[true; 11]),
            FakeClipboard::working("api"),
        );
        let mut placed = Vec::new();
        for _ in 0..11 {
            let CallOutcome::Placed(item) = h.place_call(&police()) else {
                panic!("call should succeed");
            };
            placed.push(item);
        }
        let snap = h.ledger().snapshot();
        assert_eq!(snap.credit.amount(), 1000 - 11 * 20);
        assert_eq!(snap.history.len(), 10);
        let kept: Vec<&HistoryItem> = snap.history.iter().collect();
        let expected: Vec<&HistoryItem> = placed[1..].iter().rev().collect();
        assert_eq!(kept, expected);
    }

    #[tokio::test]
    async fn should_increment_copy_count_once_when_primary_works() {
        let h = handlers(&[]);
        assert_eq!(h.copy_number(&police()).await, CopyOutcome::Copied);
        assert_eq!(h.ledger().snapshot().copy_count, 3);
        assert_eq!(h.clipboard.contents().as_deref(), Some("100"));
        assert_eq!(
            h.view().surface().counter(CounterSlot::Copies).as_deref(),
            Some("3 Copy")
        );
        assert_eq!(
            h.view().surface().notice_texts(),
            ["Police number 100 copied to clipboard!"]
        );
    }

    #[tokio::test]
    async fn should_increment_copy_count_once_when_fallback_used() {
        let h = handlers_with(
            MemoryStore::new(),
            ScriptedPrompt::default(),
            FallbackClipboard::new(FakeClipboard::broken("api"), FakeClipboard::working("legacy")),
        );
        assert_eq!(h.copy_number(&police()).await, CopyOutcome::Copied);
        assert_eq!(h.ledger().snapshot().copy_count, 3);
    }

    #[tokio::test]
    async fn should_surface_failure_when_no_clipboard_works() {
        let h = handlers_with(
            MemoryStore::new(),
            ScriptedPrompt::default(),
            FallbackClipboard::new(FakeClipboard::broken("api"), FakeClipboard::broken("legacy")),
        );
        assert_eq!(h.copy_number(&police()).await, CopyOutcome::Failed);
        assert_eq!(h.ledger().snapshot().copy_count, 2);
        assert_eq!(h.prompt.alerts().len(), 1);
        assert!(h.view().surface().notices().is_empty());
    }

    #[test]
    fn should_toggle_marker_and_counter() {
        let h = handlers(&[]);
        assert_eq!(h.toggle_favorite(&police()), FavoriteState::Added);
        assert_eq!(h.view().surface().marker("fav-100"), Some(FavoriteMarker::Favorited));
        assert_eq!(
            h.view().surface().counter(CounterSlot::Favorites).as_deref(),
            Some("1")
        );

        assert_eq!(h.toggle_favorite(&police()), FavoriteState::Removed);
        assert_eq!(h.view().surface().marker("fav-100"), Some(FavoriteMarker::Unfavorited));
        assert_eq!(
            h.view().surface().counter(CounterSlot::Favorites).as_deref(),
            Some("0")
        );
    }

    #[test]
    fn should_clear_history_when_confirmed() {
        let h = handlers(&[true, true]);
        h.place_call(&police());
        h.toggle_favorite(&police());

        assert_eq!(h.clear_history(), ClearOutcome::Cleared);

        let snap = h.ledger().snapshot();
        assert!(snap.history.is_empty());
        assert_eq!(snap.credit.amount(), 80);
        assert_eq!(snap.favorite_count(), 1);
        assert_eq!(
            h.view().surface().history(),
            Some(HistoryRegion::Empty {
                message: EMPTY_HISTORY_MESSAGE
            })
        );
        assert!(
            h.view()
                .surface()
                .notice_texts()
                .contains(&"Call history cleared!".to_string())
        );
    }

    #[test]
    fn should_keep_history_when_clear_cancelled() {
        let h = handlers(&[true, false]);
        h.place_call(&police());
        assert_eq!(h.clear_history(), ClearOutcome::Cancelled);
        assert_eq!(h.ledger().snapshot().history.len(), 1);
    }

    proptest! {
        #[test]
        fn call_with_low_credit_never_mutates(credit in 0_u32..20, answer in any::<bool>()) {
            let h = handlers_with(
                MemoryStore::with_items([(keys::CREDIT, credit.to_string())]),
                ScriptedPrompt::answering(&[answer]),
                FakeClipboard::working("api"),
            );
            let before = h.ledger().snapshot();

            prop_assert_eq!(h.place_call(&police()), CallOutcome::Rejected);

            let after = h.ledger().snapshot();
            prop_assert_eq!(after.credit, before.credit);
            prop_assert_eq!(after.history, before.history);
        }
    }
}
