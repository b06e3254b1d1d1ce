//! Session — one running directory page: ledger, bindings, handlers and view.
//!
//! Replaces a global application object: everything the page needs is
//! passed in, so several isolated sessions can coexist (e.g. in tests).

use std::sync::Arc;

use tokio::task::JoinHandle;

use helpline_domain::error::{HelplineError, NotFoundError};
use helpline_domain::favorite::FavoriteState;
use helpline_domain::id::ElementId;

use crate::bindings::{Binding, Bindings};
use crate::handlers::{CallOutcome, ClearOutcome, CopyOutcome, InteractionHandlers};
use crate::ledger::Ledger;
use crate::ports::{Clipboard, ElementLocator, KeyValueStore, TriggerRole, UserPrompt, ViewSurface};
use crate::store::PersistentStore;
use crate::view_sync::ViewSynchronizer;

/// What activating an element resulted in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Call(CallOutcome),
    Copy(CopyOutcome),
    Favorite(FavoriteState),
    Clear(ClearOutcome),
}

/// A loaded, bound and rendered directory page.
pub struct Session<S, P, C, V> {
    handlers: InteractionHandlers<S, P, C, V>,
    bindings: Bindings,
    indicator_task: Option<JoinHandle<()>>,
}

impl<S, P, C, V> Session<S, P, C, V>
where
    S: KeyValueStore,
    P: UserPrompt,
    C: Clipboard,
    V: ViewSurface + Send + Sync + 'static,
{
    /// Load persisted state, bind the page's elements and render everything.
    pub fn start<L>(medium: S, prompt: P, clipboard: C, surface: Arc<V>, locator: &L) -> Self
    where
        L: ElementLocator + ?Sized,
    {
        let ledger = Arc::new(Ledger::load(PersistentStore::new(medium)));
        let bindings = Bindings::resolve(locator);
        let view = ViewSynchronizer::new(Arc::clone(&ledger), surface, bindings.favorite_toggles());
        view.render_all();
        let indicator_task = view.watch_new_indicator();
        tracing::info!(elements = bindings.len(), "session started");

        Self {
            handlers: InteractionHandlers::new(ledger, prompt, clipboard, view),
            bindings,
            indicator_task,
        }
    }

    /// Run the action bound to `element`.
    ///
    /// # Errors
    ///
    /// Returns [`HelplineError::NotFound`] when no action is bound to
    /// `element`.
    pub async fn activate(&self, element: &ElementId) -> Result<Outcome, HelplineError> {
        let Binding { role, card } = self.bindings.get(element).ok_or_else(|| NotFoundError {
            kind: "Element",
            id: element.to_string(),
        })?;
        tracing::debug!(%element, ?role, "element activated");

        let outcome = match (role, card) {
            (TriggerRole::Call, Some(card)) => Outcome::Call(self.handlers.place_call(card)),
            (TriggerRole::Copy, Some(card)) => Outcome::Copy(self.handlers.copy_number(card).await),
            (TriggerRole::FavoriteToggle, Some(card)) => {
                Outcome::Favorite(self.handlers.toggle_favorite(card))
            }
            (TriggerRole::ClearHistory, _) => Outcome::Clear(self.handlers.clear_history()),
            (_, None) => {
                return Err(NotFoundError {
                    kind: "Card",
                    id: element.to_string(),
                }
                .into());
            }
        };
        Ok(outcome)
    }

    #[must_use]
    pub fn ledger(&self) -> &Ledger<S> {
        self.handlers.ledger()
    }

    #[must_use]
    pub fn handlers(&self) -> &InteractionHandlers<S, P, C, V> {
        &self.handlers
    }

    #[must_use]
    pub fn view(&self) -> &ViewSynchronizer<S, V> {
        self.handlers.view()
    }

    #[must_use]
    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }
}

impl<S, P, C, V> Drop for Session<S, P, C, V> {
    fn drop(&mut self) {
        if let Some(task) = self.indicator_task.take() {
            task.abort();
        }
    }
}
