//! Transient visual state — flags and callbacks that expire on a timer.
//!
//! Timers are fire-and-forget tokio tasks. Expiry is idempotent, so a late
//! timer never undoes a newer state.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;

/// How long transient notices and the "new" badge stay visible.
pub const TRANSIENT_DURATION: Duration = Duration::from_millis(3000);

/// Run `on_expire` once `after` has elapsed.
///
/// Without a tokio runtime the callback never runs; the state it would
/// revert simply stays until replaced.
pub fn expire_after<F>(after: Duration, on_expire: F)
where
    F: FnOnce() + Send + 'static,
{
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(async move {
                tokio::time::sleep(after).await;
                on_expire();
            });
        }
        Err(_) => tracing::debug!("no async runtime, transient state will not expire"),
    }
}

struct FlagInner {
    sender: watch::Sender<bool>,
    generation: AtomicU64,
}

/// Boolean that is raised for a while and then drops back on its own.
///
/// Raising again while raised restarts the window; the earlier timer
/// becomes a no-op.
#[derive(Clone)]
pub struct TransientFlag {
    inner: Arc<FlagInner>,
}

impl Default for TransientFlag {
    fn default() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            inner: Arc::new(FlagInner {
                sender,
                generation: AtomicU64::new(0),
            }),
        }
    }
}

impl TransientFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag for `duration`.
    pub fn raise_for(&self, duration: Duration) {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.sender.send_replace(true);

        let inner = Arc::clone(&self.inner);
        expire_after(duration, move || {
            inner.sender.send_if_modified(|raised| {
                if *raised && inner.generation.load(Ordering::SeqCst) == generation {
                    *raised = false;
                    true
                } else {
                    false
                }
            });
        });
    }

    /// Drop the flag now and cancel any pending expiry.
    pub fn clear(&self) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        self.inner.sender.send_replace(false);
    }

    #[must_use]
    pub fn is_raised(&self) -> bool {
        *self.inner.sender.borrow()
    }

    /// Receive every change of the flag.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.inner.sender.subscribe()
    }
}

impl std::fmt::Debug for TransientFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransientFlag")
            .field("raised", &self.is_raised())
            .finish_non_exhaustive()
    }
}
