//! Clipboard port — writing a phone number to the system clipboard.

use std::future::Future;

use helpline_domain::error::HelplineError;

/// A way of putting text on the system clipboard.
///
/// Writes may suspend; callers must not assume ordering relative to other
/// events that happen while the write is pending.
pub trait Clipboard {
    /// Short name used in logs (e.g. `"wl-copy"`, `"osc52"`).
    fn mechanism(&self) -> &'static str;

    /// Copy `text` to the clipboard.
    ///
    /// # Errors
    ///
    /// Returns [`HelplineError::Clipboard`] when the mechanism is unavailable
    /// or the write failed.
    fn write_text(&self, text: &str) -> impl Future<Output = Result<(), HelplineError>> + Send;
}

impl<T: Clipboard + Send + Sync> Clipboard for std::sync::Arc<T> {
    fn mechanism(&self) -> &'static str {
        (**self).mechanism()
    }

    fn write_text(&self, text: &str) -> impl Future<Output = Result<(), HelplineError>> + Send {
        (**self).write_text(text)
    }
}
