//! Prompt port — blocking confirm and alert primitives of the page.

/// Modal user interaction surface.
///
/// Both calls block until the user answers; the core invokes them at the
/// two confirmation gates and on the insufficient-credit and error paths.
pub trait UserPrompt {
    /// Ask a yes/no question. `false` means the user cancelled.
    fn confirm(&self, message: &str) -> bool;

    /// Show a message the user has to acknowledge.
    fn alert(&self, message: &str);
}

impl<T: UserPrompt + ?Sized> UserPrompt for std::sync::Arc<T> {
    fn confirm(&self, message: &str) -> bool {
        (**self).confirm(message)
    }

    fn alert(&self, message: &str) {
        (**self).alert(message);
    }
}
