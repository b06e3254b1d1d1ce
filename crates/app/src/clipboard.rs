//! Clipboard composition — a primary mechanism with a fallback behind it.

use std::future::Future;

use helpline_domain::error::{ClipboardError, HelplineError};

use crate::ports::Clipboard;

/// Tries `primary`, then `fallback`. Callers only see the combined result.
pub struct FallbackClipboard<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> FallbackClipboard<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P, F> Clipboard for FallbackClipboard<P, F>
where
    P: Clipboard + Sync,
    F: Clipboard + Sync,
{
    fn mechanism(&self) -> &'static str {
        self.primary.mechanism()
    }

    fn write_text(&self, text: &str) -> impl Future<Output = Result<(), HelplineError>> + Send {
        async move {
            let Err(err) = self.primary.write_text(text).await else {
                return Ok(());
            };
            tracing::warn!(
                %err,
                primary = self.primary.mechanism(),
                fallback = self.fallback.mechanism(),
                "primary clipboard failed, trying fallback"
            );
            match self.fallback.write_text(text).await {
                Ok(()) => Ok(()),
                Err(err) => {
                    tracing::warn!(%err, fallback = self.fallback.mechanism(), "fallback clipboard failed");
                    Err(ClipboardError::Unavailable.into())
                }
            }
        }
    }
}

/// An absent mechanism always fails, so `Option<C>` can stand in for a
/// fallback that was disabled in configuration.
impl<C: Clipboard + Sync> Clipboard for Option<C> {
    fn mechanism(&self) -> &'static str {
        self.as_ref().map_or("none", Clipboard::mechanism)
    }

    fn write_text(&self, text: &str) -> impl Future<Output = Result<(), HelplineError>> + Send {
        async move {
            match self {
                Some(inner) => inner.write_text(text).await,
                None => Err(ClipboardError::Unavailable.into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeClipboard;

    #[tokio::test]
    async fn should_use_primary_when_it_works() {
        let clipboard = FallbackClipboard::new(FakeClipboard::working("api"), FakeClipboard::working("legacy"));
        clipboard.write_text("999").await.unwrap();
        assert_eq!(clipboard.primary.contents().as_deref(), Some("999"));
        assert_eq!(clipboard.fallback.attempts(), 0);
    }

    #[tokio::test]
    async fn should_use_fallback_when_primary_fails() {
        let clipboard = FallbackClipboard::new(FakeClipboard::broken("api"), FakeClipboard::working("legacy"));
        clipboard.write_text("999").await.unwrap();
        assert_eq!(clipboard.primary.attempts(), 1);
        assert_eq!(clipboard.fallback.contents().as_deref(), Some("999"));
    }

    #[tokio::test]
    async fn should_report_unavailable_when_both_fail() {
        let clipboard = FallbackClipboard::new(FakeClipboard::broken("api"), FakeClipboard::broken("legacy"));
        let result = clipboard.write_text("999").await;
        assert!(matches!(
            result,
            Err(HelplineError::Clipboard(ClipboardError::Unavailable))
        ));
    }

    #[tokio::test]
    async fn should_fail_when_fallback_disabled() {
        let clipboard = FallbackClipboard::new(FakeClipboard::broken("api"), None::<FakeClipboard>);
        assert!(clipboard.write_text("999").await.is_err());
        assert_eq!(clipboard.fallback.mechanism(), "none");
    }
}
