//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod clipboard;
pub mod locator;
pub mod prompt;
pub mod storage;
pub mod view;

pub use clipboard::Clipboard;
pub use locator::{ElementLocator, LocatedElement, TriggerRole};
pub use prompt::UserPrompt;
pub use storage::KeyValueStore;
pub use view::{CounterSlot, FavoriteMarker, HistoryRegion, HistoryRow, ViewSurface};
