//! # helpline-adapter-terminal
//!
//! Terminal front-end for the helpline directory.
//!
//! ## Responsibilities
//! - [`TerminalView`]: the page surface, kept as a screen model and rendered
//!   to text on demand
//! - [`TerminalPrompt`]: `y/N` confirmations and acknowledged alerts over any
//!   line reader/writer pair
//! - [`CommandClipboard`] / [`Osc52Clipboard`]: clipboard mechanisms, a
//!   system command first and an OSC 52 terminal escape behind it
//! - [`DirectoryLocator`]: page elements derived from the configured directory
//!
//! ## Element ids
//!
//! | Element | Id |
//! |---------|----|
//! | Call button of card *n* | `call-n` |
//! | Copy button of card *n* | `copy-n` |
//! | Favorite toggle of card *n* | `fav-n` |
//! | Clear history button | `clear` |
//!
//! Cards are numbered from 1 in directory order.
//!
//! ## Dependency rule
//!
//! Depends on `helpline-app` (port traits) and `helpline-domain` only.

pub mod clipboard;
pub mod error;
pub mod locator;
pub mod prompt;
pub mod view;

pub use clipboard::{CommandClipboard, Osc52Clipboard};
pub use error::TerminalError;
pub use locator::DirectoryLocator;
pub use prompt::TerminalPrompt;
pub use view::TerminalView;
