/* src/watch/mod.rs */

//!
//! Change observation for resource collections.
//!
//! A [`Watcher`] polls a collection, diffs each snapshot against the previous
//! one and hands the resulting [`Event`]s to its handlers through a
//! [`Notifier`]. Within one session every event of a poll cycle reaches every
//! handler before the next cycle starts.

mod config;
mod event;
mod handler;
mod notifier;
mod session;

pub use config::{DEFAULT_POLL_INTERVAL, WatchConfig};
pub use event::{Event, EventKind};
pub use handler::{EventHandler, EventHandlerFuncs, HandlerFn};
pub use notifier::{Notifier, diff};
pub use session::{WatchHandle, Watcher};
