/* src/lib.rs */

//!
//! Storage and live change feeds for proxy configuration resources.
//!
//! This crate integrates these components:
//!
//! - **resource**: The two resource kinds, [`Upstream`] and [`VirtualHost`].
//! - **backend**: The contract a backing store implements ([`ResourceStore`], [`Backend`]).
//! - **watch**: Polling watch sessions that diff snapshots and fan events out to handlers.
//! - **facade** / **storage**: Typed CRUD + watch access ([`Upstreams`], [`VirtualHosts`])
//!   behind one [`Storage`] root.
//! - **memory**, **fs**: Bundled backends.
//!
//! ## Feature Flags
//!
//! - `full`: Enables all features.
//! - `memory` (default): In-memory backend.
//! - `fs`: File backend (one YAML or JSON file per resource).
//! - `config-serde`: Serialize/Deserialize for configuration types.
//!
//! ## Basic Usage
//!
//! ```ignore
//! let storage = Storage::in_memory();
//! storage.register().await?;
//!
//! let upstreams = storage.upstreams();
//! let watcher = upstreams.watch([EventHandlerFuncs::new()
//!     .with_add(|list: &[Upstream], obj: &Upstream| println!("{} added, {} total", obj.name, list.len()))]);
//!
//! let stop = CancellationToken::new();
//! let handle = watcher.spawn(stop.clone());
//! upstreams.create(Upstream::new("backend", "static")).await?;
//! // ...
//! stop.cancel();
//! handle.join().await?;
//! ```

pub mod backend;
mod error;
pub mod facade;
mod millis;
pub mod resource;
pub mod retry;
pub mod storage;
pub mod watch;

#[cfg(feature = "memory")]
pub mod memory;

#[cfg(feature = "fs")]
pub mod fs;

pub use backend::{Backend, ResourceStore};
pub use error::{Result, StorageError};
pub use facade::{Resources, Upstreams, VirtualHosts};
pub use resource::{Resource, Upstream, VirtualHost};
pub use retry::RetryPolicy;
pub use storage::{Storage, StorageBuilder};
pub use watch::{Event, EventHandler, EventHandlerFuncs, EventKind, WatchConfig, WatchHandle, Watcher};

pub use tokio_util::sync::CancellationToken;
