/* src/storage.rs */

//!
//! Storage root aggregating both resource facades.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::backend::Backend;
use crate::facade::{Resources, Upstreams, VirtualHosts};
use crate::retry::RetryPolicy;
use crate::watch::WatchConfig;
use crate::{Result, StorageError};

/// Entry point to the upstream and virtual host collections of one backend.
///
/// Call [`register`](Storage::register) once before using the facades.
///
/// # Clone Semantics
///
/// Clones share the backend and the registration state.
#[derive(Clone)]
pub struct Storage {
	backend: Arc<dyn Backend>,
	config: WatchConfig,
	registered: Arc<AtomicBool>,
}

/// Builder for [`Storage`].
pub struct StorageBuilder {
	backend: Arc<dyn Backend>,
	config: WatchConfig,
}

impl StorageBuilder {
	pub fn new(backend: impl Backend + 'static) -> Self {
		Self {
			backend: Arc::new(backend),
			config: WatchConfig::default(),
		}
	}

	pub fn watch_config(mut self, config: WatchConfig) -> Self {
		self.config = config;
		self
	}

	pub fn poll_interval(mut self, interval: Duration) -> Self {
		self.config.poll_interval = interval;
		self
	}

	pub fn retry(mut self, retry: RetryPolicy) -> Self {
		self.config.retry = retry;
		self
	}

	pub fn build(self) -> Storage {
		Storage {
			backend: self.backend,
			config: self.config,
			registered: Arc::new(AtomicBool::new(false)),
		}
	}
}

impl Storage {
	pub fn new(backend: impl Backend + 'static) -> Self {
		StorageBuilder::new(backend).build()
	}

	pub fn builder(backend: impl Backend + 'static) -> StorageBuilder {
		StorageBuilder::new(backend)
	}

	/// Storage backed by process memory.
	#[cfg(feature = "memory")]
	pub fn in_memory() -> Self {
		Self::new(crate::memory::MemoryBackend::new())
	}

	/// Storage backed by files under `config.root`.
	#[cfg(feature = "fs")]
	pub fn on_disk(config: crate::fs::FileConfig) -> Self {
		Self::new(crate::fs::FileBackend::new(config))
	}

	/// Prepares the backend. Safe to call again once it has succeeded.
	///
	/// Any failure is reported as `InitializationFailed` and is not retried.
	pub async fn register(&self) -> Result<()> {
		self.config
			.retry
			.once(self.backend.register())
			.await
			.map_err(|e| match e {
				StorageError::InitializationFailed(_) => e,
				other => StorageError::InitializationFailed(other.to_string()),
			})?;

		if !self.registered.swap(true, Ordering::SeqCst) {
			tracing::info!("storage registered");
		}
		Ok(())
	}

	pub fn is_registered(&self) -> bool {
		self.registered.load(Ordering::SeqCst)
	}

	/// The upstream collection.
	///
	/// Precondition: [`register`](Storage::register) has succeeded. Using the
	/// facade of an unregistered backend is a caller error; debug builds
	/// assert on it.
	pub fn upstreams(&self) -> Upstreams {
		debug_assert!(self.is_registered(), "Storage::register() must succeed before upstreams()");
		Resources::new(self.backend.upstreams(), self.config.clone())
	}

	/// The virtual host collection. Same precondition as [`upstreams`](Storage::upstreams).
	pub fn virtual_hosts(&self) -> VirtualHosts {
		debug_assert!(
			self.is_registered(),
			"Storage::register() must succeed before virtual_hosts()"
		);
		Resources::new(self.backend.virtual_hosts(), self.config.clone())
	}

	pub fn watch_config(&self) -> &WatchConfig {
		&self.config
	}
}

impl std::fmt::Debug for Storage {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Storage")
			.field("config", &self.config)
			.field("registered", &self.is_registered())
			.finish_non_exhaustive()
	}
}
