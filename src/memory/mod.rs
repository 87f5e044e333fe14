/* src/memory/mod.rs */

//!
//! In-memory backend.
//!
//! Each collection is an immutable map swapped atomically on every write
//! (read-copy-update), so `list()` always observes a whole snapshot.

mod read;
mod write;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use arc_swap::ArcSwap;
use async_trait::async_trait;

use crate::Result;
use crate::backend::{Backend, ResourceStore};
use crate::resource::{Resource, Upstream, VirtualHost};

/// Thread-safe collection of one resource kind, keyed by name.
pub struct MemoryStore<T> {
	pub(crate) inner: ArcSwap<BTreeMap<String, Arc<T>>>,
	pub(crate) version: Arc<AtomicU64>,
}

impl<T: Resource> MemoryStore<T> {
	pub fn new() -> Self {
		Self::with_version_counter(Arc::new(AtomicU64::new(0)))
	}

	/// Creates a store drawing revisions from a shared counter.
	pub(crate) fn with_version_counter(version: Arc<AtomicU64>) -> Self {
		Self {
			inner: ArcSwap::from_pointee(BTreeMap::new()),
			version,
		}
	}
}

impl<T: Resource> Default for MemoryStore<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: Resource> std::fmt::Debug for MemoryStore<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MemoryStore")
			.field("kind", &T::KIND)
			.field("len", &self.len())
			.finish()
	}
}

#[async_trait]
impl<T: Resource> ResourceStore<T> for MemoryStore<T> {
	async fn create(&self, resource: T) -> Result<T> {
		self.insert(resource)
	}

	async fn update(&self, resource: T) -> Result<T> {
		self.replace(resource)
	}

	async fn delete(&self, name: &str) -> Result<()> {
		self.remove(name).map(|_| ())
	}

	async fn get(&self, name: &str) -> Result<T> {
		self.get_value(name)
			.map(|value| (*value).clone())
			.ok_or_else(|| crate::StorageError::not_found(T::KIND, name))
	}

	async fn list(&self) -> Result<Vec<T>> {
		Ok(self.values())
	}
}

/// Backend keeping both collections in process memory.
///
/// Revisions are drawn from one counter shared by both collections.
#[derive(Debug, Clone)]
pub struct MemoryBackend {
	upstreams: Arc<MemoryStore<Upstream>>,
	virtual_hosts: Arc<MemoryStore<VirtualHost>>,
}

impl MemoryBackend {
	pub fn new() -> Self {
		let version = Arc::new(AtomicU64::new(0));
		Self {
			upstreams: Arc::new(MemoryStore::with_version_counter(version.clone())),
			virtual_hosts: Arc::new(MemoryStore::with_version_counter(version)),
		}
	}
}

impl Default for MemoryBackend {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl Backend for MemoryBackend {
	async fn register(&self) -> Result<()> {
		Ok(())
	}

	fn upstreams(&self) -> Arc<dyn ResourceStore<Upstream>> {
		self.upstreams.clone()
	}

	fn virtual_hosts(&self) -> Arc<dyn ResourceStore<VirtualHost>> {
		self.virtual_hosts.clone()
	}
}
