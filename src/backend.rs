/* src/backend.rs */

//!
//! Contracts a backing store must provide.

use std::sync::Arc;

use async_trait::async_trait;

use crate::Result;
use crate::resource::{Upstream, VirtualHost};

/// CRUD access to one collection of named resources.
///
/// Implementations must make `list()` atomic with respect to concurrent
/// writes: a caller sees the collection either before or after a write,
/// never a partially applied one.
#[async_trait]
pub trait ResourceStore<T>: Send + Sync {
	/// Persists a new resource. Fails with `AlreadyExists` on a name collision.
	async fn create(&self, resource: T) -> Result<T>;

	/// Replaces an existing resource. Fails with `NotFound` if absent.
	async fn update(&self, resource: T) -> Result<T>;

	/// Removes a resource. Fails with `NotFound` if absent.
	async fn delete(&self, name: &str) -> Result<()>;

	async fn get(&self, name: &str) -> Result<T>;

	/// Returns the current snapshot. An empty collection yields an empty vec.
	async fn list(&self) -> Result<Vec<T>>;
}

/// A storage backend providing both resource collections.
#[async_trait]
pub trait Backend: Send + Sync {
	/// One-time preparation of storage locations. Must be idempotent.
	async fn register(&self) -> Result<()>;

	fn upstreams(&self) -> Arc<dyn ResourceStore<Upstream>>;

	fn virtual_hosts(&self) -> Arc<dyn ResourceStore<VirtualHost>>;
}
