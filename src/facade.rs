/* src/facade.rs */

//!
//! Typed access to one resource collection.

use std::sync::Arc;

use crate::Result;
use crate::backend::ResourceStore;
use crate::resource::{Resource, Upstream, VirtualHost};
use crate::retry::RetryPolicy;
use crate::watch::{EventHandler, Notifier, WatchConfig, Watcher};

/// CRUD and watch access to the collection of one resource kind.
///
/// Cloning is cheap; clones share the same backing collection.
pub struct Resources<T> {
	store: Arc<dyn ResourceStore<T>>,
	config: WatchConfig,
}

/// Facade over the upstream collection.
pub type Upstreams = Resources<Upstream>;

/// Facade over the virtual host collection.
pub type VirtualHosts = Resources<VirtualHost>;

impl<T> Clone for Resources<T> {
	fn clone(&self) -> Self {
		Self {
			store: self.store.clone(),
			config: self.config.clone(),
		}
	}
}

impl<T: Resource> Resources<T> {
	pub fn new(store: Arc<dyn ResourceStore<T>>, config: WatchConfig) -> Self {
		Self { store, config }
	}

	fn policy(&self) -> &RetryPolicy {
		&self.config.retry
	}

	/// Stores a new resource and returns it as stored.
	pub async fn create(&self, resource: T) -> Result<T> {
		let name = resource.name().to_string();
		let stored = self.policy().once(self.store.create(resource)).await?;
		tracing::debug!(kind = T::KIND, name = %name, "created");
		Ok(stored)
	}

	/// Replaces an existing resource and returns it as stored.
	pub async fn update(&self, resource: T) -> Result<T> {
		let name = resource.name().to_string();
		let stored = self.policy().once(self.store.update(resource)).await?;
		tracing::debug!(kind = T::KIND, name = %name, "updated");
		Ok(stored)
	}

	pub async fn delete(&self, name: &str) -> Result<()> {
		self.policy().once(self.store.delete(name)).await?;
		tracing::debug!(kind = T::KIND, name = %name, "deleted");
		Ok(())
	}

	pub async fn get(&self, name: &str) -> Result<T> {
		self.policy().retry(|| self.store.get(name)).await
	}

	/// Returns the current snapshot of the collection.
	pub async fn list(&self) -> Result<Vec<T>> {
		self.policy().retry(|| self.store.list()).await
	}

	/// Sets up a watch session delivering every change to `handlers`, in order.
	///
	/// The returned [`Watcher`] does not poll until it is run.
	pub fn watch<I, H>(&self, handlers: I) -> Watcher<T>
	where
		I: IntoIterator<Item = H>,
		H: EventHandler<T> + 'static,
	{
		let handlers = handlers
			.into_iter()
			.map(|h| Arc::new(h) as Arc<dyn EventHandler<T>>)
			.collect();
		Watcher::new(self.store.clone(), Notifier::new(handlers), self.config.clone())
	}

	pub fn watch_config(&self) -> &WatchConfig {
		&self.config
	}
}

impl<T: Resource> std::fmt::Debug for Resources<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Resources")
			.field("kind", &T::KIND)
			.field("config", &self.config)
			.finish_non_exhaustive()
	}
}
