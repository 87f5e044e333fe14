/* src/memory/read.rs */

use std::collections::BTreeMap;
use std::sync::Arc;

use super::MemoryStore;
use crate::resource::Resource;

impl<T: Resource> MemoryStore<T> {
	/// Gets a resource by name. This is a wait-free operation.
	pub fn get_value(&self, name: &str) -> Option<Arc<T>> {
		let snapshot = self.inner.load();
		snapshot.get(name).map(Arc::clone)
	}

	/// Returns an atomic snapshot of the whole collection.
	pub fn snapshot(&self) -> Arc<BTreeMap<String, Arc<T>>> {
		self.inner.load_full()
	}

	/// Returns all resources in name order.
	pub fn values(&self) -> Vec<T> {
		let snapshot = self.inner.load();
		snapshot.values().map(|value| (**value).clone()).collect()
	}

	pub fn len(&self) -> usize {
		self.inner.load().len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.load().is_empty()
	}
}
