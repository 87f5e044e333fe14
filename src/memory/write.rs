/* src/memory/write.rs */

use std::cell::{Cell, RefCell};
use std::sync::Arc;
use std::sync::atomic::Ordering;

use super::MemoryStore;
use crate::resource::{Metadata, Resource, validate_name};
use crate::{Result, StorageError};

impl<T: Resource> MemoryStore<T> {
	/// Adds a new resource, stamping it with a fresh revision.
	pub fn insert(&self, resource: T) -> Result<T> {
		validate_name::<T>(resource.name())?;
		let name = resource.name().to_string();

		// The existence check runs inside rcu so it sees the map being replaced.
		let conflict = Cell::new(false);
		let stamped: RefCell<Option<Arc<T>>> = RefCell::new(None);

		self.inner.rcu(|map| {
			conflict.set(map.contains_key(&name));
			if conflict.get() {
				return Arc::clone(map);
			}
			let value = self.stamp_once(&stamped, &resource);
			let mut new_map = (**map).clone();
			new_map.insert(name.clone(), value);
			Arc::new(new_map)
		});

		if conflict.get() {
			return Err(StorageError::already_exists(T::KIND, name));
		}
		Ok((*self.stamp_once(&stamped, &resource)).clone())
	}

	/// Replaces an existing resource, stamping it with a fresh revision.
	pub fn replace(&self, resource: T) -> Result<T> {
		let name = resource.name().to_string();
		let missing = Cell::new(false);
		let stamped: RefCell<Option<Arc<T>>> = RefCell::new(None);

		self.inner.rcu(|map| {
			missing.set(!map.contains_key(&name));
			if missing.get() {
				return Arc::clone(map);
			}
			let value = self.stamp_once(&stamped, &resource);
			let mut new_map = (**map).clone();
			new_map.insert(name.clone(), value);
			Arc::new(new_map)
		});

		if missing.get() {
			return Err(StorageError::not_found(T::KIND, name));
		}
		Ok((*self.stamp_once(&stamped, &resource)).clone())
	}

	/// Removes a resource by name, returning the removed value.
	pub fn remove(&self, name: &str) -> Result<Arc<T>> {
		// Pre-check to avoid an unnecessary clone in rcu.
		if !self.inner.load().contains_key(name) {
			return Err(StorageError::not_found(T::KIND, name));
		}

		let removed: RefCell<Option<Arc<T>>> = RefCell::new(None);

		self.inner.rcu(|map| {
			*removed.borrow_mut() = map.get(name).cloned();
			if removed.borrow().is_none() {
				return Arc::clone(map);
			}
			let mut new_map = (**map).clone();
			new_map.remove(name);
			Arc::new(new_map)
		});

		// None here means another writer removed it after the pre-check.
		removed
			.into_inner()
			.ok_or_else(|| StorageError::not_found(T::KIND, name))
	}

	/// Stamps `resource` the first time a write reaches the point of success.
	///
	/// A revision is only taken from the counter once the conflict check has
	/// passed; rcu retries reuse it. A write that loses a race after that point
	/// still leaves a gap in the sequence.
	fn stamp_once(&self, stamped: &RefCell<Option<Arc<T>>>, resource: &T) -> Arc<T> {
		Arc::clone(stamped.borrow_mut().get_or_insert_with(|| {
			let version = self.version.fetch_add(1, Ordering::SeqCst) + 1;
			let mut resource = resource.clone();
			resource.set_metadata(Metadata::with_version(version));
			Arc::new(resource)
		}))
	}
}
