/* tests/common/mod.rs */

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use livestore::{EventHandlerFuncs, EventKind, Resource, ResourceStore, Result, StorageError};

/// One handler invocation as seen by a [`Recorder`].
#[derive(Debug, Clone, PartialEq)]
pub struct Seen {
	pub handler: &'static str,
	pub kind: EventKind,
	pub name: String,
	pub list: Vec<String>,
}

impl Seen {
	pub fn new(handler: &'static str, kind: EventKind, name: &str, list: &[&str]) -> Self {
		Self {
			handler,
			kind,
			name: name.to_string(),
			list: list.iter().map(|s| s.to_string()).collect(),
		}
	}
}

/// Collects handler invocations from any number of handlers, in call order.
#[derive(Clone, Default)]
pub struct Recorder {
	seen: Arc<Mutex<Vec<Seen>>>,
}

impl Recorder {
	pub fn handler<T: Resource>(&self, id: &'static str) -> EventHandlerFuncs<T> {
		let (add, update, delete) = (self.clone(), self.clone(), self.clone());
		EventHandlerFuncs::new()
			.with_add(move |list: &[T], obj: &T| add.push(id, EventKind::Add, list, obj))
			.with_update(move |list: &[T], obj: &T| update.push(id, EventKind::Update, list, obj))
			.with_delete(move |list: &[T], obj: &T| delete.push(id, EventKind::Delete, list, obj))
	}

	fn push<T: Resource>(&self, handler: &'static str, kind: EventKind, list: &[T], obj: &T) {
		self.seen.lock().unwrap().push(Seen {
			handler,
			kind,
			name: obj.name().to_string(),
			list: list.iter().map(|r| r.name().to_string()).collect(),
		});
	}

	/// Removes and returns everything recorded so far.
	pub fn take(&self) -> Vec<Seen> {
		std::mem::take(&mut *self.seen.lock().unwrap())
	}

	pub fn len(&self) -> usize {
		self.seen.lock().unwrap().len()
	}
}

/// Wraps a store and makes `list()` fail while `failing` is set.
pub struct FlakyStore<T> {
	pub inner: Arc<dyn ResourceStore<T>>,
	pub failing: AtomicBool,
	pub list_calls: AtomicUsize,
}

impl<T> FlakyStore<T> {
	pub fn new(inner: Arc<dyn ResourceStore<T>>) -> Self {
		Self {
			inner,
			failing: AtomicBool::new(false),
			list_calls: AtomicUsize::new(0),
		}
	}

	pub fn set_failing(&self, failing: bool) {
		self.failing.store(failing, Ordering::SeqCst);
	}
}

#[async_trait]
impl<T: Resource> ResourceStore<T> for FlakyStore<T> {
	async fn create(&self, resource: T) -> Result<T> {
		self.inner.create(resource).await
	}

	async fn update(&self, resource: T) -> Result<T> {
		self.inner.update(resource).await
	}

	async fn delete(&self, name: &str) -> Result<()> {
		self.inner.delete(name).await
	}

	async fn get(&self, name: &str) -> Result<T> {
		self.inner.get(name).await
	}

	async fn list(&self) -> Result<Vec<T>> {
		self.list_calls.fetch_add(1, Ordering::SeqCst);
		if self.failing.load(Ordering::SeqCst) {
			return Err(StorageError::BackendUnavailable("injected failure".to_string()));
		}
		self.inner.list().await
	}
}
