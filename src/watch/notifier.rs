/* src/watch/notifier.rs */

use std::collections::HashMap;
use std::sync::Arc;

use super::{Event, EventHandler};
use crate::resource::Resource;

/// Computes the events turning `previous` into `current`.
///
/// Adds come first, then updates, then deletes. Adds and updates follow the
/// order of `current`, deletes the order of `previous`. Every event carries
/// `current` as its list. Content is compared with `PartialEq`.
pub fn diff<T: Resource>(previous: &[T], current: &Arc<[T]>) -> Vec<Event<T>> {
	let old: HashMap<&str, &T> = previous.iter().map(|r| (r.name(), r)).collect();
	let new: HashMap<&str, &T> = current.iter().map(|r| (r.name(), r)).collect();

	let mut added = Vec::new();
	let mut updated = Vec::new();
	for resource in current.iter() {
		match old.get(resource.name()) {
			None => added.push(Event::Add {
				list: Arc::clone(current),
				object: resource.clone(),
			}),
			Some(before) if *before != resource => updated.push(Event::Update {
				list: Arc::clone(current),
				object: resource.clone(),
			}),
			Some(_) => {}
		}
	}

	let deleted = previous
		.iter()
		.filter(|r| !new.contains_key(r.name()))
		.map(|r| Event::Delete {
			list: Arc::clone(current),
			object: r.clone(),
		});

	added.extend(updated);
	added.extend(deleted);
	added
}

/// Fans events out to an ordered set of handlers.
pub struct Notifier<T> {
	handlers: Vec<Arc<dyn EventHandler<T>>>,
}

impl<T: Resource> Notifier<T> {
	pub fn new(handlers: Vec<Arc<dyn EventHandler<T>>>) -> Self {
		Self { handlers }
	}

	pub fn handler_count(&self) -> usize {
		self.handlers.len()
	}

	/// Invokes every handler for `event`, in registration order.
	pub fn dispatch(&self, event: &Event<T>) {
		for handler in &self.handlers {
			match event {
				Event::Add { list, object } => handler.on_add(list, object),
				Event::Update { list, object } => handler.on_update(list, object),
				Event::Delete { list, object } => handler.on_delete(list, object),
			}
		}
	}

	/// Diffs two snapshots and dispatches every resulting event.
	///
	/// Returns the number of events dispatched.
	pub fn notify(&self, previous: &[T], current: &Arc<[T]>) -> usize {
		let events = diff(previous, current);
		for event in &events {
			tracing::debug!(
				kind = T::KIND,
				name = event.object().name(),
				event = ?event.kind(),
				"dispatching change"
			);
			self.dispatch(event);
		}
		events.len()
	}
}

impl<T> std::fmt::Debug for Notifier<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Notifier")
			.field("handlers", &self.handlers.len())
			.finish()
	}
}
