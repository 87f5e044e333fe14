/* src/watch/event.rs */

use std::sync::Arc;

/// The kind of change a watch session observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
	Add,
	Update,
	Delete,
}

/// A single change between two snapshots of a collection.
///
/// `list` is the collection after the change. All events of one poll cycle
/// share the same list.
#[derive(Debug, Clone, PartialEq)]
pub enum Event<T> {
	/// A resource appeared. `object` is the new resource.
	Add { list: Arc<[T]>, object: T },
	/// A resource changed. `object` is the new content.
	Update { list: Arc<[T]>, object: T },
	/// A resource disappeared. `object` is its last observed content.
	Delete { list: Arc<[T]>, object: T },
}

impl<T> Event<T> {
	pub fn kind(&self) -> EventKind {
		match self {
			Self::Add { .. } => EventKind::Add,
			Self::Update { .. } => EventKind::Update,
			Self::Delete { .. } => EventKind::Delete,
		}
	}

	/// The full collection after this event.
	pub fn list(&self) -> &[T] {
		match self {
			Self::Add { list, .. } | Self::Update { list, .. } | Self::Delete { list, .. } => list,
		}
	}

	/// The resource this event is about.
	pub fn object(&self) -> &T {
		match self {
			Self::Add { object, .. } | Self::Update { object, .. } | Self::Delete { object, .. } => {
				object
			}
		}
	}
}
