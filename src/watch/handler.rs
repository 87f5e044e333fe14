/* src/watch/handler.rs */

use std::sync::Arc;

/// Receives change notifications from a watch session.
///
/// Every callback gets the full collection after the change and the affected
/// resource. All methods default to no-ops, so implementors only override
/// what they care about. Callbacks run on the session task and block its
/// next poll until they return.
pub trait EventHandler<T>: Send + Sync {
	fn on_add(&self, _updated_list: &[T], _obj: &T) {}

	fn on_update(&self, _updated_list: &[T], _new_obj: &T) {}

	fn on_delete(&self, _updated_list: &[T], _obj: &T) {}
}

impl<T, H> EventHandler<T> for Arc<H>
where
	H: EventHandler<T> + ?Sized,
{
	fn on_add(&self, updated_list: &[T], obj: &T) {
		(**self).on_add(updated_list, obj);
	}

	fn on_update(&self, updated_list: &[T], new_obj: &T) {
		(**self).on_update(updated_list, new_obj);
	}

	fn on_delete(&self, updated_list: &[T], obj: &T) {
		(**self).on_delete(updated_list, obj);
	}
}

/// Callback type used by [`EventHandlerFuncs`].
pub type HandlerFn<T> = Arc<dyn Fn(&[T], &T) + Send + Sync>;

/// An [`EventHandler`] assembled from optional closures.
///
/// Missing callbacks are skipped.
pub struct EventHandlerFuncs<T> {
	pub add: Option<HandlerFn<T>>,
	pub update: Option<HandlerFn<T>>,
	pub delete: Option<HandlerFn<T>>,
}

impl<T> EventHandlerFuncs<T> {
	pub fn new() -> Self {
		Self {
			add: None,
			update: None,
			delete: None,
		}
	}

	pub fn with_add<F>(mut self, f: F) -> Self
	where
		F: Fn(&[T], &T) + Send + Sync + 'static,
	{
		self.add = Some(Arc::new(f));
		self
	}

	pub fn with_update<F>(mut self, f: F) -> Self
	where
		F: Fn(&[T], &T) + Send + Sync + 'static,
	{
		self.update = Some(Arc::new(f));
		self
	}

	pub fn with_delete<F>(mut self, f: F) -> Self
	where
		F: Fn(&[T], &T) + Send + Sync + 'static,
	{
		self.delete = Some(Arc::new(f));
		self
	}
}

impl<T> Default for EventHandlerFuncs<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> Clone for EventHandlerFuncs<T> {
	fn clone(&self) -> Self {
		Self {
			add: self.add.clone(),
			update: self.update.clone(),
			delete: self.delete.clone(),
		}
	}
}

impl<T> std::fmt::Debug for EventHandlerFuncs<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("EventHandlerFuncs")
			.field("add", &self.add.is_some())
			.field("update", &self.update.is_some())
			.field("delete", &self.delete.is_some())
			.finish()
	}
}

impl<T> EventHandler<T> for EventHandlerFuncs<T> {
	fn on_add(&self, updated_list: &[T], obj: &T) {
		if let Some(f) = &self.add {
			f(updated_list, obj);
		}
	}

	fn on_update(&self, updated_list: &[T], new_obj: &T) {
		if let Some(f) = &self.update {
			f(updated_list, new_obj);
		}
	}

	fn on_delete(&self, updated_list: &[T], obj: &T) {
		if let Some(f) = &self.delete {
			f(updated_list, obj);
		}
	}
}
