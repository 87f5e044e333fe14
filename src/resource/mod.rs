/* src/resource/mod.rs */

//!
//! Resource kinds managed by the storage layer.
//!
//! - [`Upstream`] - a destination cluster the proxy routes to
//! - [`VirtualHost`] - a set of domains with their routes

mod meta;
mod upstream;
mod virtual_host;

pub use meta::Metadata;
pub use upstream::{Function, Upstream};
pub use virtual_host::{Route, SslConfig, VirtualHost};

use std::fmt::Debug;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// A named configuration object stored in a collection.
///
/// The name is the unique key inside a collection. All other fields are
/// payload to the storage core and compared with `PartialEq` to detect updates.
pub trait Resource:
	Clone + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
	/// Singular kind name, used in errors and logs.
	const KIND: &'static str;
	/// Plural collection name, used as storage location by backends.
	const COLLECTION: &'static str;

	fn name(&self) -> &str;

	fn metadata(&self) -> Option<&Metadata>;

	fn set_metadata(&mut self, metadata: Metadata);
}

/// Checks that a resource name is usable as a storage key.
pub(crate) fn validate_name<T: Resource>(name: &str) -> crate::Result<()> {
	let valid = !name.is_empty()
		&& !name.starts_with('.')
		&& !name.contains(['/', '\\'])
		&& !name.chars().any(char::is_control);

	if valid {
		Ok(())
	} else {
		Err(crate::StorageError::InvalidName {
			kind: T::KIND,
			name: name.to_string(),
		})
	}
}
