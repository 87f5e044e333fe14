/* src/resource/meta.rs */

use serde::{Deserialize, Serialize};

/// Bookkeeping attached to a stored resource by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Metadata {
	/// Revision marker, changed by the backend on every successful write.
	pub resource_version: String,
}

impl Metadata {
	pub fn with_version(version: u64) -> Self {
		Self {
			resource_version: version.to_string(),
		}
	}
}
