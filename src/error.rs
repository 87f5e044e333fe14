/* src/error.rs */

/// Errors returned by resource stores, facades and the storage root.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
	/// A resource with the same name already exists in the collection.
	#[error("{kind} already exists: {name}")]
	AlreadyExists { kind: &'static str, name: String },
	/// The named resource is not present in the collection.
	#[error("{kind} not found: {name}")]
	NotFound { kind: &'static str, name: String },
	/// The backing store could not be reached or timed out.
	#[error("backend unavailable: {0}")]
	BackendUnavailable(String),
	/// One-time backend preparation failed. Fatal for further facade use.
	#[error("initialization failed: {0}")]
	InitializationFailed(String),
	/// The name cannot be used as a storage key.
	#[error("invalid {kind} name: {name:?}")]
	InvalidName { kind: &'static str, name: String },
	/// A stored resource could not be encoded or decoded.
	#[error("codec error for {name}: {message}")]
	Codec { name: String, message: String },
}

impl StorageError {
	pub(crate) fn already_exists(kind: &'static str, name: impl Into<String>) -> Self {
		Self::AlreadyExists {
			kind,
			name: name.into(),
		}
	}

	pub(crate) fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
		Self::NotFound {
			kind,
			name: name.into(),
		}
	}

	/// Returns true for errors worth retrying at the backend boundary.
	pub fn is_transient(&self) -> bool {
		matches!(self, Self::BackendUnavailable(_))
	}
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, StorageError>;
