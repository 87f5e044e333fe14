/* src/fs/mod.rs */

//!
//! File backend.
//!
//! Layout under the configured root:
//!
//! ```text
//! <root>/upstreams/<name>.<ext>
//! <root>/virtualhosts/<name>.<ext>
//! ```

mod format;
mod store;

pub use format::FileFormat;
pub use store::FileStore;

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
#[cfg(feature = "config-serde")]
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::backend::{Backend, ResourceStore};
use crate::resource::{Resource, Upstream, VirtualHost};
use crate::{Result, StorageError};

/// Location and encoding of the file backend.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config-serde", derive(Serialize, Deserialize))]
pub struct FileConfig {
	pub root: PathBuf,
	#[cfg_attr(feature = "config-serde", serde(default))]
	pub format: FileFormat,
}

impl FileConfig {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self {
			root: root.into(),
			format: FileFormat::default(),
		}
	}

	pub fn with_format(mut self, format: FileFormat) -> Self {
		self.format = format;
		self
	}
}

/// Backend storing every resource as a file.
#[derive(Debug, Clone)]
pub struct FileBackend {
	root: PathBuf,
	upstreams: Arc<FileStore<Upstream>>,
	virtual_hosts: Arc<FileStore<VirtualHost>>,
}

impl FileBackend {
	pub fn new(config: FileConfig) -> Self {
		let FileConfig { root, format } = config;
		Self {
			upstreams: Arc::new(FileStore::new(root.join(Upstream::COLLECTION), format)),
			virtual_hosts: Arc::new(FileStore::new(root.join(VirtualHost::COLLECTION), format)),
			root,
		}
	}

	pub fn root(&self) -> &std::path::Path {
		&self.root
	}
}

#[async_trait]
impl Backend for FileBackend {
	async fn register(&self) -> Result<()> {
		for dir in [self.upstreams.dir(), self.virtual_hosts.dir()] {
			fs::create_dir_all(dir).await.map_err(|e| {
				StorageError::InitializationFailed(format!("cannot create {}: {}", dir.display(), e))
			})?;
		}
		tracing::debug!(root = %self.root.display(), "file storage directories ready");
		Ok(())
	}

	fn upstreams(&self) -> Arc<dyn ResourceStore<Upstream>> {
		self.upstreams.clone()
	}

	fn virtual_hosts(&self) -> Arc<dyn ResourceStore<VirtualHost>> {
		self.virtual_hosts.clone()
	}
}
