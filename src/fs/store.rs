/* src/fs/store.rs */

use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;

use super::FileFormat;
use crate::backend::ResourceStore;
use crate::resource::{Metadata, Resource, validate_name};
use crate::{Result, StorageError};

/// A collection stored as one file per resource inside a directory.
///
/// Writes go to a hidden temporary file that is then renamed over the
/// target, so readers never see a partially written resource. Writes and
/// listings from this process are serialized by a lock.
pub struct FileStore<T> {
	dir: PathBuf,
	format: FileFormat,
	lock: Mutex<()>,
	_kind: PhantomData<fn() -> T>,
}

fn unavailable(path: &Path, e: std::io::Error) -> StorageError {
	StorageError::BackendUnavailable(format!("{}: {}", path.display(), e))
}

impl<T: Resource> FileStore<T> {
	pub fn new(dir: impl Into<PathBuf>, format: FileFormat) -> Self {
		Self {
			dir: dir.into(),
			format,
			lock: Mutex::new(()),
			_kind: PhantomData,
		}
	}

	pub fn dir(&self) -> &Path {
		&self.dir
	}

	fn path_for(&self, name: &str) -> Result<PathBuf> {
		validate_name::<T>(name)?;
		Ok(self.dir.join(format!("{}.{}", name, self.format.extension())))
	}

	/// Reads and decodes one resource file. `Ok(None)` if it does not exist.
	async fn read(&self, path: &Path) -> Result<Option<T>> {
		let bytes = match fs::read(path).await {
			Ok(bytes) => bytes,
			Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
			Err(e) => return Err(unavailable(path, e)),
		};
		self.format
			.decode::<T>(&bytes)
			.map(Some)
			.map_err(|message| StorageError::Codec {
				name: path.display().to_string(),
				message,
			})
	}

	async fn write(&self, path: &Path, resource: &T) -> Result<()> {
		let bytes = self
			.format
			.encode(resource)
			.map_err(|message| StorageError::Codec {
				name: resource.name().to_string(),
				message,
			})?;

		let tmp = self
			.dir
			.join(format!(".{}.{}.tmp", resource.name(), self.format.extension()));
		fs::write(&tmp, &bytes).await.map_err(|e| unavailable(&tmp, e))?;
		if let Err(e) = fs::rename(&tmp, path).await {
			let _ = fs::remove_file(&tmp).await;
			return Err(unavailable(path, e));
		}
		Ok(())
	}

	async fn exists(&self, path: &Path) -> Result<bool> {
		fs::try_exists(path).await.map_err(|e| unavailable(path, e))
	}

	/// Extracts the resource name from a file name, skipping hidden and foreign files.
	fn name_of(&self, file_name: &str) -> Option<String> {
		if file_name.starts_with('.') {
			return None;
		}
		file_name
			.strip_suffix(self.format.extension())
			.and_then(|stem| stem.strip_suffix('.'))
			.filter(|stem| !stem.is_empty())
			.map(str::to_string)
	}
}

fn next_version(previous: Option<&Metadata>) -> Metadata {
	let last = previous
		.and_then(|m| m.resource_version.parse::<u64>().ok())
		.unwrap_or(0);
	Metadata::with_version(last + 1)
}

#[async_trait]
impl<T: Resource> ResourceStore<T> for FileStore<T> {
	async fn create(&self, mut resource: T) -> Result<T> {
		let path = self.path_for(resource.name())?;
		let _guard = self.lock.lock().await;

		if self.exists(&path).await? {
			return Err(StorageError::already_exists(T::KIND, resource.name()));
		}
		resource.set_metadata(next_version(None));
		self.write(&path, &resource).await?;
		Ok(resource)
	}

	async fn update(&self, mut resource: T) -> Result<T> {
		let path = self.path_for(resource.name())?;
		let _guard = self.lock.lock().await;

		if !self.exists(&path).await? {
			return Err(StorageError::not_found(T::KIND, resource.name()));
		}
		// An undecodable previous revision restarts the counter.
		let previous = match self.read(&path).await {
			Ok(previous) => previous,
			Err(StorageError::Codec { .. }) => None,
			Err(e) => return Err(e),
		};
		resource.set_metadata(next_version(previous.as_ref().and_then(|r| r.metadata())));
		self.write(&path, &resource).await?;
		Ok(resource)
	}

	async fn delete(&self, name: &str) -> Result<()> {
		let path = self.path_for(name)?;
		let _guard = self.lock.lock().await;

		match fs::remove_file(&path).await {
			Ok(()) => Ok(()),
			Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::not_found(T::KIND, name)),
			Err(e) => Err(unavailable(&path, e)),
		}
	}

	async fn get(&self, name: &str) -> Result<T> {
		let path = self.path_for(name)?;
		let resource = self
			.read(&path)
			.await?
			.ok_or_else(|| StorageError::not_found(T::KIND, name))?;

		if resource.name() != name {
			return Err(StorageError::Codec {
				name: name.to_string(),
				message: format!("file declares name {:?}", resource.name()),
			});
		}
		Ok(resource)
	}

	async fn list(&self) -> Result<Vec<T>> {
		let _guard = self.lock.lock().await;

		let mut entries = fs::read_dir(&self.dir)
			.await
			.map_err(|e| unavailable(&self.dir, e))?;

		let mut resources = Vec::new();
		while let Some(entry) = entries
			.next_entry()
			.await
			.map_err(|e| unavailable(&self.dir, e))?
		{
			let file_name = entry.file_name();
			let Some(name) = self.name_of(&file_name.to_string_lossy()) else {
				continue;
			};

			let path = entry.path();
			match self.read(&path).await {
				Ok(Some(resource)) if resource.name() == name => resources.push(resource),
				Ok(Some(resource)) => {
					tracing::warn!(
						kind = T::KIND,
						path = %path.display(),
						declared = resource.name(),
						"skipping file whose name does not match its content"
					);
				}
				// Removed between read_dir and read by another process.
				Ok(None) => {}
				Err(e @ StorageError::Codec { .. }) => {
					tracing::warn!(kind = T::KIND, path = %path.display(), error = %e, "skipping undecodable file");
				}
				Err(e) => return Err(e),
			}
		}

		resources.sort_by(|a, b| a.name().cmp(b.name()));
		Ok(resources)
	}
}

impl<T: Resource> std::fmt::Debug for FileStore<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FileStore")
			.field("kind", &T::KIND)
			.field("dir", &self.dir)
			.field("format", &self.format)
			.finish()
	}
}
