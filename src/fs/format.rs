/* src/fs/format.rs */

use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg(feature = "config-serde")]
use serde::Deserialize;

/// On-disk encoding of resource files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-serde", serde(rename_all = "lowercase"))]
pub enum FileFormat {
	#[default]
	Yaml,
	Json,
}

impl FileFormat {
	/// File extension, without the dot.
	pub fn extension(&self) -> &'static str {
		match self {
			Self::Yaml => "yaml",
			Self::Json => "json",
		}
	}

	pub(crate) fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, String> {
		match self {
			Self::Yaml => serde_yaml::to_string(value)
				.map(String::into_bytes)
				.map_err(|e| e.to_string()),
			Self::Json => serde_json::to_vec_pretty(value).map_err(|e| e.to_string()),
		}
	}

	pub(crate) fn decode<T: DeserializeOwned>(&self, input: &[u8]) -> Result<T, String> {
		match self {
			Self::Yaml => serde_yaml::from_slice(input).map_err(|e| e.to_string()),
			Self::Json => serde_json::from_slice(input).map_err(|e| e.to_string()),
		}
	}
}
