/* src/resource/upstream.rs */

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Metadata, Resource};

/// A destination the data plane can route traffic to.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Upstream {
	pub name: String,
	/// Plugin-defined upstream type, e.g. `static` or `aws`.
	#[serde(rename = "type", default)]
	pub upstream_type: String,
	#[serde(default, skip_serializing_if = "Option::is_none", with = "crate::millis::option")]
	pub connection_timeout: Option<Duration>,
	/// Type-specific settings, opaque to storage.
	#[serde(default, skip_serializing_if = "Map::is_empty")]
	pub spec: Map<String, Value>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub functions: Vec<Function>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub metadata: Option<Metadata>,
}

/// A callable function exposed by an upstream.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Function {
	pub name: String,
	#[serde(default, skip_serializing_if = "Map::is_empty")]
	pub spec: Map<String, Value>,
}

impl Upstream {
	pub fn new(name: impl Into<String>, upstream_type: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			upstream_type: upstream_type.into(),
			..Default::default()
		}
	}
}

impl Resource for Upstream {
	const KIND: &'static str = "upstream";
	const COLLECTION: &'static str = "upstreams";

	fn name(&self) -> &str {
		&self.name
	}

	fn metadata(&self) -> Option<&Metadata> {
		self.metadata.as_ref()
	}

	fn set_metadata(&mut self, metadata: Metadata) {
		self.metadata = Some(metadata);
	}
}
