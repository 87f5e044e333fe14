/* src/resource/virtual_host.rs */

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Metadata, Resource};

/// A group of domains served by the proxy, with the routes for them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VirtualHost {
	pub name: String,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub domains: Vec<String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub routes: Vec<Route>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub ssl_config: Option<SslConfig>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub metadata: Option<Metadata>,
}

/// A request matcher and where matching requests go. Both sides are opaque.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Route {
	#[serde(default)]
	pub matcher: Value,
	#[serde(default)]
	pub destination: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SslConfig {
	/// Reference to the secret holding certificate and key.
	pub secret_ref: String,
}

impl VirtualHost {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Default::default()
		}
	}

	pub fn with_domains<I, S>(mut self, domains: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.domains = domains.into_iter().map(Into::into).collect();
		self
	}
}

impl Resource for VirtualHost {
	const KIND: &'static str = "virtual host";
	const COLLECTION: &'static str = "virtualhosts";

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
