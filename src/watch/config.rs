/* src/watch/config.rs */

use std::time::Duration;

#[cfg(feature = "config-serde")]
use serde::{Deserialize, Serialize};

use crate::retry::RetryPolicy;

/// Default time between two polls of a collection.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Configuration for watch sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-serde", serde(default))]
pub struct WatchConfig {
	/// Time to wait between the end of one poll cycle and the next.
	#[cfg_attr(feature = "config-serde", serde(with = "crate::millis"))]
	pub poll_interval: Duration,
	/// Bounds each poll of the backing store.
	pub retry: RetryPolicy,
}

impl Default for WatchConfig {
	fn default() -> Self {
		Self {
			poll_interval: DEFAULT_POLL_INTERVAL,
			retry: RetryPolicy::default(),
		}
	}
}

impl WatchConfig {
	pub fn with_poll_interval(mut self, interval: Duration) -> Self {
		self.poll_interval = interval;
		self
	}

	pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
		self.retry = retry;
		self
	}
}
