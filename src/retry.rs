/* src/retry.rs */

//!
//! Timeout and backoff policy applied at the backend boundary.
//!
//! Reads (`get`, `list`) are retried on `BackendUnavailable` with capped
//! exponential backoff. Writes only get the timeout: a timed out write may
//! still have been applied, so repeating it could turn a success into
//! `AlreadyExists` or `NotFound`.

use std::future::Future;
use std::time::Duration;

#[cfg(feature = "config-serde")]
use serde::{Deserialize, Serialize};

use crate::{Result, StorageError};

/// How calls into the backing store are bounded and retried.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-serde", serde(default))]
pub struct RetryPolicy {
	/// Upper bound for a single backend call.
	#[cfg_attr(feature = "config-serde", serde(with = "crate::millis"))]
	pub timeout: Duration,
	/// Total attempts for retryable calls, including the first one.
	pub max_attempts: u32,
	/// Delay before the second attempt; doubled for every further attempt.
	#[cfg_attr(feature = "config-serde", serde(with = "crate::millis"))]
	pub base_backoff: Duration,
	#[cfg_attr(feature = "config-serde", serde(with = "crate::millis"))]
	pub max_backoff: Duration,
}

impl Default for RetryPolicy {
	fn default() -> Self {
		Self {
			timeout: Duration::from_secs(5),
			max_attempts: 3,
			base_backoff: Duration::from_millis(100),
			max_backoff: Duration::from_secs(2),
		}
	}
}

impl RetryPolicy {
	/// A policy making exactly one attempt per call.
	pub fn single_attempt(timeout: Duration) -> Self {
		Self {
			timeout,
			max_attempts: 1,
			..Self::default()
		}
	}

	/// Delay to wait after the given failed attempt (1-based).
	pub fn backoff(&self, attempt: u32) -> Duration {
		if attempt == 0 {
			return Duration::ZERO;
		}
		let factor = 2u32.saturating_pow(attempt - 1);
		self.base_backoff
			.checked_mul(factor)
			.unwrap_or(self.max_backoff)
			.min(self.max_backoff)
	}

	/// Runs `op` once under the timeout.
	pub async fn once<F, R>(&self, op: F) -> Result<R>
	where
		F: Future<Output = Result<R>>,
	{
		match tokio::time::timeout(self.timeout, op).await {
			Ok(result) => result,
			Err(_) => Err(StorageError::BackendUnavailable(format!(
				"backend call timed out after {:?}",
				self.timeout
			))),
		}
	}

	/// Runs `op` until it succeeds, fails permanently or attempts run out.
	pub async fn retry<F, Fut, R>(&self, mut op: F) -> Result<R>
	where
		F: FnMut() -> Fut,
		Fut: Future<Output = Result<R>>,
	{
		let attempts = self.max_attempts.max(1);
		let mut attempt = 1;
		loop {
			match self.once(op()).await {
				Err(e) if e.is_transient() && attempt < attempts => {
					let delay = self.backoff(attempt);
					tracing::debug!(attempt, ?delay, error = %e, "retrying backend call");
					tokio::time::sleep(delay).await;
					attempt += 1;
				}
				result => return result,
			}
		}
	}
}
