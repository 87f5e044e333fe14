/* src/watch/session.rs */

use std::sync::Arc;

use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;

use super::{Notifier, WatchConfig};
use crate::backend::ResourceStore;
use crate::resource::Resource;

/// A watch session that has been set up but not started.
///
/// Nothing is polled until [`run`](Watcher::run) or [`spawn`](Watcher::spawn)
/// is called. Both consume the watcher, so a session runs at most once.
#[must_use = "a Watcher does nothing until it is run"]
pub struct Watcher<T> {
	source: Arc<dyn ResourceStore<T>>,
	notifier: Notifier<T>,
	config: WatchConfig,
}

impl<T: Resource> Watcher<T> {
	pub(crate) fn new(
		source: Arc<dyn ResourceStore<T>>,
		notifier: Notifier<T>,
		config: WatchConfig,
	) -> Self {
		Self {
			source,
			notifier,
			config,
		}
	}

	/// Polls the collection and dispatches changes until `stop` is cancelled.
	///
	/// The first successful poll only records the baseline. A failed poll is
	/// logged and skipped; the previous baseline stays in place, so nothing is
	/// reported as deleted just because it could not be listed.
	pub async fn run(self, stop: CancellationToken) {
		let kind = T::KIND;
		tracing::info!(
			kind,
			handlers = self.notifier.handler_count(),
			interval = ?self.config.poll_interval,
			"watch session started"
		);

		let mut previous: Option<Arc<[T]>> = None;

		loop {
			let polled = tokio::select! {
				biased;
				_ = stop.cancelled() => break,
				result = self.config.retry.retry(|| self.source.list()) => result,
			};

			match polled {
				Ok(items) => {
					let current: Arc<[T]> = Arc::from(items);
					match previous.as_deref() {
						None => tracing::debug!(kind, len = current.len(), "baseline established"),
						Some(before) => {
							let dispatched = self.notifier.notify(before, &current);
							if dispatched > 0 {
								tracing::debug!(kind, events = dispatched, "poll cycle dispatched");
							}
						}
					}
					previous = Some(current);
				}
				Err(e) => {
					tracing::warn!(kind, error = %e, "poll failed, keeping previous snapshot");
				}
			}

			tokio::select! {
				biased;
				_ = stop.cancelled() => break,
				_ = tokio::time::sleep(self.config.poll_interval) => {}
			}
		}

		tracing::info!(kind, "watch session stopped");
	}

	/// Runs the session on a background task.
	///
	/// The session stops when `stop` or the handle's own token is cancelled.
	/// Dropping the handle detaches the task without stopping it.
	pub fn spawn(self, stop: CancellationToken) -> WatchHandle {
		let token = stop.child_token();
		let task = tokio::spawn(self.run(token.clone()));
		WatchHandle { token, task }
	}
}

impl<T> std::fmt::Debug for Watcher<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Watcher")
			.field("notifier", &self.notifier)
			.field("config", &self.config)
			.finish_non_exhaustive()
	}
}

/// Handle to a session started with [`Watcher::spawn`].
#[derive(Debug)]
pub struct WatchHandle {
	token: CancellationToken,
	task: JoinHandle<()>,
}

impl WatchHandle {
	/// Signals the session to stop. Safe to call more than once.
	pub fn stop(&self) {
		self.token.cancel();
	}

	/// Whether the session task has exited.
	///
	/// This can still be `false` right after [`stop`](Self::stop) until the
	/// task observes the signal; use [`join`](Self::join) to wait for it.
	pub fn is_finished(&self) -> bool {
		self.task.is_finished()
	}

	/// Waits for the session task to finish.
	pub async fn join(self) -> Result<(), JoinError> {
		self.task.await
	}

	/// Signals stop and waits for the session to finish.
	pub async fn shutdown(self) -> Result<(), JoinError> {
		self.stop();
		self.join().await
	}
}
