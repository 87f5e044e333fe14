/* tests/watch_tests.rs */

#![cfg(feature = "memory")]

mod common;

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use common::{FlakyStore, Recorder, Seen};
use livestore::memory::MemoryBackend;
use livestore::{
	Backend, CancellationToken, EventKind, Resources, RetryPolicy, Storage, Upstream, Upstreams,
	VirtualHost, WatchConfig,
};

const INTERVAL: Duration = Duration::from_millis(100);

async fn upstreams() -> Upstreams {
	let storage = Storage::builder(MemoryBackend::new())
		.poll_interval(INTERVAL)
		.build();
	storage.register().await.unwrap();
	storage.upstreams()
}

/// Lets the session take its first poll.
async fn settle() {
	tokio::time::sleep(Duration::from_millis(10)).await;
}

/// Advances past exactly one more poll cycle.
async fn next_cycle() {
	tokio::time::sleep(INTERVAL).await;
}

#[tokio::test(start_paused = true)]
async fn test_session_scenario_add_update_delete() {
	let upstreams = upstreams().await;
	upstreams.create(Upstream::new("a", "static")).await.unwrap();

	let recorder = Recorder::default();
	let stop = CancellationToken::new();
	let handle = upstreams.watch([recorder.handler("h")]).spawn(stop.clone());

	settle().await;
	assert!(recorder.take().is_empty(), "baseline must not produce events");

	upstreams.create(Upstream::new("b", "static")).await.unwrap();
	next_cycle().await;
	assert_eq!(
		recorder.take(),
		vec![Seen::new("h", EventKind::Add, "b", &["a", "b"])]
	);

	upstreams.update(Upstream::new("a", "aws")).await.unwrap();
	next_cycle().await;
	assert_eq!(
		recorder.take(),
		vec![Seen::new("h", EventKind::Update, "a", &["a", "b"])]
	);

	upstreams.delete("b").await.unwrap();
	next_cycle().await;
	assert_eq!(
		recorder.take(),
		vec![Seen::new("h", EventKind::Delete, "b", &["a"])]
	);

	stop.cancel();
	handle.join().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_cycle_orders_adds_then_updates_then_deletes() {
	let upstreams = upstreams().await;
	for name in ["a", "b", "c"] {
		upstreams.create(Upstream::new(name, "static")).await.unwrap();
	}

	let recorder = Recorder::default();
	let handle = upstreams
		.watch([recorder.handler("h")])
		.spawn(CancellationToken::new());
	settle().await;

	upstreams.delete("c").await.unwrap();
	upstreams.update(Upstream::new("a", "aws")).await.unwrap();
	upstreams.create(Upstream::new("d", "static")).await.unwrap();
	next_cycle().await;

	let kinds: Vec<_> = recorder
		.take()
		.into_iter()
		.map(|s| (s.kind, s.name, s.list))
		.collect();
	let list = vec!["a".to_string(), "b".to_string(), "d".to_string()];
	assert_eq!(
		kinds,
		vec![
			(EventKind::Add, "d".to_string(), list.clone()),
			(EventKind::Update, "a".to_string(), list.clone()),
			(EventKind::Delete, "c".to_string(), list),
		]
	);

	handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_handlers_receive_events_in_registration_order() {
	let upstreams = upstreams().await;
	let recorder = Recorder::default();
	let handle = upstreams
		.watch([recorder.handler("first"), recorder.handler("second")])
		.spawn(CancellationToken::new());
	settle().await;

	upstreams.create(Upstream::new("a", "static")).await.unwrap();
	upstreams.create(Upstream::new("b", "static")).await.unwrap();
	next_cycle().await;

	let order: Vec<_> = recorder
		.take()
		.into_iter()
		.map(|s| (s.handler, s.name))
		.collect();
	assert_eq!(
		order,
		vec![
			("first", "a".to_string()),
			("second", "a".to_string()),
			("first", "b".to_string()),
			("second", "b".to_string()),
		]
	);

	handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_no_handler_calls_after_stop() {
	let upstreams = upstreams().await;
	let recorder = Recorder::default();
	let stop = CancellationToken::new();
	let handle = upstreams.watch([recorder.handler("h")]).spawn(stop.clone());
	settle().await;

	upstreams.create(Upstream::new("a", "static")).await.unwrap();
	next_cycle().await;
	assert_eq!(recorder.len(), 1);

	stop.cancel();
	stop.cancel();
	handle.stop();
	handle.join().await.unwrap();

	upstreams.create(Upstream::new("b", "static")).await.unwrap();
	upstreams.delete("a").await.unwrap();
	for _ in 0..5 {
		next_cycle().await;
	}
	assert_eq!(recorder.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_handle_stop_leaves_parent_token_alone() {
	let upstreams = upstreams().await;
	let parent = CancellationToken::new();
	let first = upstreams.watch([Recorder::default().handler("a")]).spawn(parent.clone());
	let second = upstreams.watch([Recorder::default().handler("b")]).spawn(parent.clone());
	settle().await;

	first.stop();
	assert!(!first.is_finished());
	first.join().await.unwrap();
	assert!(!parent.is_cancelled());
	assert!(!second.is_finished());

	parent.cancel();
	second.join().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_sessions_are_independent() {
	let upstreams = upstreams().await;
	let early = Recorder::default();
	let late = Recorder::default();

	let first = upstreams.watch([early.handler("early")]).spawn(CancellationToken::new());
	settle().await;
	upstreams.create(Upstream::new("a", "static")).await.unwrap();
	next_cycle().await;

	// Starts with "a" already in its baseline.
	let second = upstreams.watch([late.handler("late")]).spawn(CancellationToken::new());
	settle().await;
	upstreams.create(Upstream::new("b", "static")).await.unwrap();
	next_cycle().await;

	let early_names: Vec<_> = early.take().into_iter().map(|s| s.name).collect();
	let late_names: Vec<_> = late.take().into_iter().map(|s| s.name).collect();
	assert_eq!(early_names, vec!["a", "b"]);
	assert_eq!(late_names, vec!["b"]);

	first.shutdown().await.unwrap();
	second.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_failed_polls_keep_baseline_and_recover() {
	let backend = MemoryBackend::new();
	let flaky = Arc::new(FlakyStore::new(backend.upstreams()));
	let config = WatchConfig::default()
		.with_poll_interval(INTERVAL)
		.with_retry(RetryPolicy::single_attempt(Duration::from_secs(1)));
	let upstreams = Resources::<Upstream>::new(flaky.clone(), config);

	upstreams.create(Upstream::new("a", "static")).await.unwrap();
	let recorder = Recorder::default();
	let handle = upstreams.watch([recorder.handler("h")]).spawn(CancellationToken::new());
	settle().await;

	flaky.set_failing(true);
	upstreams.create(Upstream::new("b", "static")).await.unwrap();
	for _ in 0..3 {
		next_cycle().await;
	}
	assert_eq!(recorder.len(), 0, "a failed poll must not fabricate deletes");
	assert!(flaky.list_calls.load(Ordering::SeqCst) >= 4);

	flaky.set_failing(false);
	next_cycle().await;
	assert_eq!(
		recorder.take(),
		vec![Seen::new("h", EventKind::Add, "b", &["a", "b"])]
	);

	handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_run_blocks_until_cancelled() {
	let storage = Storage::builder(MemoryBackend::new())
		.poll_interval(INTERVAL)
		.build();
	storage.register().await.unwrap();
	let hosts = storage.virtual_hosts();

	let recorder = Recorder::default();
	let watcher = hosts.watch([recorder.handler::<VirtualHost>("h")]);
	let stop = CancellationToken::new();

	let task = tokio::spawn(watcher.run(stop.clone()));
	settle().await;
	hosts.create(VirtualHost::new("default")).await.unwrap();
	next_cycle().await;
	assert!(!task.is_finished());

	stop.cancel();
	task.await.unwrap();
	assert_eq!(recorder.len(), 1);
}
