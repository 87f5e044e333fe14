/* tests/config_tests.rs */

#![cfg(feature = "config-serde")]

use std::time::Duration;

use livestore::{RetryPolicy, Upstream, WatchConfig};

#[test]
fn test_watch_config_defaults_missing_fields() {
	let config: WatchConfig = serde_json::from_str(r#"{"poll_interval": 2000}"#).unwrap();

	assert_eq!(config.poll_interval, Duration::from_secs(2));
	assert_eq!(config.retry, RetryPolicy::default());
}

#[test]
fn test_retry_policy_partial_override() {
	let retry: RetryPolicy =
		serde_json::from_str(r#"{"max_attempts": 7, "base_backoff": 250}"#).unwrap();

	assert_eq!(retry.max_attempts, 7);
	assert_eq!(retry.base_backoff, Duration::from_millis(250));
	assert_eq!(retry.timeout, RetryPolicy::default().timeout);
}

#[test]
fn test_durations_serialize_as_milliseconds() {
	let value = serde_json::to_value(WatchConfig::default()).unwrap();

	assert_eq!(value["poll_interval"], 1000);
	assert_eq!(value["retry"]["timeout"], 5000);
	assert_eq!(value["retry"]["base_backoff"], 100);
	assert_eq!(value["retry"]["max_backoff"], 2000);
}

#[test]
fn test_oversized_duration_fails_to_serialize() {
	let mut upstream = Upstream::new("users", "static");
	upstream.connection_timeout = Some(Duration::MAX);
	assert!(serde_json::to_string(&upstream).is_err());

	upstream.connection_timeout = Some(Duration::from_millis(1500));
	let value = serde_json::to_value(&upstream).unwrap();
	assert_eq!(value["connection_timeout"], 1500);
}

#[cfg(feature = "fs")]
#[test]
fn test_file_config_format_names() {
	use livestore::fs::{FileConfig, FileFormat};

	let config: FileConfig = serde_json::from_str(r#"{"root": "/srv/config", "format": "json"}"#).unwrap();
	assert_eq!(config.format, FileFormat::Json);

	let config: FileConfig = serde_json::from_str(r#"{"root": "/srv/config"}"#).unwrap();
	assert_eq!(config.format, FileFormat::Yaml);
}
