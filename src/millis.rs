/* src/millis.rs */

//! Serde helpers encoding a [`Duration`] as an integer count of milliseconds.

use std::time::Duration;

use serde::ser::Error as _;
use serde::Serializer;

fn to_millis<S: Serializer>(d: &Duration) -> Result<u64, S::Error> {
	u64::try_from(d.as_millis())
		.map_err(|_| S::Error::custom(format!("duration {:?} overflows u64 milliseconds", d)))
}

#[cfg(feature = "config-serde")]
pub fn serialize<S: Serializer>(value: &Duration, s: S) -> Result<S::Ok, S::Error> {
	s.serialize_u64(to_millis::<S>(value)?)
}

#[cfg(feature = "config-serde")]
pub fn deserialize<'de, D: serde::Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
	use serde::Deserialize;

	Ok(Duration::from_millis(u64::deserialize(d)?))
}

pub mod option {
	use std::time::Duration;

	use serde::{Deserialize, Deserializer, Serializer};

	pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
		match value {
			Some(d) => s.serialize_u64(super::to_millis::<S>(d)?),
			None => s.serialize_none(),
		}
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
		Ok(Option::<u64>::deserialize(d)?.map(Duration::from_millis))
	}
}
