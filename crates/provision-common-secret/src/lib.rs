// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Redacting wrapper for credentials handled by the provisioning service.
//!
//! Looker client secrets, Looker session tokens and Google access tokens all
//! travel through configuration and HTTP clients. Wrapping them in
//! [`Secret<T>`] keeps them out of `Debug`/`Display` output, out of
//! serialized config dumps, and zeroes the memory on drop. The value is only
//! reachable through [`Secret::expose`].
//!
//! ```
//! use provision_common_secret::Secret;
//!
//! let client_secret = Secret::new("looker-client-secret".to_string());
//! assert_eq!(format!("{client_secret}"), "[REDACTED]");
//! assert_eq!(client_secret.expose(), "looker-client-secret");
//! ```

use std::fmt;
use zeroize::Zeroize;

/// Placeholder printed wherever a secret would otherwise appear.
pub const REDACTED: &str = "[REDACTED]";

/// A sensitive value that never prints, never serializes, and is zeroed on drop.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct Secret<T>
where
	T: Zeroize,
{
	inner: T,
}

/// The common case: a secret string such as an API credential.
pub type SecretString = Secret<String>;

impl<T> Secret<T>
where
	T: Zeroize,
{
	pub fn new(inner: T) -> Self {
		Self { inner }
	}

	/// Access the wrapped value. Call sites opt in explicitly.
	pub fn expose(&self) -> &T {
		&self.inner
	}

	/// Clone the wrapped value out; the original stays zeroize-on-drop.
	pub fn into_inner(self) -> T
	where
		T: Clone,
	{
		self.inner.clone()
	}
}

impl<T> Clone for Secret<T>
where
	T: Zeroize + Clone,
{
	fn clone(&self) -> Self {
		Self::new(self.inner.clone())
	}
}

impl<T> fmt::Debug for Secret<T>
where
	T: Zeroize,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Secret").field(&REDACTED).finish()
	}
}

impl<T> fmt::Display for Secret<T>
where
	T: Zeroize,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl<T> PartialEq for Secret<T>
where
	T: Zeroize + PartialEq,
{
	fn eq(&self, other: &Self) -> bool {
		self.inner == other.inner
	}
}

impl<T> Eq for Secret<T> where T: Zeroize + Eq {}

#[cfg(feature = "serde")]
mod serde_impl {
	use super::{Secret, REDACTED};
	use serde::{Deserialize, Deserializer, Serialize, Serializer};
	use zeroize::Zeroize;

	impl<T> Serialize for Secret<T>
	where
		T: Zeroize,
	{
		fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
		where
			S: Serializer,
		{
			serializer.serialize_str(REDACTED)
		}
	}

	impl<'de, T> Deserialize<'de> for Secret<T>
	where
		T: Deserialize<'de> + Zeroize,
	{
		fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
		where
			D: Deserializer<'de>,
		{
			T::deserialize(deserializer).map(Secret::new)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn debug_and_display_hide_the_value() {
		let token = Secret::new("looker-session-token".to_string());
		assert_eq!(format!("{token}"), REDACTED);
		assert_eq!(format!("{token:?}"), "Secret(\"[REDACTED]\")");
	}

	#[test]
	fn optional_secret_in_config_struct_stays_redacted() {
		let client_secret: Option<SecretString> = Some(Secret::new("abc123".to_string()));
		let debug = format!("{client_secret:?}");
		assert!(!debug.contains("abc123"));
		assert!(debug.contains(REDACTED));
	}

	#[test]
	fn expose_and_into_inner_return_the_value() {
		let secret = Secret::new("abc123".to_string());
		assert_eq!(secret.expose(), "abc123");
		assert_eq!(secret.clone().into_inner(), "abc123");
	}

	#[test]
	fn serialize_writes_placeholder() {
		let secret = Secret::new("abc123".to_string());
		assert_eq!(serde_json::to_string(&secret).unwrap(), "\"[REDACTED]\"");
	}

	#[test]
	fn deserialize_reads_plain_value() {
		let secret: SecretString = serde_json::from_str("\"abc123\"").unwrap();
		assert_eq!(secret.expose(), "abc123");
	}

	proptest! {
		#[test]
		fn display_never_leaks(inner in "[a-zA-Z0-9_-]{4,40}") {
			prop_assume!(!REDACTED.contains(&inner));
			let secret = Secret::new(inner.clone());
			let displayed = format!("{}", secret);
			let debugged = format!("{:?}", secret);
			prop_assert!(!displayed.contains(&inner));
			prop_assert!(!debugged.contains(&inner));
		}
	}
}
