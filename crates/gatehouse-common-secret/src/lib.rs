// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Secret wrapper type that prevents accidental logging of sensitive values.
//!
//! The [`Secret<T>`] type wraps sensitive values like controller passwords,
//! ensuring they:
//!
//! - Never appear in logs (redacted Debug/Display)
//! - Never serialize to plain text (redacted Serialize)
//! - Are zeroized from memory on drop
//! - Require an explicit `.expose()` call to access the inner value
//!
//! # Example
//!
//! ```
//! use gatehouse_common_secret::Secret;
//!
//! let password = Secret::new("hunter2".to_string());
//!
//! // Debug and Display are redacted
//! assert_eq!(format!("{:?}", password), "Secret(\"[REDACTED]\")");
//! assert_eq!(format!("{}", password), "[REDACTED]");
//!
//! // Must explicitly expose to use the value
//! assert_eq!(password.expose(), "hunter2");
//! ```

use std::fmt;
use zeroize::Zeroize;

/// The redaction placeholder used in all output.
pub const REDACTED: &str = "[REDACTED]";

/// A wrapper for sensitive values that prevents accidental exposure.
///
/// Redacts `Debug`, `Display`, and `Serialize` output, zeroizes memory on
/// drop, and has no `Deref` impl; call sites must opt in to seeing the value
/// via [`Secret::expose`], which keeps secret access visible in code review.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct Secret<T>
where
	T: Zeroize,
{
	inner: T,
}

/// Convenience alias for the common case of secret strings.
pub type SecretString = Secret<String>;

impl<T> Secret<T>
where
	T: Zeroize,
{
	/// Create a new secret wrapper around the given value.
	pub fn new(inner: T) -> Self {
		Self { inner }
	}

	/// Explicitly access the inner value.
	pub fn expose(&self) -> &T {
		&self.inner
	}

	/// Consume the wrapper and return the inner value.
	///
	/// Clones rather than moves so zeroization still runs on the original
	/// secret memory.
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
		Self {
			inner: self.inner.clone(),
		}
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

impl<T> serde::Serialize for Secret<T>
where
	T: serde::Serialize + Zeroize,
{
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_str(REDACTED)
	}
}

impl<'de, T> serde::Deserialize<'de> for Secret<T>
where
	T: serde::Deserialize<'de> + Zeroize,
{
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		let inner = T::deserialize(deserializer)?;
		Ok(Secret::new(inner))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	/// Verifies that Debug output never contains the secret value.
	#[test]
	fn debug_is_redacted() {
		let secret = Secret::new("controller-password".to_string());
		let debug_output = format!("{secret:?}");

		assert!(!debug_output.contains("controller-password"));
		assert!(debug_output.contains(REDACTED));
	}

	/// Verifies that Display output never contains the secret value.
	#[test]
	fn display_is_redacted() {
		let secret = Secret::new("controller-password".to_string());
		assert_eq!(format!("{secret}"), REDACTED);
	}

	#[test]
	fn expose_returns_inner_value() {
		let secret = Secret::new("hunter2".to_string());
		assert_eq!(secret.expose(), "hunter2");
	}

	#[test]
	fn into_inner_returns_owned_value() {
		let secret = Secret::new("hunter2".to_string());
		assert_eq!(secret.into_inner(), "hunter2");
	}

	#[test]
	fn clone_produces_equivalent_secret() {
		let secret = Secret::new("hunter2".to_string());
		let cloned = secret.clone();
		assert_eq!(secret.expose(), cloned.expose());
	}

	/// Verifies that serialization never leaks the value, e.g. when a config
	/// struct carrying a secret is dumped as JSON.
	#[test]
	fn serialize_is_redacted() {
		let secret = Secret::new("controller-password".to_string());
		let json = serde_json::to_string(&secret).unwrap();

		assert!(!json.contains("controller-password"));
		assert!(json.contains(REDACTED));
	}

	#[test]
	fn deserialize_populates_secret() {
		let secret: Secret<String> = serde_json::from_str(r#""hunter2""#).unwrap();
		assert_eq!(secret.expose(), "hunter2");
	}

	/// Option<Secret> is the usual shape for optional config fields.
	#[test]
	fn option_secret_debug_is_redacted() {
		let secret: Option<Secret<String>> = Some(Secret::new("controller-password".to_string()));
		let debug = format!("{secret:?}");
		assert!(debug.contains(REDACTED));
		assert!(!debug.contains("controller-password"));
	}

	proptest! {
		/// The most critical property: secrets must never leak through Debug,
		/// Display, or Serialize for arbitrary inner strings.
		#[test]
		fn never_leaks_inner_value(inner in "[a-zA-Z0-9!@#$%^&*_+=;:,.<>?/-]{3,50}") {
			prop_assume!(!inner.contains("REDACTED"));
			prop_assume!(!inner.contains("Secret"));

			let secret = Secret::new(inner.clone());
			let debug_str = format!("{:?}", secret);
			let display_str = format!("{}", secret);
			let json_str = serde_json::to_string(&secret).unwrap();
			prop_assert!(!debug_str.contains(&inner));
			prop_assert!(!display_str.contains(&inner));
			prop_assert!(!json_str.contains(&inner));
		}

		#[test]
		fn expose_roundtrips(inner in ".*") {
			let secret = Secret::new(inner.clone());
			prop_assert_eq!(secret.expose(), &inner);
		}
	}
}
