// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP client with consistent User-Agent header.

use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::warn;

/// Creates a new HTTP client with the standard Gatehouse User-Agent header.
pub fn new_client() -> Client {
	builder().build().expect("failed to build HTTP client")
}

/// Creates a new HTTP client builder with the standard Gatehouse User-Agent
/// header.
///
/// Use this when you need to customize the client (e.g., set timeout).
///
/// # Example
/// ```ignore
/// let client = gatehouse_common_http::builder()
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Creates a new HTTP client builder that accepts any TLS certificate.
///
/// Access controllers are commonly deployed on private networks with
/// self-signed certificates; callers opt in to skipping verification.
pub fn insecure_builder() -> ClientBuilder {
	warn!("TLS certificate verification is disabled for this HTTP client");
	builder().danger_accept_invalid_certs(true)
}

/// Creates a builder with certificate verification toggled by the caller.
///
/// The flag must cover every request issued through the returned client, so
/// the choice is made once at construction time.
pub fn builder_for(allow_unauthorized_certs: bool) -> ClientBuilder {
	if allow_unauthorized_certs {
		insecure_builder()
	} else {
		builder()
	}
}

/// Creates a new HTTP client with a custom timeout and the standard
/// User-Agent.
pub fn new_client_with_timeout(timeout: Duration) -> Client {
	builder()
		.timeout(timeout)
		.build()
		.expect("failed to build HTTP client")
}

/// Returns the standard Gatehouse User-Agent string.
///
/// Format: `gatehouse/{version}`
pub fn user_agent() -> String {
	format!("gatehouse/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn user_agent_has_correct_format() {
		let ua = user_agent();
		assert!(ua.starts_with("gatehouse/"));
		let parts: Vec<&str> = ua.split('/').collect();
		assert_eq!(parts.len(), 2);
		assert!(!parts[1].is_empty());
	}

	#[test]
	fn builder_produces_client() {
		assert!(builder().build().is_ok());
	}

	#[test]
	fn insecure_builder_produces_client() {
		assert!(insecure_builder().build().is_ok());
	}

	#[test]
	fn builder_for_both_modes() {
		assert!(builder_for(true).build().is_ok());
		assert!(builder_for(false).build().is_ok());
	}
}
