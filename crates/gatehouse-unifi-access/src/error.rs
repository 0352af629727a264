// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Error types for the UniFi Access controller client.

use thiserror::Error;

/// Errors that can occur when interacting with the controller API.
#[derive(Debug, Error)]
pub enum AccessError {
	/// Missing or invalid client configuration. Never retried.
	#[error("Configuration error: {0}")]
	Configuration(String),

	/// The login exchange itself failed (network error or non-success
	/// status). Fatal to the dispatch that triggered it.
	#[error("Authentication failed: {message}")]
	AuthenticationFailed { message: String },

	/// Network-level error during the business request.
	#[error("Network error: {0}")]
	Network(#[from] reqwest::Error),

	/// The controller returned a non-success status for a business request.
	#[error("Controller API error: {status} - {body}")]
	Api { status: u16, body: String },

	/// The controller returned a body that could not be parsed.
	#[error("Invalid response from controller: {0}")]
	InvalidResponse(String),
}
