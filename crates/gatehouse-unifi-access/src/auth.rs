// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Session authentication against the controller.
//!
//! Controllers hand the session token back inconsistently: some firmware
//! versions set a response header, others a body field. Extraction is
//! modelled as an ordered list of sources tried in sequence so the lookup
//! stays visible and testable.

use std::fmt;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::credentials::ControllerCredentials;
use crate::error::AccessError;

/// Controller-relative path of the login exchange.
pub const LOGIN_PATH: &str = "/api/auth/login";

/// Header carrying the session token, on both login responses and outgoing
/// business requests.
pub const SESSION_TOKEN_HEADER: &str = "x-csrf-token";

/// Login response body field that may carry the token instead.
const TOKEN_BODY_FIELD: &str = "token";

/// Where a session token may be found in a login response.
#[derive(Debug, Clone, Copy)]
enum TokenSource {
	Header(&'static str),
	BodyField(&'static str),
}

/// Sources tried in priority order; first hit wins.
const TOKEN_SOURCES: &[TokenSource] = &[
	TokenSource::Header(SESSION_TOKEN_HEADER),
	TokenSource::BodyField(TOKEN_BODY_FIELD),
];

/// Opaque session token scoped to a single dispatch.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
	pub fn new(token: impl Into<String>) -> Self {
		Self(token.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Debug for SessionToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
	}
}

/// Extracts a session token from a login response, trying each source in
/// [`TOKEN_SOURCES`] order.
///
/// Returns `None` when no source yields a non-empty token; callers proceed
/// with an unauthenticated business call rather than treating this as fatal.
pub fn extract_session_token(headers: &HeaderMap, body: &Value) -> Option<SessionToken> {
	for source in TOKEN_SOURCES {
		let token = match source {
			TokenSource::Header(name) => headers
				.get(*name)
				.and_then(|value| value.to_str().ok())
				.map(str::to_owned),
			TokenSource::BodyField(field) => body
				.get(*field)
				.and_then(Value::as_str)
				.map(str::to_owned),
		};

		if let Some(token) = token {
			if !token.is_empty() {
				return Some(SessionToken::new(token));
			}
		}
	}

	None
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
	username: &'a str,
	password: &'a str,
}

/// Strategy for obtaining a session token before a business call.
///
/// The default [`PasswordLoginAuthenticator`] performs a fresh login on
/// every dispatch. Implementations that reuse sessions can be substituted
/// without touching dispatch call sites.
#[async_trait]
pub trait SessionAuthenticator: Send + Sync {
	/// Performs the authentication exchange.
	///
	/// `Ok(None)` means the exchange succeeded but yielded no recognizable
	/// token; the business call proceeds unauthenticated.
	///
	/// # Errors
	/// Returns [`AccessError::AuthenticationFailed`] when the exchange
	/// itself fails (network error or non-success status).
	async fn authenticate(
		&self,
		http: &reqwest::Client,
		credentials: &ControllerCredentials,
	) -> Result<Option<SessionToken>, AccessError>;
}

/// Username/password login against [`LOGIN_PATH`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordLoginAuthenticator;

#[async_trait]
impl SessionAuthenticator for PasswordLoginAuthenticator {
	async fn authenticate(
		&self,
		http: &reqwest::Client,
		credentials: &ControllerCredentials,
	) -> Result<Option<SessionToken>, AccessError> {
		let url = credentials.endpoint_url(LOGIN_PATH);
		let request = LoginRequest {
			username: &credentials.username,
			password: credentials.password.expose(),
		};

		debug!(url = %url, username = %credentials.username, "Logging in to controller");

		let response = http
			.post(&url)
			.json(&request)
			.send()
			.await
			.map_err(|e| {
				error!(error = %e, "Login exchange failed");
				AccessError::AuthenticationFailed {
					message: e.to_string(),
				}
			})?;

		let status = response.status();
		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			error!(status = %status, "Controller rejected login");
			return Err(AccessError::AuthenticationFailed {
				message: format!("{status} - {body}"),
			});
		}

		let headers = response.headers().clone();
		let body: Value = response.json().await.unwrap_or(Value::Null);

		let token = extract_session_token(&headers, &body);
		if token.is_none() {
			debug!("Login response carried no recognizable session token");
		}

		Ok(token)
	}
}
