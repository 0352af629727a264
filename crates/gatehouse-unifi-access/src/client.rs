// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Controller client and request dispatch.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, error, instrument, warn};

use crate::auth::{PasswordLoginAuthenticator, SessionAuthenticator, SessionToken, SESSION_TOKEN_HEADER};
use crate::credentials::ControllerCredentials;
use crate::error::AccessError;

/// Per-call overrides merged onto the business request.
#[derive(Debug, Clone, Default)]
pub struct DispatchOptions {
	/// Overrides the client-level timeout for this call only.
	pub timeout: Option<Duration>,
	/// Extra headers appended after the standard set, so a caller-supplied
	/// header replaces a standard one of the same name.
	pub headers: Vec<(String, String)>,
}

/// Dispatch seam consumed by operation executors.
///
/// One `dispatch` call is one full authenticate-then-call cycle against the
/// controller.
#[async_trait]
pub trait UnifiDispatch: Send + Sync {
	/// Issues `method path` with a JSON `body` against the controller.
	async fn dispatch(&self, method: Method, path: &str, body: &Value)
		-> Result<Value, AccessError>;
}

/// Client for the UniFi Access developer API.
///
/// Holds one HTTP client built with the credential's TLS policy, so the
/// certificate-verification choice applies uniformly to the login exchange
/// and every business call.
pub struct UnifiClient<A: SessionAuthenticator = PasswordLoginAuthenticator> {
	http: reqwest::Client,
	credentials: ControllerCredentials,
	authenticator: A,
}

impl UnifiClient<PasswordLoginAuthenticator> {
	/// Creates a client that performs a fresh password login per dispatch.
	pub fn new(credentials: ControllerCredentials) -> Result<Self, AccessError> {
		Self::with_authenticator(credentials, PasswordLoginAuthenticator)
	}
}

impl<A: SessionAuthenticator> UnifiClient<A> {
	/// Creates a client with a custom authentication strategy.
	pub fn with_authenticator(
		credentials: ControllerCredentials,
		authenticator: A,
	) -> Result<Self, AccessError> {
		let http = gatehouse_common_http::builder_for(credentials.allow_unauthorized_certs)
			.build()
			.map_err(|e| AccessError::Configuration(format!("failed to build HTTP client: {e}")))?;

		Ok(Self {
			http,
			credentials,
			authenticator,
		})
	}

	pub fn credentials(&self) -> &ControllerCredentials {
		&self.credentials
	}

	/// Dispatches one call with query parameters and per-call overrides.
	///
	/// Exactly one authentication attempt precedes exactly one business
	/// request; failures propagate immediately with no retry.
	#[instrument(skip(self, body, query, options), fields(method = %method, path = %path))]
	pub async fn dispatch_with(
		&self,
		method: Method,
		path: &str,
		body: &Value,
		query: &[(&str, &str)],
		options: &DispatchOptions,
	) -> Result<Value, AccessError> {
		let token = self
			.authenticator
			.authenticate(&self.http, &self.credentials)
			.await?;

		let url = self.credentials.endpoint_url(path);
		debug!(url = %url, authenticated = token.is_some(), "Dispatching controller request");

		let mut request = self
			.http
			.request(method, &url)
			.headers(business_headers(token.as_ref()));

		if !query.is_empty() {
			request = request.query(query);
		}
		if let Some(timeout) = options.timeout {
			request = request.timeout(timeout);
		}
		for (name, value) in &options.headers {
			request = request.header(name, value);
		}

		let response = request
			.json(body)
			.send()
			.await
			.map_err(AccessError::Network)?;

		let status = response.status();
		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			error!(status = status.as_u16(), body = %body, "Controller API error");
			return Err(AccessError::Api {
				status: status.as_u16(),
				body,
			});
		}

		let text = response.text().await.map_err(AccessError::Network)?;
		if text.is_empty() {
			return Ok(Value::Null);
		}

		serde_json::from_str(&text)
			.map_err(|e| AccessError::InvalidResponse(format!("JSON parse error: {e}")))
	}
}

#[async_trait]
impl<A: SessionAuthenticator> UnifiDispatch for UnifiClient<A> {
	async fn dispatch(
		&self,
		method: Method,
		path: &str,
		body: &Value,
	) -> Result<Value, AccessError> {
		self.dispatch_with(method, path, body, &[], &DispatchOptions::default())
			.await
	}
}

/// Builds the standard business-request header set: JSON content type plus
/// the session token when one was obtained.
fn business_headers(token: Option<&SessionToken>) -> HeaderMap {
	let mut headers = HeaderMap::new();
	headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

	if let Some(token) = token {
		match HeaderValue::from_str(token.as_str()) {
			Ok(value) => {
				headers.insert(SESSION_TOKEN_HEADER, value);
			}
			Err(_) => {
				warn!("Session token contains invalid header characters, sending unauthenticated");
			}
		}
	}

	headers
}

#[cfg(test)]
mod tests {
	use super::*;
	use gatehouse_common_config::SecretString;

	fn credentials() -> ControllerCredentials {
		ControllerCredentials::new(
			"https://controller.example:12445",
			"ops",
			SecretString::new("hunter2".to_string()),
		)
		.unwrap()
	}

	#[test]
	fn business_headers_without_token() {
		let headers = business_headers(None);
		assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
		assert!(headers.get(SESSION_TOKEN_HEADER).is_none());
	}

	#[test]
	fn business_headers_with_token() {
		let token = SessionToken::new("csrf-abc123");
		let headers = business_headers(Some(&token));
		assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
		assert_eq!(headers.get(SESSION_TOKEN_HEADER).unwrap(), "csrf-abc123");
	}

	#[test]
	fn business_headers_drop_unencodable_token() {
		let token = SessionToken::new("bad\ntoken");
		let headers = business_headers(Some(&token));
		assert!(headers.get(SESSION_TOKEN_HEADER).is_none());
	}

	#[test]
	fn client_builds_for_both_tls_modes() {
		assert!(UnifiClient::new(credentials()).is_ok());
		assert!(UnifiClient::new(credentials().with_allow_unauthorized_certs(true)).is_ok());
	}

	#[test]
	fn dispatch_options_default_is_empty() {
		let options = DispatchOptions::default();
		assert!(options.timeout.is_none());
		assert!(options.headers.is_empty());
	}
}
