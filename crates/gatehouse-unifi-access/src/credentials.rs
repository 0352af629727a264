// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Controller coordinates and login credentials.

use std::env;

use gatehouse_common_config::{require_secret_env, SecretString};
use url::Url;

use crate::error::AccessError;

/// Environment variable holding the controller base URL.
pub const ENV_HOST: &str = "GATEHOUSE_UNIFI_HOST";
/// Environment variable holding the login username.
pub const ENV_USERNAME: &str = "GATEHOUSE_UNIFI_USERNAME";
/// Environment variable holding the login password (supports `_FILE`).
pub const ENV_PASSWORD: &str = "GATEHOUSE_UNIFI_PASSWORD";
/// Environment variable toggling TLS certificate verification.
pub const ENV_ALLOW_UNAUTHORIZED_CERTS: &str = "GATEHOUSE_UNIFI_ALLOW_UNAUTHORIZED_CERTS";

/// Coordinates and credentials for one controller.
///
/// Immutable for the lifetime of an executor run. The password is a
/// [`SecretString`], so `Debug` output stays safe to log.
#[derive(Debug, Clone)]
pub struct ControllerCredentials {
	pub host: Url,
	pub username: String,
	pub password: SecretString,
	pub allow_unauthorized_certs: bool,
}

impl ControllerCredentials {
	/// Creates credentials for the controller at `host`.
	pub fn new(
		host: &str,
		username: impl Into<String>,
		password: SecretString,
	) -> Result<Self, AccessError> {
		let host = Url::parse(host)
			.map_err(|e| AccessError::Configuration(format!("invalid controller host '{host}': {e}")))?;
		Ok(Self {
			host,
			username: username.into(),
			password,
			allow_unauthorized_certs: false,
		})
	}

	/// Accept any TLS certificate presented by the controller.
	///
	/// Applies uniformly to the login exchange and every business call
	/// issued with these credentials.
	pub fn with_allow_unauthorized_certs(mut self, allow: bool) -> Self {
		self.allow_unauthorized_certs = allow;
		self
	}

	/// Loads credentials from the environment.
	///
	/// Reads `GATEHOUSE_UNIFI_HOST`, `GATEHOUSE_UNIFI_USERNAME`,
	/// `GATEHOUSE_UNIFI_PASSWORD` (or `GATEHOUSE_UNIFI_PASSWORD_FILE`), and
	/// `GATEHOUSE_UNIFI_ALLOW_UNAUTHORIZED_CERTS`.
	pub fn from_env() -> Result<Self, AccessError> {
		let host = env::var(ENV_HOST)
			.map_err(|_| AccessError::Configuration(format!("{ENV_HOST} is not set")))?;
		let username = env::var(ENV_USERNAME)
			.map_err(|_| AccessError::Configuration(format!("{ENV_USERNAME} is not set")))?;
		let password = require_secret_env(ENV_PASSWORD)
			.map_err(|e| AccessError::Configuration(e.to_string()))?;
		let allow_unauthorized_certs = env::var(ENV_ALLOW_UNAUTHORIZED_CERTS)
			.map(|v| env_flag(&v))
			.unwrap_or(false);

		Ok(Self::new(&host, username, password)?
			.with_allow_unauthorized_certs(allow_unauthorized_certs))
	}

	/// Builds an absolute URL for a controller-relative path.
	///
	/// Paths are joined by concatenation so a controller mounted under a
	/// URL prefix keeps that prefix.
	pub fn endpoint_url(&self, path: &str) -> String {
		format!("{}{}", self.host.as_str().trim_end_matches('/'), path)
	}
}

fn env_flag(value: &str) -> bool {
	matches!(
		value.trim().to_ascii_lowercase().as_str(),
		"1" | "true" | "yes" | "on"
	)
}
