// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Visitor creation payloads and access-code generation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Controller-relative path for visitor creation.
pub const VISITORS_PATH: &str = "/api/v1/developer/visitors";

/// Outcome field carrying the generated access code back to the caller.
pub const GENERATED_PIN_FIELD: &str = "generated_pin";

const STATUS_ACTIVE: &str = "active";
const DEFAULT_PURPOSE: &str = "Delivery";

/// Caller-supplied fields for one visitor.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorParams {
	pub first_name: String,
	pub last_name: String,
	#[serde(default = "default_purpose")]
	pub purpose: String,
	#[serde(default)]
	pub email: String,
}

fn default_purpose() -> String {
	DEFAULT_PURPOSE.to_string()
}

/// Generates a 6-digit visitor access code, uniformly in [100000, 999999].
pub fn generate_pin() -> String {
	fastrand::u32(100_000..=999_999).to_string()
}

/// Wire payload for `POST /api/v1/developer/visitors`.
#[derive(Debug, Serialize)]
pub struct CreateVisitorRequest {
	first_name: String,
	last_name: String,
	full_name: String,
	purpose: String,
	access_code: String,
	status: &'static str,
	#[serde(skip_serializing_if = "Option::is_none")]
	email: Option<String>,
}

impl CreateVisitorRequest {
	pub fn from_params(params: &VisitorParams, access_code: &str) -> Self {
		Self {
			first_name: params.first_name.clone(),
			last_name: params.last_name.clone(),
			full_name: format!("{} {}", params.first_name, params.last_name),
			purpose: params.purpose.clone(),
			access_code: access_code.to_string(),
			status: STATUS_ACTIVE,
			email: (!params.email.is_empty()).then(|| params.email.clone()),
		}
	}
}

/// Attaches the generated access code to the controller's response, so the
/// caller always learns the code even when the controller does not echo it.
pub fn augment_with_pin(result: Value, pin: &str) -> Value {
	match result {
		Value::Object(mut map) => {
			map.insert(
				GENERATED_PIN_FIELD.to_string(),
				Value::String(pin.to_string()),
			);
			Value::Object(map)
		}
		other => {
			let mut map = serde_json::Map::new();
			map.insert("response".to_string(), other);
			map.insert(
				GENERATED_PIN_FIELD.to_string(),
				Value::String(pin.to_string()),
			);
			Value::Object(map)
		}
	}
}
