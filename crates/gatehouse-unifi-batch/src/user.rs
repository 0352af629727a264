// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! User creation payloads.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Controller-relative path for user creation.
pub const USERS_PATH: &str = "/api/v1/developer/users";

const STATUS_ACTIVE: &str = "active";

/// Whether a user owns or rents their unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
	#[default]
	Owner,
	Renter,
}

/// Caller-supplied fields for one user.
///
/// Field names follow the workflow host's camelCase convention; optional
/// fields default to empty so sparse records deserialize cleanly.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserParams {
	pub first_name: String,
	pub last_name: String,
	pub email: String,
	#[serde(default)]
	pub unit_number: String,
	#[serde(default)]
	pub user_type: UserType,
	#[serde(default)]
	pub phone_number: String,
	#[serde(default)]
	pub pin_code: String,
	/// Comma-separated list of license plate numbers.
	#[serde(default)]
	pub license_plates: String,
}

/// Splits a comma-separated plate list, trimming whitespace around each
/// entry. Empty input yields an empty sequence.
pub fn parse_license_plates(raw: &str) -> Vec<String> {
	if raw.trim().is_empty() {
		return Vec::new();
	}
	raw.split(',').map(|plate| plate.trim().to_string()).collect()
}

#[derive(Debug, Serialize)]
struct UserMetadata {
	unit_number: String,
	user_type: UserType,
	phone_number: String,
	license_plates: Vec<String>,
}

/// Wire payload for `POST /api/v1/developer/users`.
#[derive(Debug, Serialize)]
pub struct CreateUserRequest {
	first_name: String,
	last_name: String,
	email: String,
	full_name: String,
	status: &'static str,
	/// Always null; group assignment is managed on the controller.
	user_group_id: Option<String>,
	metadata: UserMetadata,
	#[serde(skip_serializing_if = "Option::is_none")]
	access_code: Option<String>,
}

impl CreateUserRequest {
	pub fn from_params(params: &UserParams) -> Self {
		Self {
			first_name: params.first_name.clone(),
			last_name: params.last_name.clone(),
			email: params.email.clone(),
			full_name: format!("{} {}", params.first_name, params.last_name),
			status: STATUS_ACTIVE,
			user_group_id: None,
			metadata: UserMetadata {
				unit_number: params.unit_number.clone(),
				user_type: params.user_type,
				phone_number: params.phone_number.clone(),
				license_plates: parse_license_plates(&params.license_plates),
			},
			access_code: (!params.pin_code.is_empty()).then(|| params.pin_code.clone()),
		}
	}
}

/// Aggregates per-element bulk creation results into one record outcome.
pub fn aggregate_users(results: Vec<Value>) -> Value {
	json!({
		"count": results.len(),
		"users": results,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn params() -> UserParams {
		serde_json::from_value(json!({
			"firstName": "Ada",
			"lastName": "Lovelace",
			"email": "ada@example.com",
		}))
		.unwrap()
	}

	#[test]
	fn plates_split_and_trim() {
		assert_eq!(
			parse_license_plates("ABC123, XYZ 789"),
			vec!["ABC123".to_string(), "XYZ 789".to_string()]
		);
	}

	#[test]
	fn empty_plate_input_yields_empty_sequence() {
		assert!(parse_license_plates("").is_empty());
		assert!(parse_license_plates("   ").is_empty());
	}

	#[test]
	fn sparse_params_use_defaults() {
		let params = params();
		assert_eq!(params.user_type, UserType::Owner);
		assert!(params.unit_number.is_empty());
		assert!(params.pin_code.is_empty());
	}

	#[test]
	fn payload_synthesizes_full_name_and_status() {
		let request = CreateUserRequest::from_params(&params());
		let value = serde_json::to_value(&request).unwrap();

		assert_eq!(value["first_name"], "Ada");
		assert_eq!(value["full_name"], "Ada Lovelace");
		assert_eq!(value["status"], "active");
		assert_eq!(value["user_group_id"], Value::Null);
		assert_eq!(value["metadata"]["user_type"], "owner");
		assert_eq!(value["metadata"]["license_plates"], json!([]));
	}

	#[test]
	fn access_code_present_only_with_pin() {
		let without_pin = serde_json::to_value(CreateUserRequest::from_params(&params())).unwrap();
		assert!(without_pin.get("access_code").is_none());

		let with_pin: UserParams = serde_json::from_value(json!({
			"firstName": "Ada",
			"lastName": "Lovelace",
			"email": "ada@example.com",
			"pinCode": "4321",
		}))
		.unwrap();
		let value = serde_json::to_value(CreateUserRequest::from_params(&with_pin)).unwrap();
		assert_eq!(value["access_code"], "4321");
	}

	#[test]
	fn metadata_carries_all_optional_fields() {
		let full: UserParams = serde_json::from_value(json!({
			"firstName": "Grace",
			"lastName": "Hopper",
			"email": "grace@example.com",
			"unitNumber": "101",
			"userType": "renter",
			"phoneNumber": "555-1234",
			"licensePlates": "NAVY1,USS-1",
		}))
		.unwrap();

		let value = serde_json::to_value(CreateUserRequest::from_params(&full)).unwrap();
		assert_eq!(value["metadata"]["unit_number"], "101");
		assert_eq!(value["metadata"]["user_type"], "renter");
		assert_eq!(value["metadata"]["phone_number"], "555-1234");
		assert_eq!(value["metadata"]["license_plates"], json!(["NAVY1", "USS-1"]));
	}

	#[test]
	fn aggregate_reports_count() {
		let value = aggregate_users(vec![json!({"id": "u-1"}), json!({"id": "u-2"})]);
		assert_eq!(value["count"], 2);
		assert_eq!(value["users"][1]["id"], "u-2");
	}
}
