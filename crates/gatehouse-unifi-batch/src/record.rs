// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Input records and per-record outcomes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BatchError;

/// Controller resources this integration operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
	User,
	Visitor,
}

impl std::fmt::Display for Resource {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Resource::User => write!(f, "user"),
			Resource::Visitor => write!(f, "visitor"),
		}
	}
}

impl std::str::FromStr for Resource {
	type Err = BatchError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"user" => Ok(Resource::User),
			"visitor" => Ok(Resource::Visitor),
			_ => Err(BatchError::Validation(format!(
				"unknown resource '{s}', expected 'user' or 'visitor'"
			))),
		}
	}
}

/// Operations available on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
	Create,
	CreateMultiple,
}

impl std::fmt::Display for Operation {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Operation::Create => write!(f, "create"),
			Operation::CreateMultiple => write!(f, "createMultiple"),
		}
	}
}

impl std::str::FromStr for Operation {
	type Err = BatchError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"create" => Ok(Operation::Create),
			"createMultiple" => Ok(Operation::CreateMultiple),
			_ => Err(BatchError::Validation(format!(
				"unknown operation '{s}', expected 'create' or 'createMultiple'"
			))),
		}
	}
}

/// Returns whether this (resource, operation) pair has a handler.
pub fn is_supported(resource: Resource, operation: Operation) -> bool {
	!matches!((resource, operation), (Resource::Visitor, Operation::CreateMultiple))
}

/// One logical unit of work submitted by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchItem {
	pub resource: Resource,
	pub operation: Operation,
	/// Operation-specific fields, interpreted by the selected handler.
	#[serde(flatten)]
	pub params: Value,
}

impl BatchItem {
	pub fn new(resource: Resource, operation: Operation, params: Value) -> Self {
		Self {
			resource,
			operation,
			params,
		}
	}
}

/// Result of processing one input record, tagged with its input position.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RecordOutcome {
	Success {
		index: usize,
		output: Value,
	},
	Failed {
		index: usize,
		message: String,
		/// Work that completed before the failure, when any did (bulk user
		/// creation reports the users already created on the controller).
		#[serde(skip_serializing_if = "Option::is_none")]
		partial: Option<Value>,
	},
}

impl RecordOutcome {
	/// The originating input record's position.
	pub fn index(&self) -> usize {
		match self {
			RecordOutcome::Success { index, .. } | RecordOutcome::Failed { index, .. } => *index,
		}
	}

	pub fn is_success(&self) -> bool {
		matches!(self, RecordOutcome::Success { .. })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn batch_item_deserializes_with_flattened_params() {
		let item: BatchItem = serde_json::from_value(json!({
			"resource": "user",
			"operation": "create",
			"firstName": "Ada",
			"lastName": "Lovelace"
		}))
		.unwrap();

		assert_eq!(item.resource, Resource::User);
		assert_eq!(item.operation, Operation::Create);
		assert_eq!(item.params["firstName"], "Ada");
	}

	#[test]
	fn operation_uses_camel_case_on_the_wire() {
		let item: BatchItem = serde_json::from_value(json!({
			"resource": "user",
			"operation": "createMultiple",
			"users": "[]"
		}))
		.unwrap();

		assert_eq!(item.operation, Operation::CreateMultiple);
	}

	#[test]
	fn selectors_parse_and_display() {
		assert_eq!("user".parse::<Resource>().unwrap(), Resource::User);
		assert_eq!(
			"createMultiple".parse::<Operation>().unwrap(),
			Operation::CreateMultiple
		);
		assert_eq!(Resource::Visitor.to_string(), "visitor");
		assert_eq!(Operation::CreateMultiple.to_string(), "createMultiple");
		assert!("group".parse::<Resource>().is_err());
		assert!("delete".parse::<Operation>().is_err());
	}

	#[test]
	fn visitor_create_multiple_is_unsupported() {
		assert!(is_supported(Resource::User, Operation::Create));
		assert!(is_supported(Resource::User, Operation::CreateMultiple));
		assert!(is_supported(Resource::Visitor, Operation::Create));
		assert!(!is_supported(Resource::Visitor, Operation::CreateMultiple));
	}

	#[test]
	fn failed_outcome_serializes_without_null_partial() {
		let outcome = RecordOutcome::Failed {
			index: 2,
			message: "boom".to_string(),
			partial: None,
		};
		let value = serde_json::to_value(&outcome).unwrap();

		assert_eq!(value["status"], "failed");
		assert_eq!(value["index"], 2);
		assert!(value.get("partial").is_none());
	}
}
