// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Error types for batch execution.

use serde_json::{json, Value};
use thiserror::Error;

use gatehouse_unifi_access::AccessError;

use crate::record::{Operation, Resource};

/// Errors that can occur while executing a batch.
#[derive(Debug, Error)]
pub enum BatchError {
	/// A (resource, operation) pair with no handler. Surfaced before any
	/// record is processed.
	#[error("Operation '{operation}' is not supported for resource '{resource}'")]
	UnsupportedOperation {
		resource: Resource,
		operation: Operation,
	},

	/// Malformed record input, e.g. an unparseable bulk `users` payload.
	#[error("Invalid input: {0}")]
	Validation(String),

	/// An element of a bulk user creation failed after earlier elements had
	/// already been created on the controller. The created results ride
	/// along so callers can reconcile the partial remote state; nothing is
	/// rolled back.
	#[error("user at position {position} failed after {} users were created: {source}", .created.len())]
	BulkUser {
		created: Vec<Value>,
		position: usize,
		#[source]
		source: Box<BatchError>,
	},

	/// Controller call failure, propagated with its diagnostic payload.
	#[error(transparent)]
	Api(#[from] AccessError),
}

impl BatchError {
	/// Work that had already completed when this error occurred, in the
	/// same shape as the operation's success output.
	pub fn partial_output(&self) -> Option<Value> {
		match self {
			BatchError::BulkUser { created, .. } if !created.is_empty() => Some(json!({
				"users": created,
				"count": created.len(),
			})),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unsupported_operation_names_both_selectors() {
		let err = BatchError::UnsupportedOperation {
			resource: Resource::Visitor,
			operation: Operation::CreateMultiple,
		};
		let message = err.to_string();
		assert!(message.contains("visitor"));
		assert!(message.contains("createMultiple"));
	}

	#[test]
	fn bulk_error_reports_progress() {
		let err = BatchError::BulkUser {
			created: vec![json!({"id": "u-1"})],
			position: 1,
			source: Box::new(BatchError::Validation("bad email".to_string())),
		};

		let message = err.to_string();
		assert!(message.contains("position 1"));
		assert!(message.contains("1 users were created"));

		let partial = err.partial_output().unwrap();
		assert_eq!(partial["count"], 1);
	}

	#[test]
	fn partial_output_is_none_when_nothing_was_created() {
		let err = BatchError::BulkUser {
			created: Vec::new(),
			position: 0,
			source: Box::new(BatchError::Validation("bad email".to_string())),
		};
		assert!(err.partial_output().is_none());
		assert!(BatchError::Validation("x".to_string()).partial_output().is_none());
	}
}
