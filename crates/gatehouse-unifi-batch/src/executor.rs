// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Sequential batch execution over input records.

use serde_json::Value;
use tracing::{debug, error, instrument, warn};

use gatehouse_unifi_access::{Method, UnifiDispatch};

use crate::error::BatchError;
use crate::record::{is_supported, BatchItem, Operation, RecordOutcome, Resource};
use crate::user::{aggregate_users, CreateUserRequest, UserParams, USERS_PATH};
use crate::visitor::{
	augment_with_pin, generate_pin, CreateVisitorRequest, VisitorParams, VISITORS_PATH,
};

/// Drives batches of records through a [`UnifiDispatch`] implementation.
///
/// Records are processed one at a time, in input order; every record yields
/// exactly one [`RecordOutcome`] at its input position.
pub struct BatchExecutor<D: UnifiDispatch> {
	dispatch: D,
	continue_on_fail: bool,
}

impl<D: UnifiDispatch> BatchExecutor<D> {
	pub fn new(dispatch: D) -> Self {
		Self {
			dispatch,
			continue_on_fail: false,
		}
	}

	/// Record per-record errors as outcomes and keep processing, instead of
	/// aborting the batch on the first failure.
	pub fn with_continue_on_fail(mut self, continue_on_fail: bool) -> Self {
		self.continue_on_fail = continue_on_fail;
		self
	}

	/// Runs the batch.
	///
	/// Selectors are validated for all records up front, before any
	/// controller call is issued; an unsupported (resource, operation) pair
	/// aborts the whole batch regardless of failure tolerance.
	#[instrument(skip(self, items), fields(records = items.len(), continue_on_fail = self.continue_on_fail))]
	pub async fn run(&self, items: &[BatchItem]) -> Result<Vec<RecordOutcome>, BatchError> {
		for item in items {
			if !is_supported(item.resource, item.operation) {
				return Err(BatchError::UnsupportedOperation {
					resource: item.resource,
					operation: item.operation,
				});
			}
		}

		let mut outcomes = Vec::with_capacity(items.len());
		for (index, item) in items.iter().enumerate() {
			debug!(index, resource = %item.resource, operation = %item.operation, "Processing record");

			match self.process(item).await {
				Ok(output) => outcomes.push(RecordOutcome::Success { index, output }),
				Err(err) if self.continue_on_fail => {
					warn!(index, error = %err, "Record failed, continuing with next record");
					let partial = err.partial_output();
					outcomes.push(RecordOutcome::Failed {
						index,
						message: err.to_string(),
						partial,
					});
				}
				Err(err) => {
					error!(index, error = %err, "Record failed, aborting batch");
					return Err(err);
				}
			}
		}

		Ok(outcomes)
	}

	async fn process(&self, item: &BatchItem) -> Result<Value, BatchError> {
		match (item.resource, item.operation) {
			(Resource::User, Operation::Create) => self.create_user(&item.params).await,
			(Resource::User, Operation::CreateMultiple) => self.create_users(&item.params).await,
			(Resource::Visitor, Operation::Create) => self.create_visitor(&item.params).await,
			(resource, operation) => Err(BatchError::UnsupportedOperation {
				resource,
				operation,
			}),
		}
	}

	async fn create_user(&self, params: &Value) -> Result<Value, BatchError> {
		let params: UserParams = serde_json::from_value(params.clone())
			.map_err(|e| BatchError::Validation(format!("invalid user parameters: {e}")))?;

		self.post_user(&params).await
	}

	async fn create_users(&self, params: &Value) -> Result<Value, BatchError> {
		let entries = parse_users_param(params)?;

		let mut created = Vec::with_capacity(entries.len());
		for (position, entry) in entries.iter().enumerate() {
			let result = match serde_json::from_value::<UserParams>(entry.clone()) {
				Ok(params) => self.post_user(&params).await,
				Err(e) => Err(BatchError::Validation(format!(
					"invalid user at position {position}: {e}"
				))),
			};

			match result {
				Ok(value) => created.push(value),
				Err(source) => {
					return Err(BatchError::BulkUser {
						created,
						position,
						source: Box::new(source),
					});
				}
			}
		}

		Ok(aggregate_users(created))
	}

	async fn create_visitor(&self, params: &Value) -> Result<Value, BatchError> {
		let params: VisitorParams = serde_json::from_value(params.clone())
			.map_err(|e| BatchError::Validation(format!("invalid visitor parameters: {e}")))?;

		let pin = generate_pin();
		let request = CreateVisitorRequest::from_params(&params, &pin);
		let body = encode(&request)?;

		let result = self.dispatch.dispatch(Method::POST, VISITORS_PATH, &body).await?;
		Ok(augment_with_pin(result, &pin))
	}

	async fn post_user(&self, params: &UserParams) -> Result<Value, BatchError> {
		let request = CreateUserRequest::from_params(params);
		let body = encode(&request)?;

		Ok(self.dispatch.dispatch(Method::POST, USERS_PATH, &body).await?)
	}
}

fn encode<T: serde::Serialize>(request: &T) -> Result<Value, BatchError> {
	serde_json::to_value(request)
		.map_err(|e| BatchError::Validation(format!("failed to encode payload: {e}")))
}

/// Interprets the bulk `users` parameter.
///
/// The workflow host hands the list as a JSON-encoded string; a pre-parsed
/// array is also accepted for callers composing records programmatically.
fn parse_users_param(params: &Value) -> Result<Vec<Value>, BatchError> {
	let users = match params.get("users") {
		Some(Value::String(raw)) => serde_json::from_str(raw).map_err(|_| {
			BatchError::Validation("users parameter must be valid JSON".to_string())
		})?,
		Some(value) => value.clone(),
		None => {
			return Err(BatchError::Validation(
				"users parameter is required".to_string(),
			))
		}
	};

	match users {
		Value::Array(entries) => Ok(entries),
		_ => Err(BatchError::Validation(
			"users parameter must be an array".to_string(),
		)),
	}
}
