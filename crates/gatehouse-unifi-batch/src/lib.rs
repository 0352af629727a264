// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Batch user and visitor operations against a UniFi Access controller.
//!
//! This crate maps logical input records onto controller API payloads and
//! drives them through a [`UnifiDispatch`] implementation one at a time, in
//! input order, producing exactly one outcome per record. Failure tolerance
//! is a per-batch switch: either an error is recorded as that record's
//! outcome and processing continues, or the first error aborts the batch.

pub mod error;
pub mod executor;
pub mod record;
pub mod user;
pub mod visitor;

pub use error::BatchError;
pub use executor::BatchExecutor;
pub use record::{BatchItem, Operation, RecordOutcome, Resource};
pub use user::{parse_license_plates, UserParams, UserType, USERS_PATH};
pub use visitor::{generate_pin, VisitorParams, GENERATED_PIN_FIELD, VISITORS_PATH};

pub use gatehouse_unifi_access::UnifiDispatch;
