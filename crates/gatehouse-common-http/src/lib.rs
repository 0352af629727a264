// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for Gatehouse.
//!
//! This crate provides a pre-configured HTTP client with a consistent
//! User-Agent header, including a variant that skips TLS certificate
//! verification for controllers running with self-signed certificates.

mod client;

pub use client::{
	builder, builder_for, insecure_builder, new_client, new_client_with_timeout, user_agent,
};
