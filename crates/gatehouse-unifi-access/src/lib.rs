// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! UniFi Access controller API client for Gatehouse.
//!
//! This crate provides a typed Rust client for a UniFi Access controller,
//! encapsulating the session login exchange, token propagation, and error
//! normalization for the developer API.
//!
//! Every dispatched call performs a fresh login exchange and attaches the
//! resulting session token to the business request. Sessions are
//! deliberately not cached across calls; the authenticator seam
//! ([`SessionAuthenticator`]) exists so a reusing strategy can be swapped in
//! without touching call sites.

pub mod auth;
pub mod client;
pub mod credentials;
pub mod error;

pub use auth::{
	extract_session_token, PasswordLoginAuthenticator, SessionAuthenticator, SessionToken,
	LOGIN_PATH, SESSION_TOKEN_HEADER,
};
pub use client::{DispatchOptions, UnifiClient, UnifiDispatch};
pub use credentials::ControllerCredentials;
pub use error::AccessError;

// Re-exported so downstream crates name HTTP verbs without a direct reqwest
// dependency.
pub use reqwest::Method;
