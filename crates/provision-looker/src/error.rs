// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Errors raised while constructing a Looker client.
//!
//! Per-call failures are reported as [`provision_common_core::PlatformError`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookerClientError {
	#[error("invalid Looker base URL '{url}': {message}")]
	InvalidBaseUrl { url: String, message: String },

	#[error("failed to build HTTP client: {0}")]
	Http(#[from] reqwest::Error),
}
