// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

/// Errors raised while constructing a Sheets client.
///
/// Read failures are reported as [`provision_common_core::SheetReadError`].
#[derive(Debug, Error)]
pub enum SheetsClientError {
	#[error("invalid Sheets base URL '{url}': {message}")]
	InvalidBaseUrl { url: String, message: String },

	#[error("failed to build HTTP client: {0}")]
	Http(#[from] reqwest::Error),
}
