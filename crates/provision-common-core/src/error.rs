// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

/// Failure of a single call to the identity platform.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PlatformError {
	#[error("network error: {0}")]
	Network(String),

	#[error("request timed out")]
	Timeout,

	#[error("authentication with the identity platform failed")]
	Unauthorized,

	#[error("not found: {0}")]
	NotFound(String),

	#[error("identity platform error: {status} - {message}")]
	Api { status: u16, message: String },

	#[error("invalid response from identity platform: {0}")]
	InvalidResponse(String),
}

/// Failure to read a cell range from the spreadsheet service.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SheetReadError {
	#[error("spreadsheet authentication failed: {0}")]
	Auth(String),

	#[error("spreadsheet or range not found: {0}")]
	NotFound(String),

	#[error("network error: {0}")]
	Network(String),

	#[error("spreadsheet API error: {status} - {message}")]
	Api { status: u16, message: String },

	#[error("invalid response from spreadsheet API: {0}")]
	InvalidResponse(String),
}

/// An email value that is empty or whitespace only.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("email address must not be blank")]
pub struct BlankEmail;
