// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Handler error types and their plain-text responses.
//!
//! Callers only ever see one fixed sentence per endpoint with a `200 OK`.
//! The actual cause goes to the log.

use axum::{
	http::{header, StatusCode},
	response::{IntoResponse, Response},
};
use provision_common_core::SheetReadError;
use provision_looker::LookerClientError;
use provision_service::{MalformedRequestError, ProvisioningError, ProvisioningStep};
use provision_sheets::SheetsClientError;

/// Body returned by the direct endpoint on any failure.
pub const DIRECT_FAILURE_TEXT: &str = r#"Please provide JSON in the format of {"email":"test@test.com"}"#;

/// Body returned by the spreadsheet endpoint on any failure.
pub const SHEET_FAILURE_TEXT: &str = "An error occurred.";

/// Which entry point a request came through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
	Direct,
	Sheet,
}

impl Endpoint {
	pub fn as_str(&self) -> &'static str {
		match self {
			Endpoint::Direct => "direct",
			Endpoint::Sheet => "sheet",
		}
	}

	pub fn failure_text(&self) -> &'static str {
		match self {
			Endpoint::Direct => DIRECT_FAILURE_TEXT,
			Endpoint::Sheet => SHEET_FAILURE_TEXT,
		}
	}
}

/// Everything that can go wrong while serving a provisioning request.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
	#[error("malformed request: {0}")]
	MalformedRequest(#[from] MalformedRequestError),

	#[error(transparent)]
	Provisioning(#[from] ProvisioningError),

	#[error("spreadsheet read failed: {0}")]
	SpreadsheetRead(#[from] SheetReadError),

	#[error("spreadsheet source is not configured (set PROVISION_SERVER_SHEETS_SPREADSHEET_ID)")]
	NotConfigured,
}

impl HandlerError {
	/// Stable label for log queries.
	pub fn kind(&self) -> &'static str {
		match self {
			HandlerError::MalformedRequest(_) => "malformed_request",
			HandlerError::Provisioning(_) => "remote_provisioning",
			HandlerError::SpreadsheetRead(_) => "spreadsheet_read",
			HandlerError::NotConfigured => "not_configured",
		}
	}

	pub fn step(&self) -> Option<ProvisioningStep> {
		match self {
			HandlerError::Provisioning(e) => Some(e.step()),
			_ => None,
		}
	}

	pub fn on(self, endpoint: Endpoint) -> HandlerFailure {
		HandlerFailure {
			endpoint,
			error: self,
		}
	}
}

/// A [`HandlerError`] bound to the endpoint whose literal it must render.
#[derive(Debug)]
pub struct HandlerFailure {
	pub endpoint: Endpoint,
	pub error: HandlerError,
}

impl IntoResponse for HandlerFailure {
	fn into_response(self) -> Response {
		let endpoint = self.endpoint.as_str();
		let kind = self.error.kind();
		match self.error.step() {
			Some(step) => tracing::error!(
				endpoint,
				kind,
				step = step.as_str(),
				error = %self.error,
				"provisioning request failed"
			),
			None => tracing::error!(
				endpoint,
				kind,
				error = %self.error,
				"provisioning request failed"
			),
		}

		(
			StatusCode::OK,
			[(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
			self.endpoint.failure_text(),
		)
			.into_response()
	}
}

/// Failures while wiring up clients at startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
	#[error("failed to build Looker client: {0}")]
	Looker(#[from] LookerClientError),

	#[error("failed to build Sheets client: {0}")]
	Sheets(#[from] SheetsClientError),
}

#[cfg(test)]
mod tests {
	use super::*;
	use provision_common_core::PlatformError;

	fn remote(step: ProvisioningStep) -> HandlerError {
		HandlerError::Provisioning(ProvisioningError::Remote {
			step,
			source: PlatformError::Timeout,
		})
	}

	#[test]
	fn kinds() {
		assert_eq!(
			HandlerError::from(MalformedRequestError::MissingEmail).kind(),
			"malformed_request"
		);
		assert_eq!(remote(ProvisioningStep::Create).kind(), "remote_provisioning");
		assert_eq!(
			HandlerError::from(SheetReadError::Auth("denied".to_string())).kind(),
			"spreadsheet_read"
		);
		assert_eq!(HandlerError::NotConfigured.kind(), "not_configured");
	}

	#[test]
	fn step_only_for_remote_failures() {
		assert_eq!(
			remote(ProvisioningStep::SendEmail).step(),
			Some(ProvisioningStep::SendEmail)
		);
		assert_eq!(HandlerError::NotConfigured.step(), None);
	}

	#[test]
	fn failure_is_ok_with_endpoint_literal() {
		let response = remote(ProvisioningStep::Lookup)
			.on(Endpoint::Direct)
			.into_response();
		assert_eq!(response.status(), StatusCode::OK);
		assert_eq!(
			response.headers()[header::CONTENT_TYPE],
			"text/plain; charset=utf-8"
		);
	}

	#[test]
	fn literals() {
		assert_eq!(
			Endpoint::Direct.failure_text(),
			"Please provide JSON in the format of {\"email\":\"test@test.com\"}"
		);
		assert_eq!(Endpoint::Sheet.failure_text(), "An error occurred.");
	}
}
