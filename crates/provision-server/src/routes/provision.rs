// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Provisioning entry points: one email from a request body, or every email
//! in the configured spreadsheet range.

use axum::{
	body::Bytes,
	extract::{rejection::BytesRejection, State},
};
use provision_service::{extract_email, MalformedRequestError};
use tracing::{info, instrument};

use crate::error::{Endpoint, HandlerError, HandlerFailure};
use crate::AppState;

/// Body returned when the spreadsheet range holds no emails.
pub const NO_EMAILS_TEXT: &str = "No emails found in spreadsheet; no users processed.";

/// POST / - provision the email in a `{"email": "..."}` body.
///
/// The body is parsed as JSON regardless of its declared content type. A body
/// that cannot be buffered (too large, aborted) gets the same reply as bad JSON.
#[instrument(skip_all)]
pub async fn provision_direct(
	State(state): State<AppState>,
	body: Result<Bytes, BytesRejection>,
) -> Result<String, HandlerFailure> {
	let body = body.map_err(|rejection| {
		HandlerError::from(MalformedRequestError::UnreadableBody(rejection.body_text()))
			.on(Endpoint::Direct)
	})?;

	let email = extract_email(&body)
		.map_err(|e| HandlerError::from(e).on(Endpoint::Direct))?;

	let result = state
		.workflow
		.provision(&email)
		.await
		.map_err(|e| HandlerError::from(e).on(Endpoint::Direct))?;

	Ok(result.to_string())
}

/// GET /sheet - provision every email in the spreadsheet range, in order.
///
/// Responds with the status of the last email only. The first failure aborts
/// the run; emails before it stay provisioned.
#[instrument(skip_all)]
pub async fn provision_from_sheet(State(state): State<AppState>) -> Result<String, HandlerFailure> {
	let source = state
		.sheet_source
		.as_ref()
		.ok_or_else(|| HandlerError::NotConfigured.on(Endpoint::Sheet))?;

	let emails = source
		.extract_emails()
		.await
		.map_err(|e| HandlerError::from(e).on(Endpoint::Sheet))?;

	if emails.is_empty() {
		info!(
			spreadsheet_id = %source.spreadsheet_id(),
			range = %source.range(),
			"spreadsheet range is empty, nothing to provision"
		);
		return Ok(NO_EMAILS_TEXT.to_string());
	}

	let summary = state
		.workflow
		.provision_each(&emails)
		.await
		.map_err(|e| HandlerError::from(e).on(Endpoint::Sheet))?;

	info!(
		spreadsheet_id = %source.spreadsheet_id(),
		processed = summary.processed(),
		created = summary.created,
		reset = summary.reset,
		"spreadsheet provisioning complete"
	);

	Ok(summary
		.last
		.map(|result| result.to_string())
		.unwrap_or_else(|| NO_EMAILS_TEXT.to_string()))
}
