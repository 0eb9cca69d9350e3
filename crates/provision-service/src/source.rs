// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Where emails to provision come from.

use std::sync::Arc;

use provision_common_core::{EmailAddress, SheetReadError, SpreadsheetReader};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::MalformedRequestError;

/// Extracts the email from a `{"email": "..."}` request body.
///
/// The content type is not inspected; the body only has to parse as JSON.
pub fn extract_email(body: &[u8]) -> Result<EmailAddress, MalformedRequestError> {
	let value: Value = serde_json::from_slice(body)
		.map_err(|e| MalformedRequestError::InvalidJson(e.to_string()))?;

	let object = value.as_object().ok_or(MalformedRequestError::NotAnObject)?;
	let email = object
		.get("email")
		.ok_or(MalformedRequestError::MissingEmail)?
		.as_str()
		.ok_or(MalformedRequestError::EmailNotString)?;

	Ok(EmailAddress::parse(email)?)
}

/// First cell of every row whose first cell is present and not blank.
pub fn emails_from_rows(rows: Vec<Vec<String>>) -> Vec<EmailAddress> {
	rows.into_iter()
		.filter_map(|row| row.into_iter().next())
		.filter_map(|cell| EmailAddress::parse(cell).ok())
		.collect()
}

/// A single-column range of a spreadsheet holding one email per row.
#[derive(Clone)]
pub struct SheetEmailSource {
	reader: Arc<dyn SpreadsheetReader>,
	spreadsheet_id: String,
	range: String,
}

impl SheetEmailSource {
	pub fn new(
		reader: Arc<dyn SpreadsheetReader>,
		spreadsheet_id: impl Into<String>,
		range: impl Into<String>,
	) -> Self {
		Self {
			reader,
			spreadsheet_id: spreadsheet_id.into(),
			range: range.into(),
		}
	}

	pub fn spreadsheet_id(&self) -> &str {
		&self.spreadsheet_id
	}

	pub fn range(&self) -> &str {
		&self.range
	}

	/// Emails in sheet order. An empty range gives an empty list.
	#[instrument(skip(self), fields(spreadsheet_id = %self.spreadsheet_id, range = %self.range))]
	pub async fn extract_emails(&self) -> Result<Vec<EmailAddress>, SheetReadError> {
		let rows = self
			.reader
			.read_range(&self.spreadsheet_id, &self.range)
			.await?;
		let row_count = rows.len();
		let emails = emails_from_rows(rows);

		debug!(row_count, email_count = emails.len(), "emails extracted from spreadsheet");
		Ok(emails)
	}
}
