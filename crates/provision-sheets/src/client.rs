// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Sheets API client implementation.

use std::sync::Arc;

use async_trait::async_trait;
use provision_common_core::{SheetReadError, SpreadsheetReader};
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, error, instrument, trace};

use crate::auth::TokenSource;
use crate::error::SheetsClientError;
use crate::types::{cell_text, GoogleErrorBody, SheetsConfig, ValueRange};

/// Reads cell ranges with `spreadsheets.values.get`.
#[derive(Clone)]
pub struct SheetsClient {
	http_client: Client,
	base_url: Url,
	tokens: Arc<dyn TokenSource>,
}

impl std::fmt::Debug for SheetsClient {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SheetsClient")
			.field("base_url", &self.base_url.as_str())
			.finish_non_exhaustive()
	}
}

impl SheetsClient {
	pub fn new(config: SheetsConfig, tokens: Arc<dyn TokenSource>) -> Result<Self, SheetsClientError> {
		let base_url = Url::parse(&config.base_url).map_err(|e| SheetsClientError::InvalidBaseUrl {
			url: config.base_url.clone(),
			message: e.to_string(),
		})?;
		if base_url.cannot_be_a_base() {
			return Err(SheetsClientError::InvalidBaseUrl {
				url: config.base_url,
				message: "URL cannot be a base".to_string(),
			});
		}

		let http_client = provision_common_http::builder()
			.timeout(config.timeout)
			.build()?;

		Ok(Self {
			http_client,
			base_url,
			tokens,
		})
	}

	fn values_url(&self, spreadsheet_id: &str, range: &str) -> Url {
		let mut url = self.base_url.clone();
		// Checked in `new`: the base URL can carry path segments.
		if let Ok(mut path) = url.path_segments_mut() {
			path.pop_if_empty()
				.extend(["v4", "spreadsheets", spreadsheet_id, "values", range]);
		}
		url
	}
}

#[async_trait]
impl SpreadsheetReader for SheetsClient {
	#[instrument(skip(self), fields(spreadsheet_id = %spreadsheet_id, range = %range))]
	async fn read_range(
		&self,
		spreadsheet_id: &str,
		range: &str,
	) -> Result<Vec<Vec<String>>, SheetReadError> {
		let token = self.tokens.access_token().await?;
		let url = self.values_url(spreadsheet_id, range);
		debug!(url = %url, "Reading spreadsheet range");

		let response = self
			.http_client
			.get(url)
			.query(&[("majorDimension", "ROWS")])
			.bearer_auth(token.expose())
			.send()
			.await
			.map_err(|e| {
				error!(error = %e, "Network error during Sheets request");
				SheetReadError::Network(e.to_string())
			})?;

		let status = response.status();
		debug!(status = %status, "Received response from Sheets");

		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			let message = serde_json::from_str::<GoogleErrorBody>(&body)
				.map(|e| e.error.message)
				.unwrap_or(body);
			error!(status = status.as_u16(), message = %message, "Sheets API error");

			return Err(match status {
				StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SheetReadError::Auth(message),
				StatusCode::NOT_FOUND => SheetReadError::NotFound(message),
				_ => SheetReadError::Api {
					status: status.as_u16(),
					message,
				},
			});
		}

		let body = response.text().await.map_err(|e| {
			error!(error = %e, "Failed to read response body");
			SheetReadError::Network(e.to_string())
		})?;
		trace!(body = %body, "Response body");

		let value_range: ValueRange = serde_json::from_str(&body).map_err(|e| {
			error!(error = %e, "Failed to parse Sheets response");
			SheetReadError::InvalidResponse(format!("JSON parse error: {e}"))
		})?;

		let rows: Vec<Vec<String>> = value_range
			.values
			.unwrap_or_default()
			.into_iter()
			.map(|row| row.into_iter().map(cell_text).collect())
			.collect();

		debug!(row_count = rows.len(), "Spreadsheet range read");
		Ok(rows)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::auth::StaticTokenSource;
	use provision_common_secret::SecretString;

	fn client(base_url: &str) -> Result<SheetsClient, SheetsClientError> {
		let tokens = Arc::new(StaticTokenSource::new(SecretString::new("t".to_string())));
		SheetsClient::new(
			SheetsConfig {
				base_url: base_url.to_string(),
				..Default::default()
			},
			tokens,
		)
	}

	#[test]
	fn range_is_percent_encoded_as_one_segment() {
		let client = client("https://sheets.googleapis.com").unwrap();
		let url = client.values_url("abc123", "Sheet 1!B:B");
		assert_eq!(
			url.as_str(),
			"https://sheets.googleapis.com/v4/spreadsheets/abc123/values/Sheet%201!B:B"
		);
	}

	#[test]
	fn rejects_non_base_url() {
		assert!(matches!(
			client("mailto:someone@example.com"),
			Err(SheetsClientError::InvalidBaseUrl { .. })
		));
	}
}
