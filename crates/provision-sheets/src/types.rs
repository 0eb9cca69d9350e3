// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct SheetsConfig {
	pub base_url: String,
	pub timeout: Duration,
}

impl Default for SheetsConfig {
	fn default() -> Self {
		Self {
			base_url: DEFAULT_BASE_URL.to_string(),
			timeout: DEFAULT_TIMEOUT,
		}
	}
}

/// `spreadsheets.values.get` response. `values` is omitted for empty ranges.
#[derive(Debug, Deserialize)]
pub(crate) struct ValueRange {
	#[serde(default)]
	pub values: Option<Vec<Vec<serde_json::Value>>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GoogleErrorBody {
	pub error: GoogleErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GoogleErrorDetail {
	pub message: String,
}

/// Text of a cell as the sheet displays it.
pub(crate) fn cell_text(value: serde_json::Value) -> String {
	match value {
		serde_json::Value::String(s) => s,
		serde_json::Value::Null => String::new(),
		other => other.to_string(),
	}
}
