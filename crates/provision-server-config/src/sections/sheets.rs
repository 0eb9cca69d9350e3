// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Spreadsheet email source.

use provision_common_config::SecretString;
use serde::Deserialize;

use crate::error::ConfigError;

/// All cells in column B of the first sheet.
pub const DEFAULT_RANGE: &str = "Sheet1!B:B";
const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Spreadsheet source (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct SheetsConfig {
	/// Key from the sheet URL: `https://docs.google.com/spreadsheets/d/<id>/edit`.
	pub spreadsheet_id: Option<String>,
	pub range: String,
	pub base_url: String,
	/// Explicit OAuth token; Application Default Credentials are used when unset.
	pub access_token: Option<SecretString>,
	pub timeout_secs: u64,
}

impl SheetsConfig {
	pub fn is_configured(&self) -> bool {
		self.spreadsheet_id.is_some()
	}
}

impl Default for SheetsConfig {
	fn default() -> Self {
		Self {
			spreadsheet_id: None,
			range: DEFAULT_RANGE.to_string(),
			base_url: DEFAULT_BASE_URL.to_string(),
			access_token: None,
			timeout_secs: DEFAULT_TIMEOUT_SECS,
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SheetsConfigLayer {
	#[serde(default)]
	pub spreadsheet_id: Option<String>,
	#[serde(default)]
	pub range: Option<String>,
	#[serde(default)]
	pub base_url: Option<String>,
	#[serde(default)]
	pub access_token: Option<SecretString>,
	#[serde(default)]
	pub timeout_secs: Option<u64>,
}

impl SheetsConfigLayer {
	pub fn merge(&mut self, other: SheetsConfigLayer) {
		if other.spreadsheet_id.is_some() {
			self.spreadsheet_id = other.spreadsheet_id;
		}
		if other.range.is_some() {
			self.range = other.range;
		}
		if other.base_url.is_some() {
			self.base_url = other.base_url;
		}
		if other.access_token.is_some() {
			self.access_token = other.access_token;
		}
		if other.timeout_secs.is_some() {
			self.timeout_secs = other.timeout_secs;
		}
	}

	pub fn finalize(self) -> Result<SheetsConfig, ConfigError> {
		let timeout_secs = self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
		if timeout_secs == 0 {
			return Err(ConfigError::InvalidValue {
				key: "sheets.timeout_secs".to_string(),
				message: "must be greater than zero".to_string(),
			});
		}

		Ok(SheetsConfig {
			spreadsheet_id: self.spreadsheet_id.filter(|s| !s.trim().is_empty()),
			range: self.range.unwrap_or_else(|| DEFAULT_RANGE.to_string()),
			base_url: self
				.base_url
				.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
			access_token: self.access_token,
			timeout_secs,
		})
	}
}
