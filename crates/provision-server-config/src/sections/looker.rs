// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Looker API connection settings.

use provision_common_config::SecretString;
use serde::Deserialize;

use crate::error::ConfigError;

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Looker connection (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct LookerConfig {
	pub base_url: String,
	pub client_id: String,
	pub client_secret: SecretString,
	pub verify_ssl: bool,
	pub timeout_secs: u64,
}

/// Looker configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookerConfigLayer {
	#[serde(default)]
	pub base_url: Option<String>,
	#[serde(default)]
	pub client_id: Option<String>,
	#[serde(default)]
	pub client_secret: Option<SecretString>,
	#[serde(default)]
	pub verify_ssl: Option<bool>,
	#[serde(default)]
	pub timeout_secs: Option<u64>,
}

impl LookerConfigLayer {
	pub fn merge(&mut self, other: LookerConfigLayer) {
		if other.base_url.is_some() {
			self.base_url = other.base_url;
		}
		if other.client_id.is_some() {
			self.client_id = other.client_id;
		}
		if other.client_secret.is_some() {
			self.client_secret = other.client_secret;
		}
		if other.verify_ssl.is_some() {
			self.verify_ssl = other.verify_ssl;
		}
		if other.timeout_secs.is_some() {
			self.timeout_secs = other.timeout_secs;
		}
	}

	pub fn finalize(self) -> Result<LookerConfig, ConfigError> {
		let base_url = self
			.base_url
			.filter(|s| !s.trim().is_empty())
			.ok_or_else(|| missing("base_url", "PROVISION_SERVER_LOOKER_BASE_URL"))?;
		let client_id = self
			.client_id
			.filter(|s| !s.trim().is_empty())
			.ok_or_else(|| missing("client_id", "PROVISION_SERVER_LOOKER_CLIENT_ID"))?;
		let client_secret = self
			.client_secret
			.ok_or_else(|| missing("client_secret", "PROVISION_SERVER_LOOKER_CLIENT_SECRET"))?;

		let timeout_secs = self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
		if timeout_secs == 0 {
			return Err(ConfigError::InvalidValue {
				key: "looker.timeout_secs".to_string(),
				message: "must be greater than zero".to_string(),
			});
		}

		Ok(LookerConfig {
			base_url,
			client_id,
			client_secret,
			verify_ssl: self.verify_ssl.unwrap_or(true),
			timeout_secs,
		})
	}
}

fn missing(field: &'static str, env: &str) -> ConfigError {
	ConfigError::Missing {
		key: format!("looker.{field}"),
		env: env.to_string(),
		section: "looker",
		field,
	}
}
