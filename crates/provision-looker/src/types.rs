// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Looker configuration and wire types.

use std::time::Duration;

use provision_common_core::{Account, AccountId};
use provision_common_secret::SecretString;
use serde::Deserialize;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Connection settings for a Looker instance.
#[derive(Debug, Clone)]
pub struct LookerConfig {
	/// Instance URL, e.g. `https://example.cloud.looker.com`. The `/api/4.0`
	/// prefix is appended by the client.
	pub base_url: String,
	pub client_id: String,
	pub client_secret: SecretString,
	/// Disable only for self-hosted instances with private certificates.
	pub verify_ssl: bool,
	pub timeout: Duration,
}

impl LookerConfig {
	pub fn new(
		base_url: impl Into<String>,
		client_id: impl Into<String>,
		client_secret: SecretString,
	) -> Self {
		Self {
			base_url: base_url.into(),
			client_id: client_id.into(),
			client_secret,
			verify_ssl: true,
			timeout: DEFAULT_TIMEOUT,
		}
	}
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
	pub access_token: String,
	#[serde(default)]
	pub expires_in: Option<u64>,
}

/// Looker ids are strings in API 4.0; older instances still send numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum LookerId {
	Text(String),
	Number(i64),
}

impl LookerId {
	fn into_account_id(self) -> AccountId {
		match self {
			LookerId::Text(id) => AccountId::new(id),
			LookerId::Number(id) => AccountId::new(id.to_string()),
		}
	}
}

#[derive(Debug, Deserialize)]
pub(crate) struct LookerUser {
	pub id: LookerId,
	#[serde(default)]
	pub email: Option<String>,
}

impl From<LookerUser> for Account {
	fn from(user: LookerUser) -> Self {
		Account {
			id: user.id.into_account_id(),
			email: user.email,
		}
	}
}

#[derive(Debug, Deserialize)]
pub(crate) struct LookerApiError {
	pub message: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn user_with_string_id() {
		let user: LookerUser = serde_json::from_str(r#"{"id":"42","email":"a@b.com"}"#).unwrap();
		let account = Account::from(user);
		assert_eq!(account.id, AccountId::new("42"));
		assert_eq!(account.email.as_deref(), Some("a@b.com"));
	}

	#[test]
	fn user_with_numeric_id_and_no_email() {
		let user: LookerUser = serde_json::from_str(r#"{"id":7}"#).unwrap();
		let account = Account::from(user);
		assert_eq!(account.id, AccountId::new("7"));
		assert!(account.email.is_none());
	}

	#[test]
	fn config_defaults() {
		let config = LookerConfig::new(
			"https://looker.example.com",
			"id",
			SecretString::new("secret".to_string()),
		);
		assert!(config.verify_ssl);
		assert_eq!(config.timeout, DEFAULT_TIMEOUT);
	}
}
