// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Accounts as seen from this service.
//!
//! Accounts are owned by the identity platform; nothing here is persisted.
//! The platform enforces one account per email.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BlankEmail;

/// An email address, passed verbatim to the identity platform.
///
/// The only local rule is that it is not blank. Format validation is left to
/// the platform, which is authoritative.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
	pub fn parse(value: impl Into<String>) -> Result<Self, BlankEmail> {
		let value = value.into();
		if value.trim().is_empty() {
			return Err(BlankEmail);
		}
		Ok(Self(value))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for EmailAddress {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for EmailAddress {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

/// Opaque account identifier assigned by the identity platform.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for AccountId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
	pub id: AccountId,
	pub email: Option<String>,
}

/// Email/password credential attached to an account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EmailCredential {
	pub email: String,
	pub forced_password_reset_at_next_login: bool,
}

impl EmailCredential {
	/// Credential for `email` without a forced reset at next login.
	pub fn new(email: &EmailAddress) -> Self {
		Self {
			email: email.as_str().to_string(),
			forced_password_reset_at_next_login: false,
		}
	}
}

/// Body of an account-creation request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewAccount {
	pub credentials_email: EmailCredential,
	pub is_disabled: bool,
	pub models_dir_validated: bool,
}

impl NewAccount {
	/// Enabled account with an email credential and no validated models dir.
	pub fn for_email(email: &EmailAddress) -> Self {
		Self {
			credentials_email: EmailCredential::new(email),
			is_disabled: false,
			models_dir_validated: false,
		}
	}
}
