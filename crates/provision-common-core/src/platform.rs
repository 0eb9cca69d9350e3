// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;

use crate::account::{Account, AccountId, EmailAddress, EmailCredential, NewAccount};
use crate::error::PlatformError;

/// User-management operations of the identity platform.
///
/// Implementations are constructed once at startup and shared behind an
/// `Arc`; every call is an independent remote request.
#[async_trait]
pub trait IdentityPlatform: Send + Sync {
	/// Accounts whose email matches exactly. The platform allows at most one.
	async fn search_accounts(&self, email: &EmailAddress) -> Result<Vec<Account>, PlatformError>;

	async fn create_account(&self, account: &NewAccount) -> Result<Account, PlatformError>;

	async fn attach_email_credential(
		&self,
		account_id: &AccountId,
		credential: &EmailCredential,
	) -> Result<(), PlatformError>;

	/// Sends the password-reset email, which doubles as the setup email for
	/// accounts that have never logged in.
	async fn send_password_reset_email(&self, account_id: &AccountId) -> Result<(), PlatformError>;
}
