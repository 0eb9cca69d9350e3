// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory stand-ins for the remote collaborators.
//!
//! Both fakes record every call so tests can assert exactly which remote
//! side effects a provisioning run produced.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::account::{Account, AccountId, EmailAddress, EmailCredential, NewAccount};
use crate::error::{PlatformError, SheetReadError};
use crate::platform::IdentityPlatform;
use crate::sheet::SpreadsheetReader;

/// One recorded call against [`FakePlatform`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlatformCall {
	Search(String),
	Create(String),
	AttachCredential(AccountId, String),
	SendPasswordReset(AccountId),
}

/// Which platform operation an injected failure applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlatformOperation {
	Search,
	Create,
	AttachCredential,
	SendPasswordReset,
}

#[derive(Default)]
struct PlatformState {
	accounts: Vec<Account>,
	credentials: HashMap<AccountId, String>,
	next_id: u64,
	calls: Vec<PlatformCall>,
	failures: HashMap<PlatformOperation, PlatformError>,
}

/// Identity platform backed by a vector of accounts.
#[derive(Default)]
pub struct FakePlatform {
	state: Mutex<PlatformState>,
}

impl FakePlatform {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds an existing account and returns its id. Seeding the same email
	/// twice produces the "more than one match" state the real platform never
	/// should.
	pub fn seed_account(&self, email: &str) -> AccountId {
		let mut state = self.lock();
		Self::insert(&mut state, email)
	}

	/// Makes every subsequent call to `operation` fail with `error`.
	pub fn fail_on(&self, operation: PlatformOperation, error: PlatformError) {
		self.lock().failures.insert(operation, error);
	}

	pub fn calls(&self) -> Vec<PlatformCall> {
		self.lock().calls.clone()
	}

	pub fn accounts(&self) -> Vec<Account> {
		self.lock().accounts.clone()
	}

	pub fn accounts_with_email(&self, email: &str) -> usize {
		self.lock()
			.accounts
			.iter()
			.filter(|a| a.email.as_deref() == Some(email))
			.count()
	}

	pub fn credential_for(&self, account_id: &AccountId) -> Option<String> {
		self.lock().credentials.get(account_id).cloned()
	}

	/// Ids that received a password-reset email, in call order.
	pub fn reset_emails_sent(&self) -> Vec<AccountId> {
		self.lock()
			.calls
			.iter()
			.filter_map(|c| match c {
				PlatformCall::SendPasswordReset(id) => Some(id.clone()),
				_ => None,
			})
			.collect()
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, PlatformState> {
		self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
	}

	fn insert(state: &mut PlatformState, email: &str) -> AccountId {
		state.next_id += 1;
		let id = AccountId::new(state.next_id.to_string());
		state.accounts.push(Account {
			id: id.clone(),
			email: Some(email.to_string()),
		});
		id
	}

	fn check(state: &PlatformState, operation: PlatformOperation) -> Result<(), PlatformError> {
		match state.failures.get(&operation) {
			Some(error) => Err(error.clone()),
			None => Ok(()),
		}
	}
}

#[async_trait]
impl IdentityPlatform for FakePlatform {
	async fn search_accounts(&self, email: &EmailAddress) -> Result<Vec<Account>, PlatformError> {
		let mut state = self.lock();
		state.calls.push(PlatformCall::Search(email.to_string()));
		Self::check(&state, PlatformOperation::Search)?;
		Ok(state
			.accounts
			.iter()
			.filter(|a| a.email.as_deref() == Some(email.as_str()))
			.cloned()
			.collect())
	}

	async fn create_account(&self, account: &NewAccount) -> Result<Account, PlatformError> {
		let mut state = self.lock();
		let email = account.credentials_email.email.clone();
		state.calls.push(PlatformCall::Create(email.clone()));
		Self::check(&state, PlatformOperation::Create)?;
		let id = Self::insert(&mut state, &email);
		state.credentials.insert(id.clone(), email.clone());
		Ok(Account {
			id,
			email: Some(email),
		})
	}

	async fn attach_email_credential(
		&self,
		account_id: &AccountId,
		credential: &EmailCredential,
	) -> Result<(), PlatformError> {
		let mut state = self.lock();
		state.calls.push(PlatformCall::AttachCredential(
			account_id.clone(),
			credential.email.clone(),
		));
		Self::check(&state, PlatformOperation::AttachCredential)?;
		if !state.accounts.iter().any(|a| &a.id == account_id) {
			return Err(PlatformError::NotFound(format!("user {account_id}")));
		}
		state
			.credentials
			.insert(account_id.clone(), credential.email.clone());
		Ok(())
	}

	async fn send_password_reset_email(&self, account_id: &AccountId) -> Result<(), PlatformError> {
		let mut state = self.lock();
		state
			.calls
			.push(PlatformCall::SendPasswordReset(account_id.clone()));
		Self::check(&state, PlatformOperation::SendPasswordReset)?;
		if !state.accounts.iter().any(|a| &a.id == account_id) {
			return Err(PlatformError::NotFound(format!("user {account_id}")));
		}
		Ok(())
	}
}

/// Spreadsheet returning fixed rows for any range.
pub struct FakeSpreadsheet {
	result: Result<Vec<Vec<String>>, SheetReadError>,
	reads: Mutex<Vec<(String, String)>>,
}

impl FakeSpreadsheet {
	pub fn with_rows<R, C>(rows: R) -> Self
	where
		R: IntoIterator<Item = C>,
		C: IntoIterator,
		C::Item: Into<String>,
	{
		let rows = rows
			.into_iter()
			.map(|row| row.into_iter().map(Into::into).collect())
			.collect();
		Self {
			result: Ok(rows),
			reads: Mutex::new(Vec::new()),
		}
	}

	pub fn failing(error: SheetReadError) -> Self {
		Self {
			result: Err(error),
			reads: Mutex::new(Vec::new()),
		}
	}

	/// `(spreadsheet_id, range)` pairs read so far.
	pub fn reads(&self) -> Vec<(String, String)> {
		self.reads
			.lock()
			.unwrap_or_else(|poisoned| poisoned.into_inner())
			.clone()
	}
}

#[async_trait]
impl SpreadsheetReader for FakeSpreadsheet {
	async fn read_range(
		&self,
		spreadsheet_id: &str,
		range: &str,
	) -> Result<Vec<Vec<String>>, SheetReadError> {
		self.reads
			.lock()
			.unwrap_or_else(|poisoned| poisoned.into_inner())
			.push((spreadsheet_id.to_string(), range.to_string()));
		self.result.clone()
	}
}
