// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Lookup-then-branch provisioning of a single email.

use std::fmt;
use std::sync::Arc;

use provision_common_core::{EmailAddress, EmailCredential, IdentityPlatform, NewAccount};
use tracing::{info, instrument, warn};

use crate::error::{ProvisioningError, ProvisioningStep};

/// Outcome of provisioning one email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisioningResult {
	/// A user already existed; a password reset email was sent.
	ResetSent(EmailAddress),
	/// A new user was created and sent the setup email.
	CreatedAndWelcomed(EmailAddress),
}

impl ProvisioningResult {
	pub fn email(&self) -> &EmailAddress {
		match self {
			ProvisioningResult::ResetSent(email) | ProvisioningResult::CreatedAndWelcomed(email) => {
				email
			}
		}
	}
}

impl fmt::Display for ProvisioningResult {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ProvisioningResult::ResetSent(email) => write!(
				f,
				"A user with this email: {email} already existed; Password reset sent."
			),
			ProvisioningResult::CreatedAndWelcomed(email) => {
				write!(f, "New user created; Setup/Welcome email sent to {email}.")
			}
		}
	}
}

/// Counts for a sequential run over several emails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
	pub created: usize,
	pub reset: usize,
	/// Result of the last email processed, if any.
	pub last: Option<ProvisioningResult>,
}

impl BatchSummary {
	pub fn processed(&self) -> usize {
		self.created + self.reset
	}

	fn record(&mut self, result: ProvisioningResult) {
		match result {
			ProvisioningResult::ResetSent(_) => self.reset += 1,
			ProvisioningResult::CreatedAndWelcomed(_) => self.created += 1,
		}
		self.last = Some(result);
	}
}

/// Ensures one Looker user per email and sends exactly one notification.
///
/// Idempotence rests on the platform's one-user-per-email guarantee: a second
/// run for the same email finds the user and only sends a reset email.
#[derive(Clone)]
pub struct ProvisioningWorkflow {
	platform: Arc<dyn IdentityPlatform>,
}

impl ProvisioningWorkflow {
	pub fn new(platform: Arc<dyn IdentityPlatform>) -> Self {
		Self { platform }
	}

	#[instrument(skip(self), fields(email = %email))]
	pub async fn provision(
		&self,
		email: &EmailAddress,
	) -> Result<ProvisioningResult, ProvisioningError> {
		let accounts = self
			.platform
			.search_accounts(email)
			.await
			.map_err(ProvisioningError::at(ProvisioningStep::Lookup))?;

		if accounts.len() > 1 {
			warn!(
				matches = accounts.len(),
				"identity platform returned several users for one email, using the first"
			);
		}

		if let Some(existing) = accounts.into_iter().next() {
			self.platform
				.send_password_reset_email(&existing.id)
				.await
				.map_err(ProvisioningError::at(ProvisioningStep::SendEmail))?;

			info!(user_id = %existing.id, "existing user found, password reset sent");
			return Ok(ProvisioningResult::ResetSent(email.clone()));
		}

		let created = self
			.platform
			.create_account(&NewAccount::for_email(email))
			.await
			.map_err(ProvisioningError::at(ProvisioningStep::Create))?;

		self.platform
			.attach_email_credential(&created.id, &EmailCredential::new(email))
			.await
			.map_err(ProvisioningError::at(ProvisioningStep::AttachCredential))?;

		self.platform
			.send_password_reset_email(&created.id)
			.await
			.map_err(ProvisioningError::at(ProvisioningStep::SendEmail))?;

		info!(user_id = %created.id, "user created, setup email sent");
		Ok(ProvisioningResult::CreatedAndWelcomed(email.clone()))
	}

	/// Provisions each email in order, stopping at the first failure.
	///
	/// Nothing is rolled back: users provisioned before the failing email keep
	/// their accounts and notifications.
	pub async fn provision_each(
		&self,
		emails: &[EmailAddress],
	) -> Result<BatchSummary, ProvisioningError> {
		let mut summary = BatchSummary::default();

		for email in emails {
			match self.provision(email).await {
				Ok(result) => summary.record(result),
				Err(e) => {
					warn!(
						email = %email,
						processed = summary.processed(),
						remaining = emails.len() - summary.processed(),
						"aborting batch after provisioning failure"
					);
					return Err(e);
				}
			}
		}

		Ok(summary)
	}
}
