// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt;

use provision_common_core::{BlankEmail, PlatformError};

/// The remote call that failed during provisioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisioningStep {
	Lookup,
	Create,
	AttachCredential,
	SendEmail,
}

impl ProvisioningStep {
	pub fn as_str(&self) -> &'static str {
		match self {
			ProvisioningStep::Lookup => "lookup",
			ProvisioningStep::Create => "create",
			ProvisioningStep::AttachCredential => "attach_credential",
			ProvisioningStep::SendEmail => "send_email",
		}
	}
}

impl fmt::Display for ProvisioningStep {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Errors that can occur during user provisioning.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProvisioningError {
	#[error("identity platform call failed at step {step}: {source}")]
	Remote {
		step: ProvisioningStep,
		#[source]
		source: PlatformError,
	},
}

impl ProvisioningError {
	pub(crate) fn at(step: ProvisioningStep) -> impl FnOnce(PlatformError) -> Self {
		move |source| ProvisioningError::Remote { step, source }
	}

	/// The remote call that failed.
	pub fn step(&self) -> ProvisioningStep {
		match self {
			ProvisioningError::Remote { step, .. } => *step,
		}
	}
}

/// Request body that is not `{"email": "<non-blank string>"}`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedRequestError {
	#[error("request body could not be read: {0}")]
	UnreadableBody(String),

	#[error("request body is not valid JSON: {0}")]
	InvalidJson(String),

	#[error("request body is not a JSON object")]
	NotAnObject,

	#[error("request body has no \"email\" field")]
	MissingEmail,

	#[error("\"email\" field is not a string")]
	EmailNotString,

	#[error(transparent)]
	BlankEmail(#[from] BlankEmail),
}
