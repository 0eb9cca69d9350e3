// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Looker user provisioning.
//!
//! [`ProvisioningWorkflow`] makes sure exactly one Looker user exists for an
//! email and that it receives one notification: a password reset for an
//! existing user, or a setup email for a freshly created one. Emails come
//! from a request body ([`extract_email`]) or a spreadsheet column
//! ([`SheetEmailSource`]).

pub mod error;
pub mod source;
pub mod workflow;

pub use error::{MalformedRequestError, ProvisioningError, ProvisioningStep};
pub use source::{emails_from_rows, extract_email, SheetEmailSource};
pub use workflow::{BatchSummary, ProvisioningResult, ProvisioningWorkflow};
