// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for provisioning Looker users.
//!
//! The provisioning workflow talks to two remote collaborators through the
//! traits defined here: an [`IdentityPlatform`] (Looker's user API) and a
//! [`SpreadsheetReader`] (Google Sheets). Concrete HTTP clients live in their
//! own crates; the `testing` feature provides in-memory fakes.

pub mod account;
pub mod error;
pub mod platform;
pub mod sheet;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use account::*;
pub use error::*;
pub use platform::*;
pub use sheet::*;
