// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Google Sheets API v4 client for reading email lists.
//!
//! Implements [`provision_common_core::SpreadsheetReader`]. Credentials are
//! abstracted behind [`TokenSource`] so the runtime service account
//! ([`AdcTokenSource`]) can be swapped for an explicit token.

pub mod auth;
pub mod client;
pub mod error;
pub mod types;

pub use auth::{AdcTokenSource, StaticTokenSource, TokenSource, SHEETS_READONLY_SCOPE};
pub use client::SheetsClient;
pub use error::SheetsClientError;
pub use types::SheetsConfig;
