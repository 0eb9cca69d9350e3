// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared HTTP client with a consistent User-Agent header.
//!
//! Every outbound call (Looker API, Google Sheets API) is made through a
//! client built here so remote audit logs can attribute traffic to this
//! service and its version.

use reqwest::{Client, ClientBuilder};

/// Returns the User-Agent string: `provision-server/{version} ({os}-{arch})`.
pub fn user_agent() -> String {
	format!(
		"provision-server/{} ({}-{})",
		env!("CARGO_PKG_VERSION"),
		std::env::consts::OS,
		std::env::consts::ARCH
	)
}

/// Client builder preloaded with the standard User-Agent.
///
/// Use this when the client needs customization (timeouts, TLS settings).
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}
