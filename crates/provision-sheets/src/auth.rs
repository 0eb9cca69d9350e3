// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Access-token sources for the Sheets API.

use std::sync::Arc;

use async_trait::async_trait;
use gcp_auth::TokenProvider;
use provision_common_core::SheetReadError;
use provision_common_secret::SecretString;
use tokio::sync::OnceCell;
use tracing::{debug, error};

/// Read-only access to spreadsheets.
pub const SHEETS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";

/// Supplies OAuth access tokens for Google API calls.
#[async_trait]
pub trait TokenSource: Send + Sync {
	async fn access_token(&self) -> Result<SecretString, SheetReadError>;
}

/// Application Default Credentials: the runtime service account on Google
/// Cloud, or `GOOGLE_APPLICATION_CREDENTIALS` / gcloud user credentials
/// elsewhere.
///
/// The provider is discovered on first use; `gcp_auth` caches and refreshes
/// tokens itself.
#[derive(Default)]
pub struct AdcTokenSource {
	provider: OnceCell<Arc<dyn TokenProvider>>,
}

impl AdcTokenSource {
	pub fn new() -> Self {
		Self::default()
	}

	async fn provider(&self) -> Result<&Arc<dyn TokenProvider>, SheetReadError> {
		self.provider
			.get_or_try_init(|| async {
				debug!("Initializing GCP authentication provider");
				gcp_auth::provider().await.map_err(|e| {
					error!(error = %e, "Failed to initialize GCP auth");
					SheetReadError::Auth(format!("GCP auth initialization failed: {e}"))
				})
			})
			.await
	}
}

#[async_trait]
impl TokenSource for AdcTokenSource {
	async fn access_token(&self) -> Result<SecretString, SheetReadError> {
		let provider = self.provider().await?;
		let token = provider.token(&[SHEETS_READONLY_SCOPE]).await.map_err(|e| {
			error!(error = %e, "Failed to get GCP access token");
			SheetReadError::Auth(format!("GCP token acquisition failed: {e}"))
		})?;
		Ok(SecretString::new(token.as_str().to_string()))
	}
}

/// A fixed, externally obtained access token.
#[derive(Clone)]
pub struct StaticTokenSource {
	token: SecretString,
}

impl StaticTokenSource {
	pub fn new(token: SecretString) -> Self {
		Self { token }
	}
}

#[async_trait]
impl TokenSource for StaticTokenSource {
	async fn access_token(&self) -> Result<SecretString, SheetReadError> {
		Ok(self.token.clone())
	}
}
