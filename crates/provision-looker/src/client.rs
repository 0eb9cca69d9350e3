// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Looker API client implementation.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use provision_common_core::{
	Account, AccountId, EmailAddress, EmailCredential, IdentityPlatform, NewAccount, PlatformError,
};
use provision_common_secret::SecretString;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument, trace, warn};

use crate::error::LookerClientError;
use crate::types::{LoginResponse, LookerApiError, LookerConfig, LookerUser};

const API_VERSION: &str = "4.0";
const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 3600;
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

struct CachedToken {
	token: SecretString,
	expires_at: Instant,
}

/// Client for Looker's user-management endpoints.
///
/// The session token is obtained lazily on the first call and reused until
/// shortly before it expires.
#[derive(Clone)]
pub struct LookerClient {
	http_client: Client,
	api_base: Url,
	client_id: String,
	client_secret: SecretString,
	cached_token: Arc<RwLock<Option<CachedToken>>>,
}

impl std::fmt::Debug for LookerClient {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("LookerClient")
			.field("api_base", &self.api_base.as_str())
			.field("client_id", &self.client_id)
			.finish_non_exhaustive()
	}
}

impl LookerClient {
	pub fn new(config: LookerConfig) -> Result<Self, LookerClientError> {
		let api_base = api_base_url(&config.base_url)?;

		let http_client = provision_common_http::builder()
			.timeout(config.timeout)
			.danger_accept_invalid_certs(!config.verify_ssl)
			.build()?;

		if !config.verify_ssl {
			warn!(base_url = %config.base_url, "TLS certificate verification disabled for Looker");
		}

		info!(api_base = %api_base, client_id = %config.client_id, "Initialized Looker client");

		Ok(Self {
			http_client,
			api_base,
			client_id: config.client_id,
			client_secret: config.client_secret,
			cached_token: Arc::new(RwLock::new(None)),
		})
	}

	fn endpoint(&self, segments: &[&str]) -> Url {
		let mut url = self.api_base.clone();
		// api_base always has a path, so path_segments_mut cannot fail.
		if let Ok(mut path) = url.path_segments_mut() {
			path.pop_if_empty().extend(segments);
		}
		url
	}

	async fn access_token(&self) -> Result<SecretString, PlatformError> {
		{
			let cached = self.cached_token.read().await;
			if let Some(ref token) = *cached {
				if token.expires_at > Instant::now() + TOKEN_REFRESH_MARGIN {
					return Ok(token.token.clone());
				}
			}
		}

		let mut cached = self.cached_token.write().await;
		// Another task may have logged in while we waited for the lock.
		if let Some(ref token) = *cached {
			if token.expires_at > Instant::now() + TOKEN_REFRESH_MARGIN {
				return Ok(token.token.clone());
			}
		}

		let login = self.login().await?;
		let lifetime = Duration::from_secs(login.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS));
		let token = SecretString::new(login.access_token);
		*cached = Some(CachedToken {
			token: token.clone(),
			expires_at: Instant::now() + lifetime,
		});

		Ok(token)
	}

	#[instrument(skip(self), fields(client_id = %self.client_id))]
	async fn login(&self) -> Result<LoginResponse, PlatformError> {
		let url = self.endpoint(&["login"]);
		debug!(url = %url, "Logging in to Looker");

		let response = self
			.http_client
			.post(url)
			.form(&[
				("client_id", self.client_id.as_str()),
				("client_secret", self.client_secret.expose().as_str()),
			])
			.send()
			.await
			.map_err(transport_error)?;

		let response = check_status(response).await?;
		decode(response).await
	}

	async fn invalidate_token(&self) {
		*self.cached_token.write().await = None;
	}

	/// Sends an authenticated request and checks the status. A rejected token
	/// is dropped from the cache so the next call logs in again.
	async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response, PlatformError> {
		let token = self.access_token().await?;
		let response = request
			.header(AUTHORIZATION, format!("token {}", token.expose()))
			.send()
			.await
			.map_err(transport_error)?;

		match check_status(response).await {
			Err(PlatformError::Unauthorized) => {
				self.invalidate_token().await;
				Err(PlatformError::Unauthorized)
			}
			other => other,
		}
	}
}

#[async_trait]
impl IdentityPlatform for LookerClient {
	#[instrument(skip(self), fields(email = %email))]
	async fn search_accounts(&self, email: &EmailAddress) -> Result<Vec<Account>, PlatformError> {
		let url = self.endpoint(&["users", "search"]);
		let request = self
			.http_client
			.get(url)
			.query(&[("email", email.as_str()), ("fields", "id,email")]);

		let response = self.send(request).await?;
		let users: Vec<LookerUser> = decode(response).await?;
		let hits = users.len();

		// The search treats `_` and `%` as wildcards; keep exact matches only.
		let accounts: Vec<Account> = users
			.into_iter()
			.map(Account::from)
			.filter(|account| {
				account
					.email
					.as_deref()
					.is_some_and(|found| found.eq_ignore_ascii_case(email.as_str()))
			})
			.collect();

		debug!(hits, matches = accounts.len(), "Looker user search completed");
		Ok(accounts)
	}

	#[instrument(skip(self, account), fields(email = %account.credentials_email.email))]
	async fn create_account(&self, account: &NewAccount) -> Result<Account, PlatformError> {
		let url = self.endpoint(&["users"]);
		let response = self.send(self.http_client.post(url).json(account)).await?;
		let user: LookerUser = decode(response).await?;
		let account = Account::from(user);

		info!(user_id = %account.id, "Created Looker user");
		Ok(account)
	}

	#[instrument(skip(self, credential), fields(user_id = %account_id))]
	async fn attach_email_credential(
		&self,
		account_id: &AccountId,
		credential: &EmailCredential,
	) -> Result<(), PlatformError> {
		let url = self.endpoint(&["users", account_id.as_str(), "credentials_email"]);
		self.send(self.http_client.post(url).json(credential)).await?;

		debug!("Attached email credentials");
		Ok(())
	}

	#[instrument(skip(self), fields(user_id = %account_id))]
	async fn send_password_reset_email(&self, account_id: &AccountId) -> Result<(), PlatformError> {
		let url = self.endpoint(&[
			"users",
			account_id.as_str(),
			"credentials_email",
			"send_password_reset",
		]);
		self.send(self.http_client.post(url)).await?;

		debug!("Password reset email requested");
		Ok(())
	}
}

fn api_base_url(base_url: &str) -> Result<Url, LookerClientError> {
	let mut url = Url::parse(base_url).map_err(|e| LookerClientError::InvalidBaseUrl {
		url: base_url.to_string(),
		message: e.to_string(),
	})?;

	url.path_segments_mut()
		.map_err(|_| LookerClientError::InvalidBaseUrl {
			url: base_url.to_string(),
			message: "URL cannot be a base".to_string(),
		})?
		.pop_if_empty()
		.extend(["api", API_VERSION]);

	Ok(url)
}

fn transport_error(e: reqwest::Error) -> PlatformError {
	if e.is_timeout() {
		error!("Looker request timed out");
		return PlatformError::Timeout;
	}
	error!(error = %e, "Network error during Looker request");
	PlatformError::Network(e.to_string())
}

async fn check_status(response: Response) -> Result<Response, PlatformError> {
	let status = response.status();
	debug!(status = %status, "Received response from Looker");

	if status.is_success() {
		return Ok(response);
	}

	let body = response.text().await.unwrap_or_default();
	let message = serde_json::from_str::<LookerApiError>(&body)
		.map(|e| e.message)
		.unwrap_or(body);

	match status {
		StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
			error!(status = status.as_u16(), message = %message, "Looker rejected credentials");
			Err(PlatformError::Unauthorized)
		}
		StatusCode::NOT_FOUND => {
			error!(message = %message, "Looker resource not found");
			Err(PlatformError::NotFound(message))
		}
		_ => {
			error!(status = status.as_u16(), message = %message, "Looker API error");
			Err(PlatformError::Api {
				status: status.as_u16(),
				message,
			})
		}
	}
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, PlatformError> {
	let body = response.text().await.map_err(transport_error)?;
	trace!(body = %body, "Response body");

	serde_json::from_str(&body).map_err(|e| {
		error!(error = %e, "Failed to parse Looker response");
		PlatformError::InvalidResponse(format!("JSON parse error: {e}"))
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn config(base_url: &str) -> LookerConfig {
		LookerConfig::new(base_url, "client-id", SecretString::new("secret".to_string()))
	}

	#[test]
	fn api_base_appends_version_prefix() {
		let url = api_base_url("https://looker.example.com").unwrap();
		assert_eq!(url.as_str(), "https://looker.example.com/api/4.0");

		let url = api_base_url("https://looker.example.com:19999/").unwrap();
		assert_eq!(url.as_str(), "https://looker.example.com:19999/api/4.0");
	}

	#[test]
	fn invalid_base_url_is_rejected() {
		let err = LookerClient::new(config("not a url")).unwrap_err();
		assert!(matches!(err, LookerClientError::InvalidBaseUrl { .. }));
	}

	#[test]
	fn endpoint_escapes_ids() {
		let client = LookerClient::new(config("https://looker.example.com")).unwrap();
		let url = client.endpoint(&["users", "a/b", "credentials_email"]);
		assert_eq!(
			url.as_str(),
			"https://looker.example.com/api/4.0/users/a%2Fb/credentials_email"
		);
	}

	#[test]
	fn debug_omits_secret() {
		let client = LookerClient::new(config("https://looker.example.com")).unwrap();
		let debug = format!("{client:?}");
		assert!(debug.contains("client-id"));
		assert!(!debug.contains("secret\""));
	}
}
