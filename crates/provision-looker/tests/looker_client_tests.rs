// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Contract tests for the Looker client against a mock API.
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | POST | `/api/4.0/login` | `login_*`, `token_*` |
//! | GET | `/api/4.0/users/search` | `search_*` |
//! | POST | `/api/4.0/users` | `create_*` |
//! | POST | `/api/4.0/users/{id}/credentials_email` | `attach_*` |
//! | POST | `/api/4.0/users/{id}/credentials_email/send_password_reset` | `reset_*` |

use provision_common_core::{
	AccountId, EmailAddress, EmailCredential, IdentityPlatform, NewAccount, PlatformError,
};
use provision_common_secret::SecretString;
use provision_looker::{LookerClient, LookerConfig};
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> LookerClient {
	LookerClient::new(LookerConfig::new(
		server.uri(),
		"test-client",
		SecretString::new("test-secret".to_string()),
	))
	.unwrap()
}

fn email(value: &str) -> EmailAddress {
	EmailAddress::parse(value).unwrap()
}

async fn mount_login(server: &MockServer, expected_calls: u64) {
	Mock::given(method("POST"))
		.and(path("/api/4.0/login"))
		.and(body_string_contains("client_id=test-client"))
		.and(body_string_contains("client_secret=test-secret"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({
			"access_token": "session-token",
			"token_type": "Bearer",
			"expires_in": 3600
		})))
		.expect(expected_calls)
		.mount(server)
		.await;
}

// ── GET /api/4.0/users/search ────────────────────────────────────────

#[tokio::test]
async fn search_returns_matching_accounts() {
	let server = MockServer::start().await;
	mount_login(&server, 1).await;

	Mock::given(method("GET"))
		.and(path("/api/4.0/users/search"))
		.and(query_param("email", "a@b.com"))
		.and(header("authorization", "token session-token"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!([
			{ "id": "17", "email": "a@b.com" }
		])))
		.mount(&server)
		.await;

	let accounts = client(&server)
		.search_accounts(&email("a@b.com"))
		.await
		.unwrap();
	assert_eq!(accounts.len(), 1);
	assert_eq!(accounts[0].id, AccountId::new("17"));
	assert_eq!(accounts[0].email.as_deref(), Some("a@b.com"));
}

#[tokio::test]
async fn search_keeps_only_exact_email_matches() {
	let server = MockServer::start().await;
	mount_login(&server, 1).await;

	Mock::given(method("GET"))
		.and(path("/api/4.0/users/search"))
		.and(query_param("email", "a_b@x.com"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!([
			{ "id": "9", "email": "axb@x.com" },
			{ "id": "10", "email": "A_B@X.com" },
			{ "id": "11" }
		])))
		.mount(&server)
		.await;

	let accounts = client(&server)
		.search_accounts(&email("a_b@x.com"))
		.await
		.unwrap();
	assert_eq!(accounts.len(), 1);
	assert_eq!(accounts[0].id, AccountId::new("10"));
}

#[tokio::test]
async fn search_with_no_match_is_empty() {
	let server = MockServer::start().await;
	mount_login(&server, 1).await;

	Mock::given(method("GET"))
		.and(path("/api/4.0/users/search"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
		.mount(&server)
		.await;

	let accounts = client(&server)
		.search_accounts(&email("nobody@b.com"))
		.await
		.unwrap();
	assert!(accounts.is_empty());
}

#[tokio::test]
async fn search_with_malformed_body_is_invalid_response() {
	let server = MockServer::start().await;
	mount_login(&server, 1).await;

	Mock::given(method("GET"))
		.and(path("/api/4.0/users/search"))
		.respond_with(ResponseTemplate::new(200).set_body_string("not json"))
		.mount(&server)
		.await;

	let err = client(&server)
		.search_accounts(&email("a@b.com"))
		.await
		.unwrap_err();
	assert!(matches!(err, PlatformError::InvalidResponse(_)));
}

#[tokio::test]
async fn search_server_error_maps_to_api_error() {
	let server = MockServer::start().await;
	mount_login(&server, 1).await;

	Mock::given(method("GET"))
		.and(path("/api/4.0/users/search"))
		.respond_with(
			ResponseTemplate::new(500).set_body_json(json!({ "message": "Internal Error" })),
		)
		.mount(&server)
		.await;

	let err = client(&server)
		.search_accounts(&email("a@b.com"))
		.await
		.unwrap_err();
	assert_eq!(
		err,
		PlatformError::Api {
			status: 500,
			message: "Internal Error".to_string()
		}
	);
}

// ── POST /api/4.0/login ──────────────────────────────────────────────

#[tokio::test]
async fn login_rejection_is_unauthorized() {
	let server = MockServer::start().await;

	Mock::given(method("POST"))
		.and(path("/api/4.0/login"))
		.respond_with(ResponseTemplate::new(403).set_body_json(json!({ "message": "Not found" })))
		.mount(&server)
		.await;

	let err = client(&server)
		.search_accounts(&email("a@b.com"))
		.await
		.unwrap_err();
	assert_eq!(err, PlatformError::Unauthorized);
}

#[tokio::test]
async fn token_is_reused_across_calls() {
	let server = MockServer::start().await;
	mount_login(&server, 1).await;

	Mock::given(method("GET"))
		.and(path("/api/4.0/users/search"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
		.expect(2)
		.mount(&server)
		.await;

	let client = client(&server);
	client.search_accounts(&email("a@b.com")).await.unwrap();
	client.search_accounts(&email("c@d.com")).await.unwrap();
}

#[tokio::test]
async fn token_is_dropped_after_unauthorized_response() {
	let server = MockServer::start().await;
	mount_login(&server, 2).await;

	Mock::given(method("GET"))
		.and(path("/api/4.0/users/search"))
		.respond_with(ResponseTemplate::new(401))
		.mount(&server)
		.await;

	let client = client(&server);
	let first = client.search_accounts(&email("a@b.com")).await.unwrap_err();
	let second = client.search_accounts(&email("a@b.com")).await.unwrap_err();
	assert_eq!(first, PlatformError::Unauthorized);
	assert_eq!(second, PlatformError::Unauthorized);
}

// ── POST /api/4.0/users ──────────────────────────────────────────────

#[tokio::test]
async fn create_posts_write_user_body() {
	let server = MockServer::start().await;
	mount_login(&server, 1).await;

	Mock::given(method("POST"))
		.and(path("/api/4.0/users"))
		.and(body_json(json!({
			"credentials_email": {
				"email": "new@b.com",
				"forced_password_reset_at_next_login": false
			},
			"is_disabled": false,
			"models_dir_validated": false
		})))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({
			"id": 99,
			"email": "new@b.com"
		})))
		.expect(1)
		.mount(&server)
		.await;

	let account = client(&server)
		.create_account(&NewAccount::for_email(&email("new@b.com")))
		.await
		.unwrap();
	assert_eq!(account.id, AccountId::new("99"));
}

#[tokio::test]
async fn create_conflict_is_api_error() {
	let server = MockServer::start().await;
	mount_login(&server, 1).await;

	Mock::given(method("POST"))
		.and(path("/api/4.0/users"))
		.respond_with(
			ResponseTemplate::new(422).set_body_json(json!({ "message": "Validation Failed" })),
		)
		.mount(&server)
		.await;

	let err = client(&server)
		.create_account(&NewAccount::for_email(&email("new@b.com")))
		.await
		.unwrap_err();
	assert!(matches!(err, PlatformError::Api { status: 422, .. }));
}

// ── POST /api/4.0/users/{id}/credentials_email ───────────────────────

#[tokio::test]
async fn attach_posts_credential_to_user() {
	let server = MockServer::start().await;
	mount_login(&server, 1).await;

	Mock::given(method("POST"))
		.and(path("/api/4.0/users/99/credentials_email"))
		.and(body_json(json!({
			"email": "new@b.com",
			"forced_password_reset_at_next_login": false
		})))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({ "email": "new@b.com" })))
		.expect(1)
		.mount(&server)
		.await;

	client(&server)
		.attach_email_credential(
			&AccountId::new("99"),
			&EmailCredential::new(&email("new@b.com")),
		)
		.await
		.unwrap();
}

// ── POST /api/4.0/users/{id}/credentials_email/send_password_reset ──

#[tokio::test]
async fn reset_posts_to_user_credentials() {
	let server = MockServer::start().await;
	mount_login(&server, 1).await;

	Mock::given(method("POST"))
		.and(path("/api/4.0/users/17/credentials_email/send_password_reset"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({ "email": "a@b.com" })))
		.expect(1)
		.mount(&server)
		.await;

	client(&server)
		.send_password_reset_email(&AccountId::new("17"))
		.await
		.unwrap();
}

#[tokio::test]
async fn reset_for_missing_user_is_not_found() {
	let server = MockServer::start().await;
	mount_login(&server, 1).await;

	Mock::given(method("POST"))
		.and(path("/api/4.0/users/404/credentials_email/send_password_reset"))
		.respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not found" })))
		.mount(&server)
		.await;

	let err = client(&server)
		.send_password_reset_email(&AccountId::new("404"))
		.await
		.unwrap_err();
	assert_eq!(err, PlatformError::NotFound("Not found".to_string()));
}
