// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP server for Looker user provisioning.
//!
//! Routes:
//! - `POST /` and `POST /provision`: provision the email in the JSON body
//! - `GET /sheet` and `GET /provision/sheet`: provision every email in the
//!   configured spreadsheet range
//! - `GET /health`: liveness

pub mod error;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::{
	routing::{get, post},
	Router,
};
use provision_looker::LookerClient;
use provision_server_config::ServerConfig;
use provision_service::{ProvisioningWorkflow, SheetEmailSource};
use provision_sheets::{AdcTokenSource, SheetsClient, StaticTokenSource, TokenSource};
use tower_http::trace::TraceLayer;

pub use error::{Endpoint, HandlerError, HandlerFailure, StartupError};

/// Shared handler state. Clients are built once at startup.
#[derive(Clone)]
pub struct AppState {
	pub workflow: ProvisioningWorkflow,
	/// `None` when no spreadsheet id is configured.
	pub sheet_source: Option<SheetEmailSource>,
}

/// Build the Looker and Sheets clients described by `config`.
pub fn create_app_state(config: &ServerConfig) -> Result<AppState, StartupError> {
	let looker = LookerClient::new(provision_looker::LookerConfig {
		base_url: config.looker.base_url.clone(),
		client_id: config.looker.client_id.clone(),
		client_secret: config.looker.client_secret.clone(),
		verify_ssl: config.looker.verify_ssl,
		timeout: Duration::from_secs(config.looker.timeout_secs),
	})?;
	let workflow = ProvisioningWorkflow::new(Arc::new(looker));

	let sheet_source = match &config.sheets.spreadsheet_id {
		Some(spreadsheet_id) => {
			let tokens: Arc<dyn TokenSource> = match &config.sheets.access_token {
				Some(token) => Arc::new(StaticTokenSource::new(token.clone())),
				None => Arc::new(AdcTokenSource::new()),
			};
			let client = SheetsClient::new(
				provision_sheets::SheetsConfig {
					base_url: config.sheets.base_url.clone(),
					timeout: Duration::from_secs(config.sheets.timeout_secs),
				},
				tokens,
			)?;
			Some(SheetEmailSource::new(
				Arc::new(client),
				spreadsheet_id.clone(),
				config.sheets.range.clone(),
			))
		}
		None => {
			tracing::warn!("no spreadsheet id configured, spreadsheet endpoint will report errors");
			None
		}
	};

	Ok(AppState {
		workflow,
		sheet_source,
	})
}

pub fn create_router(state: AppState) -> Router {
	Router::new()
		.route("/", post(routes::provision::provision_direct))
		.route("/provision", post(routes::provision::provision_direct))
		.route("/sheet", get(routes::provision::provision_from_sheet))
		.route("/provision/sheet", get(routes::provision::provision_from_sheet))
		.route("/health", get(routes::health::health_check))
		.layer(TraceLayer::new_for_http())
		.with_state(state)
}
