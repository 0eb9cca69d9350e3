// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: environment variables and TOML files.

use std::path::PathBuf;

use provision_common_config::load_secret_env_any;
use tracing::{debug, trace, warn};

use crate::error::ConfigError;
use crate::layer::ServerConfigLayer;
use crate::sections::{
	HttpConfigLayer, LogFormat, LoggingConfigLayer, LookerConfigLayer, SheetsConfigLayer,
};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ServerConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(ServerConfigLayer::default())
	}
}

/// TOML file configuration source. A missing file is an empty layer.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new("/etc/provision/server.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ServerConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: ServerConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: PROVISION_SERVER_<SECTION>_<FIELD>. Looker settings also accept
/// the `LOOKERSDK_*` names used by the Looker SDKs, and `PORT` is honored for
/// hosts that assign the listening port.
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(ServerConfigLayer {
			http: Some(load_http_from_env()?),
			looker: Some(load_looker_from_env()?),
			sheets: Some(load_sheets_from_env()?),
			logging: Some(load_logging_from_env()),
		})
	}
}

fn env_var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_var_any(names: &[&str]) -> Option<String> {
	names.iter().find_map(|name| env_var(name))
}

fn parse_bool(value: &str) -> bool {
	value.eq_ignore_ascii_case("true") || value == "1"
}

fn env_bool_any(names: &[&str]) -> Option<bool> {
	env_var_any(names).map(|v| parse_bool(&v))
}

fn env_u16_any(names: &[&str]) -> Result<Option<u16>, ConfigError> {
	for name in names {
		if let Some(v) = env_var(name) {
			return v.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
				key: name.to_string(),
				message: format!("invalid u16 value '{v}'"),
			});
		}
	}
	Ok(None)
}

fn env_u64_any(names: &[&str]) -> Result<Option<u64>, ConfigError> {
	for name in names {
		if let Some(v) = env_var(name) {
			return v.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
				key: name.to_string(),
				message: format!("invalid u64 value '{v}'"),
			});
		}
	}
	Ok(None)
}

fn load_http_from_env() -> Result<HttpConfigLayer, ConfigError> {
	Ok(HttpConfigLayer {
		host: env_var("PROVISION_SERVER_HOST"),
		port: env_u16_any(&["PROVISION_SERVER_PORT", "PORT"])?,
	})
}

fn load_looker_from_env() -> Result<LookerConfigLayer, ConfigError> {
	let client_secret = load_secret_env_any(&[
		"PROVISION_SERVER_LOOKER_CLIENT_SECRET",
		"LOOKERSDK_CLIENT_SECRET",
	])
	.map_err(|e| ConfigError::Secret(e.to_string()))?;

	Ok(LookerConfigLayer {
		base_url: env_var_any(&["PROVISION_SERVER_LOOKER_BASE_URL", "LOOKERSDK_BASE_URL"]),
		client_id: env_var_any(&["PROVISION_SERVER_LOOKER_CLIENT_ID", "LOOKERSDK_CLIENT_ID"]),
		client_secret,
		verify_ssl: env_bool_any(&["PROVISION_SERVER_LOOKER_VERIFY_SSL", "LOOKERSDK_VERIFY_SSL"]),
		timeout_secs: env_u64_any(&["PROVISION_SERVER_LOOKER_TIMEOUT_SECS", "LOOKERSDK_TIMEOUT"])?,
	})
}

fn load_sheets_from_env() -> Result<SheetsConfigLayer, ConfigError> {
	let access_token = load_secret_env_any(&["PROVISION_SERVER_SHEETS_ACCESS_TOKEN"])
		.map_err(|e| ConfigError::Secret(e.to_string()))?;

	Ok(SheetsConfigLayer {
		spreadsheet_id: env_var("PROVISION_SERVER_SHEETS_SPREADSHEET_ID"),
		range: env_var("PROVISION_SERVER_SHEETS_RANGE"),
		base_url: env_var("PROVISION_SERVER_SHEETS_BASE_URL"),
		access_token,
		timeout_secs: env_u64_any(&["PROVISION_SERVER_SHEETS_TIMEOUT_SECS"])?,
	})
}

fn load_logging_from_env() -> LoggingConfigLayer {
	let format = env_var("PROVISION_SERVER_LOG_FORMAT").and_then(|v| {
		let parsed = LogFormat::parse(&v);
		if parsed.is_none() {
			warn!(value = %v, "unknown PROVISION_SERVER_LOG_FORMAT, using default");
		}
		parsed
	});

	LoggingConfigLayer {
		level: env_var("PROVISION_SERVER_LOG_LEVEL"),
		format,
	}
}
