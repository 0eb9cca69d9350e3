// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for the provisioning server.
//!
//! Settings are layered from built-in defaults, an optional TOML file and
//! environment variables (`PROVISION_SERVER_*`), later sources winning.
//!
//! ```ignore
//! use provision_server_config::load_config;
//!
//! let config = load_config()?;
//! println!("listening on {}", config.socket_addr());
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ServerConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use std::path::PathBuf;

use tracing::{debug, info};

/// Fully resolved server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
	pub http: HttpConfig,
	pub looker: LookerConfig,
	pub sheets: SheetsConfig,
	pub logging: LoggingConfig,
}

impl ServerConfig {
	/// Get the socket address string for binding.
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`PROVISION_SERVER_*`, `LOOKERSDK_*`, `PORT`)
/// 2. Config file (`/etc/provision/server.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(config_path: impl Into<PathBuf>) -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

/// Merge the given sources in precedence order and resolve the result.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<ServerConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		merged.merge(source.load()?);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: ServerConfigLayer) -> Result<ServerConfig, ConfigError> {
	let http = layer.http.unwrap_or_default().finalize();
	let looker = layer.looker.unwrap_or_default().finalize()?;
	let sheets = layer.sheets.unwrap_or_default().finalize()?;
	let logging = layer.logging.unwrap_or_default().finalize();

	info!(
		host = %http.host,
		port = http.port,
		looker_base_url = %looker.base_url,
		looker_verify_ssl = looker.verify_ssl,
		sheet_configured = sheets.is_configured(),
		sheet_range = %sheets.range,
		sheet_token = if sheets.access_token.is_some() { "static" } else { "adc" },
		"Server configuration loaded"
	);

	Ok(ServerConfig {
		http,
		looker,
		sheets,
		logging,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	fn write_config(contents: &str) -> tempfile::NamedTempFile {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(contents.as_bytes()).unwrap();
		file
	}

	const COMPLETE: &str = r#"
[http]
host = "127.0.0.1"
port = 9090

[looker]
base_url = "https://acme.cloud.looker.com"
client_id = "abc"
client_secret = "shh"

[sheets]
spreadsheet_id = "1AbCdEf"
"#;

	#[test]
	fn test_file_and_defaults_resolve() {
		let file = write_config(COMPLETE);
		let config = load_from_sources(vec![
			Box::new(DefaultsSource),
			Box::new(TomlSource::new(file.path())),
		])
		.unwrap();

		assert_eq!(config.socket_addr(), "127.0.0.1:9090");
		assert_eq!(config.looker.client_id, "abc");
		assert!(config.looker.verify_ssl);
		assert_eq!(config.looker.timeout_secs, 120);
		assert_eq!(config.sheets.spreadsheet_id.as_deref(), Some("1AbCdEf"));
		assert_eq!(config.sheets.range, DEFAULT_RANGE);
		assert_eq!(config.logging.format, LogFormat::Text);
	}

	#[test]
	fn test_missing_looker_section_is_an_error() {
		let file = write_config("[http]\nport = 9090\n");
		let err = load_from_sources(vec![Box::new(TomlSource::new(file.path()))]).unwrap_err();
		assert!(matches!(err, ConfigError::Missing { section: "looker", .. }));
	}

	#[test]
	fn test_sources_are_applied_in_precedence_order() {
		struct PortOverride;

		impl ConfigSource for PortOverride {
			fn name(&self) -> &'static str {
				"port-override"
			}

			fn precedence(&self) -> Precedence {
				Precedence::Environment
			}

			fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
				Ok(ServerConfigLayer {
					http: Some(HttpConfigLayer {
						port: Some(7000),
						..Default::default()
					}),
					..Default::default()
				})
			}
		}

		let file = write_config(COMPLETE);
		// Listed before the file source but must still win.
		let config = load_from_sources(vec![
			Box::new(PortOverride),
			Box::new(TomlSource::new(file.path())),
		])
		.unwrap();
		assert_eq!(config.http.port, 7000);
		assert_eq!(config.http.host, "127.0.0.1");
	}

	#[test]
	fn test_secret_is_redacted_in_debug() {
		let file = write_config(COMPLETE);
		let config = load_from_sources(vec![Box::new(TomlSource::new(file.path()))]).unwrap();
		let debug = format!("{config:?}");
		assert!(!debug.contains("shh"));
	}
}
