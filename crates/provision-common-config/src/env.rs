// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Secret loading from environment variables.
//!
//! Serverless hosts usually inject credentials as plain variables, while
//! container platforms mount them as files. Both are supported through the
//! `VAR` / `VAR_FILE` convention.

use std::path::PathBuf;
use std::{env, fs};

use provision_common_secret::Secret;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SecretEnvError {
	#[error("failed to read secret file at {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("secret file path in {var} is empty")]
	EmptyPath { var: String },
}

#[derive(Debug, Error)]
pub enum RequiredSecretError {
	#[error(transparent)]
	Load(SecretEnvError),

	#[error("missing required secret: set {var} or {file_var}")]
	Missing { var: String, file_var: String },
}

/// Load a secret from `{var}_FILE` (preferred) or `{var}`.
///
/// A single trailing newline is stripped from file contents. Empty direct
/// values are treated as unset.
pub fn load_secret_env(var: &str) -> Result<Option<Secret<String>>, SecretEnvError> {
	let file_var = format!("{var}_FILE");

	if let Ok(path_str) = env::var(&file_var) {
		if path_str.is_empty() {
			return Err(SecretEnvError::EmptyPath { var: file_var });
		}

		let path = PathBuf::from(&path_str);
		let content = fs::read_to_string(&path).map_err(|source| SecretEnvError::Io {
			path: path.clone(),
			source,
		})?;

		let secret = content.strip_suffix('\n').unwrap_or(&content).to_string();
		return Ok(Some(Secret::new(secret)));
	}

	match env::var(var) {
		Ok(value) if !value.is_empty() => Ok(Some(Secret::new(value))),
		_ => Ok(None),
	}
}

/// Try each variable name in order and return the first secret found.
///
/// Used where a service-prefixed name should win over a vendor SDK name,
/// e.g. `PROVISION_SERVER_LOOKER_CLIENT_SECRET` before `LOOKERSDK_CLIENT_SECRET`.
pub fn load_secret_env_any(vars: &[&str]) -> Result<Option<Secret<String>>, SecretEnvError> {
	for var in vars {
		if let Some(secret) = load_secret_env(var)? {
			return Ok(Some(secret));
		}
	}
	Ok(None)
}

/// Like [`load_secret_env`], but a missing secret is an error.
pub fn require_secret_env(var: &str) -> Result<Secret<String>, RequiredSecretError> {
	load_secret_env(var)
		.map_err(RequiredSecretError::Load)?
		.ok_or_else(|| RequiredSecretError::Missing {
			var: var.to_string(),
			file_var: format!("{var}_FILE"),
		})
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	// Each test uses its own variable names; the process environment is shared
	// across test threads.

	#[test]
	fn unset_variable_yields_none() {
		assert!(load_secret_env("PROVISION_TEST_UNSET_SECRET").unwrap().is_none());
	}

	#[test]
	fn direct_value_is_loaded() {
		env::set_var("PROVISION_TEST_DIRECT_SECRET", "s3cret");
		let secret = load_secret_env("PROVISION_TEST_DIRECT_SECRET").unwrap().unwrap();
		assert_eq!(secret.expose(), "s3cret");
		env::remove_var("PROVISION_TEST_DIRECT_SECRET");
	}

	#[test]
	fn file_value_wins_and_trailing_newline_is_stripped() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "from-file").unwrap();

		env::set_var("PROVISION_TEST_FILE_SECRET", "from-env");
		env::set_var("PROVISION_TEST_FILE_SECRET_FILE", file.path());
		let secret = load_secret_env("PROVISION_TEST_FILE_SECRET").unwrap().unwrap();
		assert_eq!(secret.expose(), "from-file");
		env::remove_var("PROVISION_TEST_FILE_SECRET");
		env::remove_var("PROVISION_TEST_FILE_SECRET_FILE");
	}

	#[test]
	fn empty_file_path_is_an_error() {
		env::set_var("PROVISION_TEST_EMPTY_PATH_FILE", "");
		let err = load_secret_env("PROVISION_TEST_EMPTY_PATH").unwrap_err();
		assert!(matches!(err, SecretEnvError::EmptyPath { .. }));
		env::remove_var("PROVISION_TEST_EMPTY_PATH_FILE");
	}

	#[test]
	fn any_prefers_earlier_names() {
		env::set_var("PROVISION_TEST_ANY_SECOND", "second");
		let secret = load_secret_env_any(&["PROVISION_TEST_ANY_FIRST", "PROVISION_TEST_ANY_SECOND"])
			.unwrap()
			.unwrap();
		assert_eq!(secret.expose(), "second");

		env::set_var("PROVISION_TEST_ANY_FIRST", "first");
		let secret = load_secret_env_any(&["PROVISION_TEST_ANY_FIRST", "PROVISION_TEST_ANY_SECOND"])
			.unwrap()
			.unwrap();
		assert_eq!(secret.expose(), "first");
		env::remove_var("PROVISION_TEST_ANY_FIRST");
		env::remove_var("PROVISION_TEST_ANY_SECOND");
	}

	#[test]
	fn require_reports_both_names() {
		let err = require_secret_env("PROVISION_TEST_REQUIRED_MISSING").unwrap_err();
		let msg = err.to_string();
		assert!(msg.contains("PROVISION_TEST_REQUIRED_MISSING"));
		assert!(msg.contains("PROVISION_TEST_REQUIRED_MISSING_FILE"));
	}
}
