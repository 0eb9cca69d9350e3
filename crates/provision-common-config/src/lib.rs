// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration primitives shared by the provisioning crates.
//!
//! - [`Secret<T>`] re-exported from [`provision_common_secret`]
//! - [`load_secret_env`] for `VAR` / `VAR_FILE` secret loading

pub mod env;

pub use provision_common_secret::{Secret, SecretString, REDACTED};

pub use env::{load_secret_env, load_secret_env_any, require_secret_env, RequiredSecretError, SecretEnvError};
