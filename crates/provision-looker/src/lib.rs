// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Looker API 4.0 client for user provisioning.
//!
//! Implements [`provision_common_core::IdentityPlatform`] over the Looker
//! REST API: user search, user creation, email credentials, and password
//! reset emails. Authentication uses API3 client credentials exchanged for a
//! short-lived session token at `/api/4.0/login`.

pub mod client;
pub mod error;
pub mod types;

pub use client::LookerClient;
pub use error::LookerClientError;
pub use types::LookerConfig;
