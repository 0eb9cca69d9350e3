// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections. Each has a partial `*ConfigLayer` for merging and
//! a resolved `*Config` used at runtime.

mod http;
mod logging;
mod looker;
mod sheets;

pub use http::{HttpConfig, HttpConfigLayer};
pub use logging::{LogFormat, LoggingConfig, LoggingConfigLayer};
pub use looker::{LookerConfig, LookerConfigLayer};
pub use sheets::{SheetsConfig, SheetsConfigLayer, DEFAULT_RANGE};
