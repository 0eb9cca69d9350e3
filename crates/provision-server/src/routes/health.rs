// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

/// GET /health - liveness probe for the hosting environment.
pub async fn health_check() -> &'static str {
	"ok"
}
