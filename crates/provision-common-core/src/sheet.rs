// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;

use crate::error::SheetReadError;

/// Read access to spreadsheet cell ranges.
#[async_trait]
pub trait SpreadsheetReader: Send + Sync {
	/// Rows of the range in sheet order, each row's cells rendered as text.
	///
	/// An empty range yields an empty vector. Rows may be shorter than the
	/// range width, including empty.
	async fn read_range(
		&self,
		spreadsheet_id: &str,
		range: &str,
	) -> Result<Vec<Vec<String>>, SheetReadError>;
}
