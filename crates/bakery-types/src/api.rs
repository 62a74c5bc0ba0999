//! API types shared by the HTTP endpoints.

use serde::{Deserialize, Serialize};

/// Error payload returned by every endpoint on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
	/// Stable machine-readable error code.
	pub error: String,
	/// Human-readable message, suitable for a toast.
	pub message: String,
	/// Optional structured details.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<serde_json::Value>,
}
