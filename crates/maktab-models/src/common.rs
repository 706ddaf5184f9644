//! Shared response types used across modules.

use serde::Serialize;
use utoipa::ToSchema;

/// Generic success message response.
///
/// Used by operations whose only payload is a confirmation message,
/// such as deletes and bulk updates.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error envelope returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
