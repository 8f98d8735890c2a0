//! Shared response body types for API handlers.

use serde::Serialize;

/// `{ "Message": "..." }` body returned by delete endpoints.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    #[serde(rename = "Message")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
