use serde::{Deserialize, Serialize};

/// JSON error body for validation and processing failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Advisory body returned for non-POST access to the OCR endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodAdvisory {
    pub message: String,
}

impl MethodAdvisory {
    pub fn post_required() -> Self {
        Self {
            message: "This endpoint only accepts POST requests. \
                      Please use POST method to upload the file and perform OCR."
                .to_string(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
