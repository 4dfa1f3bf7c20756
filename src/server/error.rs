use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

use super::models::ErrorResponse;
use crate::export::ExportError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No file part in the request")]
    MissingFile,

    #[error("No selected file")]
    EmptyFilename,

    #[error("File exceeds the maximum allowed size")]
    FileTooLarge,

    #[error("Malformed upload request: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Error converting PDF to images: {0}")]
    Rasterization(String),

    #[error("Error processing the image: {0}")]
    Decode(String),

    #[error("Storage failure")]
    Storage {
        #[from]
        source: ExportError,
    },

    #[error("Storage failure")]
    SaveUpload {
        #[source]
        source: std::io::Error,
    },

    #[error("File not found")]
    NotFound,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Storage { .. } | AppError::SaveUpload { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        };

        // Storage details stay in the logs; the client gets a generic message.
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("storage failure: {}", error_chain(&self));
        }

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

/// Joins an error's display with its source chain for client-facing messages
/// that carry the collaborator's own description.
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
