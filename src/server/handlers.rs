use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Json, Response};

use super::error::{error_chain, AppError};
use super::models::{HealthResponse, MethodAdvisory};
use super::{render, AppState};
use crate::document::{self, DocumentKind};
use crate::export;

/// Upload form
pub async fn index() -> Html<String> {
    Html(render::index_page())
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Advisory for non-POST access to the OCR endpoint
pub async fn method_advisory() -> (StatusCode, Json<MethodAdvisory>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(MethodAdvisory::post_required()),
    )
}

/// Main OCR endpoint: multipart upload in, rendered results page out.
pub async fn recognize_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Html<String>, AppError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await?;
            upload = Some((filename, bytes.to_vec()));
            break;
        }
    }

    let (filename, bytes) = upload.ok_or(AppError::MissingFile)?;

    if filename.is_empty() {
        return Err(AppError::EmptyFilename);
    }

    if bytes.len() as u64 > state.max_file_size {
        return Err(AppError::FileTooLarge);
    }

    tracing::info!("Received OCR upload: {filename} ({} bytes)", bytes.len());

    let filename = document::sanitize_filename(&filename);
    let kind = DocumentKind::from_filename(&filename);

    // The original upload is always retained in the storage area.
    let upload_path = state.storage_dir.join(&filename);
    std::fs::create_dir_all(&state.storage_dir)
        .map_err(|source| AppError::SaveUpload { source })?;
    std::fs::write(&upload_path, &bytes).map_err(|source| AppError::SaveUpload { source })?;

    let images = match kind {
        DocumentKind::Pdf => state
            .rasterizer
            .rasterize(&upload_path)
            .map_err(|err| AppError::Rasterization(error_chain(&err)))?,
        DocumentKind::Image => {
            let image =
                document::decode_image(&bytes).map_err(|err| AppError::Decode(error_chain(&err)))?;
            vec![image]
        }
    };

    let records = document::extract_records(&images, state.recognizer.as_ref());

    tracing::info!("Extracted {} page record(s) from {filename}", records.len());

    let artifact_name = export::derive_artifact_name(&filename);
    let artifact_path = state.storage_dir.join(&artifact_name);
    export::write_spreadsheet(&records, &artifact_path)?;

    let download_href = format!("/download/{artifact_name}");

    Ok(Html(render::results_page(&records, &download_href)))
}

/// Streams a previously exported spreadsheet back as an attachment.
///
/// The path segment must round-trip through the upload-time sanitizer; any
/// other name is treated as nonexistent.
pub async fn download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    if !document::is_sanitized(&filename) {
        return Err(AppError::NotFound);
    }

    let path = state.storage_dir.join(&filename);
    let bytes = tokio::fs::read(&path).await.map_err(|_| AppError::NotFound)?;

    let headers = [
        (header::CONTENT_TYPE, "text/csv".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];

    Ok((headers, bytes).into_response())
}
