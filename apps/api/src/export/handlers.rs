//! Axum route handlers for letter export.

use axum::{
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::export::pdf::{content_disposition, pdf_filename, render_pdf};

#[derive(Debug, Deserialize)]
pub struct PdfExportRequest {
    /// Candidate name; only used to build the filename.
    #[serde(default)]
    pub name: String,
    pub letter_text: String,
}

/// POST /api/v1/cover-letters/pdf
///
/// Renders the letter exactly as given. Rendering is CPU-bound, so it runs on
/// the blocking pool.
pub async fn handle_export_pdf(
    Json(request): Json<PdfExportRequest>,
) -> Result<Response, AppError> {
    if request.letter_text.trim().is_empty() {
        return Err(AppError::Validation("letter_text cannot be empty".to_string()));
    }

    let filename = pdf_filename(&request.name);
    let letter_text = request.letter_text;
    let pdf = tokio::task::spawn_blocking(move || render_pdf(&letter_text))
        .await
        .map_err(|e| AppError::Export(format!("spawn_blocking failed in PDF render: {e}")))?
        .map_err(|e| AppError::Export(format!("PDF render failed: {e}")))?;

    info!("Exported {filename} ({} bytes)", pdf.len());

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&filename)),
        ],
        pdf,
    )
        .into_response())
}
