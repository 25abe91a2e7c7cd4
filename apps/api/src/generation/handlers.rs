//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::models::{ApplicationInput, LetterSource};
use crate::generation::orchestrator::{GenerationSession, GenerationState};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    /// Correlates the response with server logs. Nothing is stored under it.
    pub letter_id: Uuid,
    pub letter_text: String,
    pub info_message: Option<String>,
    pub source: LetterSource,
    pub generated_at: DateTime<Utc>,
}

/// POST /api/v1/cover-letters
///
/// Runs one form session. Always answers with a usable letter for valid input;
/// generation failures surface only as `info_message`.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(input): Json<ApplicationInput>,
) -> Result<Json<GenerateResponse>, AppError> {
    let letter_id = Uuid::new_v4();
    info!(%letter_id, tone = input.tone.as_str(), has_api_key = input.api_key.is_some(), "Cover letter requested");

    let mut session = GenerationSession::new(state.generator.as_ref());
    session.submit(&input).await;

    match session.into_state() {
        GenerationState::Success(result) => Ok(Json(GenerateResponse {
            letter_id,
            letter_text: result.letter_text,
            info_message: result.info_message,
            source: result.source,
            generated_at: Utc::now(),
        })),
        GenerationState::Failed { reason } => Err(AppError::Validation(reason)),
        other => Err(AppError::Internal(anyhow::anyhow!(
            "generation session ended in non-terminal state {other:?}"
        ))),
    }
}
