use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use crate::server::AppState;
use crate::server::error::{ApiError, ErrorResponse};
use crate::service::{clamp_history_limit, AnalyzeOutcome};
use crate::AnalysisRecord;
use std::sync::Arc;

/// Message returned in place of a record when the input is blank.
pub const EMPTY_TEXT_ERROR: &str = "Text is empty";

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: &'static str,
}

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

#[derive(Deserialize)]
pub struct HistoryParams {
    pub limit: Option<i64>,
}

/// Either the stored record or a soft validation error, both sent with 200.
#[derive(Serialize)]
#[serde(untagged)]
pub enum AnalyzeResponse {
    Scored(AnalysisRecord),
    Rejected(ErrorResponse),
}

/// GET / - health probe
pub async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        message: "Sentiment API is running",
    })
}

/// POST /analyze - score, persist and return one record
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let service = state.service.clone();
    let outcome = tokio::task::spawn_blocking(move || service.analyze(&req.text)).await??;

    let response = match outcome {
        AnalyzeOutcome::Scored(record) => AnalyzeResponse::Scored(record),
        AnalyzeOutcome::EmptyText => {
            tracing::debug!("Rejected empty analyze request");
            AnalyzeResponse::Rejected(ErrorResponse { error: EMPTY_TEXT_ERROR.to_string() })
        }
    };

    Ok(Json(response))
}

/// GET /history?limit=N - most recent records first
pub async fn history(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<AnalysisRecord>>, ApiError> {
    let limit = clamp_history_limit(params.limit);
    let service = state.service.clone();
    let records = tokio::task::spawn_blocking(move || service.history(limit)).await??;

    Ok(Json(records))
}
