//! API request handlers

use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use decomp_core::{Keyword, OutputRecord, PreprocessingInfo, Sentence, SentenceContext};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Liveness probe - basic health check
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_secs(),
    })
}

/// Decompose request body: one annotated sentence plus its keyword spans
/// and preprocessing info
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecomposeRequest {
    /// Annotated tokens forming one dependency tree
    pub sentence: Sentence,
    /// Keyword occurrences to classify
    pub keywords: Vec<Keyword>,
    /// Precomputed verb/subject phrases and the noun-phrase/entity map
    #[serde(default)]
    pub preprocessing: PreprocessingInfo,
    /// Static context merged into every output row
    #[serde(default)]
    pub context: SentenceContext,
}

/// Decompose response body
#[derive(Debug, Serialize)]
pub struct DecomposeResponse {
    pub count: usize,
    pub records: Vec<OutputRecord>,
}

/// Run the decomposition engine over the request's keywords
pub async fn decompose(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DecomposeRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    if request.sentence.is_empty() {
        return Err(AppError::BadRequest(
            "sentence must contain at least one token".to_string(),
        ));
    }

    tracing::debug!(
        tokens = request.sentence.len(),
        keywords = request.keywords.len(),
        "decompose request"
    );

    let records = state.engine.analyze(
        &request.sentence,
        &request.keywords,
        &request.preprocessing,
        &request.context,
    );

    Ok((
        StatusCode::OK,
        Json(DecomposeResponse {
            count: records.len(),
            records,
        }),
    ))
}
