use analyzers::ad_scorer::score_review;
use analyzers::batch::{score_batch, BatchReport};
use analyzers::models::DetailedAnalysisResult;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    response::Json,
};
use serde_json::json;
use std::sync::Arc;

use crate::config::Config;
use crate::error::ApiError;
use crate::models::{HealthResponse, ScoreBatchRequest, TierResponse};

pub async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "service": "Adscan API",
        "version": "0.1.0",
        "description": "Sponsored blog review detection from per-image analysis results",
        "endpoints": [
            "POST /api/score",
            "POST /api/score/batch",
            "GET /api/tier/:value",
            "GET /health"
        ]
    }))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

pub async fn score_single(
    payload: Result<Json<DetailedAnalysisResult>, JsonRejection>,
) -> Result<Json<DetailedAnalysisResult>, ApiError> {
    let Json(review) = payload?;

    tracing::info!(
        review_id = ?review.review_id,
        images = review.analysis.image_analysis.len(),
        "Scoring review"
    );

    Ok(Json(score_review(review)))
}

pub async fn score_many(
    State(config): State<Arc<Config>>,
    payload: Result<Json<ScoreBatchRequest>, JsonRejection>,
) -> Result<Json<BatchReport>, ApiError> {
    let Json(request) = payload?;
    if request.reviews.is_empty() {
        return Err(ApiError::EmptyBatch);
    }

    let limit = request.limit.unwrap_or(config.default_limit);
    tracing::info!("Scoring batch of {} review(s), limit {}", request.reviews.len(), limit);

    Ok(Json(score_batch(request.reviews, limit)))
}

pub async fn tier(
    value: Result<Path<f64>, PathRejection>,
) -> Result<Json<TierResponse>, ApiError> {
    let Path(value) = value?;
    Ok(Json(TierResponse::for_value(value)))
}
