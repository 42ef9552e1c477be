use std::path::PathBuf;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::Deserialize;

use crate::error::AppError;

use super::apply::BatchSummary;
use super::domain::{ApplicationOutcome, ExperienceLevel};
use super::profile::CandidateProfile;
use super::search::{SearchResponse, DEFAULT_SEARCH_TITLE};
use super::service::JobAutomationService;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchRequest {
    pub title: Option<String>,
    pub experience_level: Option<ExperienceLevel>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub job_url: String,
    pub profile: CandidateProfile,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchApplyRequest {
    pub job_urls: Vec<String>,
    pub profile: CandidateProfile,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseRequest {
    pub source_path: Option<PathBuf>,
}

/// Router builder exposing search, apply, and resume endpoints.
pub fn job_router(service: Arc<JobAutomationService>) -> Router {
    Router::new()
        .route("/api/v1/jobs/search", post(search_handler))
        .route("/api/v1/applications", post(apply_handler))
        .route("/api/v1/applications/batch", post(batch_handler))
        .route("/api/v1/resume/parse", post(parse_handler))
        .with_state(service)
}

pub(crate) async fn search_handler(
    State(service): State<Arc<JobAutomationService>>,
    Json(request): Json<SearchRequest>,
) -> Json<SearchResponse> {
    let title = request
        .title
        .filter(|title| !title.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SEARCH_TITLE.to_string());
    let level = request.experience_level.unwrap_or_default();
    Json(service.search(&title, level).await)
}

pub(crate) async fn apply_handler(
    State(service): State<Arc<JobAutomationService>>,
    Json(request): Json<ApplyRequest>,
) -> Json<ApplicationOutcome> {
    Json(service.apply(request.job_url, request.profile).await)
}

pub(crate) async fn batch_handler(
    State(service): State<Arc<JobAutomationService>>,
    Json(request): Json<BatchApplyRequest>,
) -> (StatusCode, Json<BatchSummary>) {
    let summary = service.apply_batch(request.job_urls, request.profile).await;
    (StatusCode::OK, Json(summary))
}

pub(crate) async fn parse_handler(
    State(service): State<Arc<JobAutomationService>>,
    Json(request): Json<ParseRequest>,
) -> Result<Json<CandidateProfile>, AppError> {
    let profile = service.parse_resume(request.source_path).await?;
    Ok(Json(profile))
}
