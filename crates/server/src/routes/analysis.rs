use crate::{
    analysis::queue::JobState,
    dtos::analysis::{AnalysisAccepted, AnalysisRequest},
    error::{ApiError, ErrorBody},
    state::AppState,
    utils::{auth::CurrentUser, extract::{ApiJson, ApiPath}},
};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use log::info;
use uuid::Uuid;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/analysis", post(submit_analysis))
        .route("/analysis/{id}", get(get_analysis))
}

/// Queue a text for analysis. Poll the returned id for the result
#[utoipa::path(
    post,
    path = "/api/analysis",
    request_body = AnalysisRequest,
    responses(
        (status = 202, description = "Analysis queued", body = AnalysisAccepted),
        (status = 400, description = "Empty text", body = ErrorBody)
    ),
    security(("jwt" = [])),
    tag = "Analysis"
)]
pub async fn submit_analysis(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    ApiJson(body): ApiJson<AnalysisRequest>,
) -> Result<(StatusCode, Json<AnalysisAccepted>), ApiError> {
    if body.text.trim().is_empty() {
        return Err(ApiError::BadRequest("Text must not be empty"));
    }

    let id = state
        .analysis
        .enqueue(&user_id, body.text)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    info!("User {user_id} queued analysis job {id}");

    Ok((StatusCode::ACCEPTED, Json(AnalysisAccepted { id })))
}

#[utoipa::path(
    get,
    path = "/api/analysis/{id}",
    params(("id" = Uuid, Path, description = "Analysis job ID")),
    responses(
        (status = 200, description = "Job state", body = JobState),
        (status = 404, description = "Unknown or expired job", body = ErrorBody)
    ),
    security(("jwt" = [])),
    tag = "Analysis"
)]
pub async fn get_analysis(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<JobState>, ApiError> {
    state
        .analysis
        .status(id, &user_id)
        .await
        .map(Json)
        .ok_or(ApiError::NotFound("Analysis job"))
}
