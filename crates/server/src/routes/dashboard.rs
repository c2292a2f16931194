use crate::{
    dtos::dashboard::MentorStatsResponse, error::ApiError, state::AppState,
    utils::auth::CurrentUser,
};
use axum::{Json, Router, extract::State, routing::get};
use database::services::dashboard::DashboardService;

pub fn router() -> Router<AppState> {
    Router::new().route("/mentor-dashboard/stats", get(mentor_stats))
}

/// Summary counters for the calling mentor
#[utoipa::path(
    get,
    path = "/api/mentor-dashboard/stats",
    responses(
        (status = 200, description = "Mentor statistics", body = MentorStatsResponse),
        (status = 401, description = "Unauthorized - invalid or missing JWT")
    ),
    security(("jwt" = [])),
    tag = "Dashboard"
)]
pub async fn mentor_stats(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<MentorStatsResponse>, ApiError> {
    let stats = DashboardService::mentor_stats(&state.db, &user_id).await?;
    Ok(Json(stats.into()))
}
