use crate::{
    dtos::mentor::{MentorProfileRequest, MentorProfileResponse},
    error::{ApiError, ErrorBody},
    state::AppState,
    utils::{auth::CurrentUser, extract::{ApiJson, ApiPath}},
};
use axum::{
    Json, Router,
    extract::State,
    routing::{get, put},
};
use database::services::mentor_profile::MentorProfileService;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/mentors/me", put(upsert_my_profile))
        .route("/mentors/{user_id}", get(get_mentor_profile))
}

/// Create or update the caller's mentor profile
#[utoipa::path(
    put,
    path = "/api/mentors/me",
    request_body = MentorProfileRequest,
    responses(
        (status = 200, description = "Profile saved", body = MentorProfileResponse),
        (status = 400, description = "Invalid profile", body = ErrorBody),
        (status = 401, description = "Unauthorized - invalid or missing JWT")
    ),
    security(("jwt" = [])),
    tag = "Mentors"
)]
pub async fn upsert_my_profile(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    ApiJson(body): ApiJson<MentorProfileRequest>,
) -> Result<Json<MentorProfileResponse>, ApiError> {
    let profile = MentorProfileService::upsert(&state.db, &user_id, body.into()).await?;
    Ok(Json(profile.into()))
}

/// Get a mentor profile, including its rating aggregate
#[utoipa::path(
    get,
    path = "/api/mentors/{user_id}",
    params(
        ("user_id" = String, Path, description = "Mentor's user id")
    ),
    responses(
        (status = 200, description = "Mentor found", body = MentorProfileResponse),
        (status = 404, description = "Mentor not found", body = ErrorBody)
    ),
    security(("jwt" = [])),
    tag = "Mentors"
)]
pub async fn get_mentor_profile(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<String>,
) -> Result<Json<MentorProfileResponse>, ApiError> {
    let profile = MentorProfileService::require(&state.db, &user_id).await?;
    Ok(Json(profile.into()))
}
