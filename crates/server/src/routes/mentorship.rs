use crate::{
    dtos::{
        mentorship::{
            CreateMentorshipRequest, MentorshipFeedbackRequest, MentorshipQueryParams,
            MentorshipResponse, ProgressRequest, RespondRequest,
        },
        session::SessionResponse,
    },
    error::{ApiError, ErrorBody},
    state::AppState,
    utils::{auth::CurrentUser, extract::{ApiJson, ApiPath, ApiQuery}},
};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
};
use database::services::{
    mentoring_session::MentoringSessionService, mentorship::MentorshipService,
};
use models::mentorship::Role;
use uuid::Uuid;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/mentorship/requests", post(request_mentorship))
        .route("/mentorship/as-mentor", get(list_as_mentor))
        .route("/mentorship/as-mentee", get(list_as_mentee))
        .route("/mentorship/{id}", get(get_mentorship))
        .route("/mentorship/{id}/respond", post(respond))
        .route("/mentorship/{id}/progress", put(update_progress))
        .route("/mentorship/{id}/complete", post(complete))
        .route("/mentorship/{id}/cancel", post(cancel))
        .route("/mentorship/{id}/feedback", post(leave_feedback))
        .route("/mentorship/{id}/sessions", get(list_sessions))
}

/// Ask a mentor for mentorship
#[utoipa::path(
    post,
    path = "/api/mentorship/requests",
    request_body = CreateMentorshipRequest,
    responses(
        (status = 201, description = "Request created", body = MentorshipResponse),
        (
            status = 400,
            description = "Self-request or a relation already exists for this pair",
            body = ErrorBody
        ),
        (status = 404, description = "Mentor not found", body = ErrorBody)
    ),
    security(("jwt" = [])),
    tag = "Mentorship"
)]
pub async fn request_mentorship(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    ApiJson(body): ApiJson<CreateMentorshipRequest>,
) -> Result<(StatusCode, Json<MentorshipResponse>), ApiError> {
    let relation = MentorshipService::request(&state.db, &user_id, body.into()).await?;
    Ok((StatusCode::CREATED, Json(relation.into())))
}

/// Mentorships where the caller is the mentor
#[utoipa::path(
    get,
    path = "/api/mentorship/as-mentor",
    params(MentorshipQueryParams),
    responses(
        (status = 200, description = "Mentorships, newest first", body = Vec<MentorshipResponse>)
    ),
    security(("jwt" = [])),
    tag = "Mentorship"
)]
pub async fn list_as_mentor(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    ApiQuery(params): ApiQuery<MentorshipQueryParams>,
) -> Result<Json<Vec<MentorshipResponse>>, ApiError> {
    list(&state, &user_id, Role::Mentor, params).await
}

/// Mentorships where the caller is the mentee
#[utoipa::path(
    get,
    path = "/api/mentorship/as-mentee",
    params(MentorshipQueryParams),
    responses(
        (status = 200, description = "Mentorships, newest first", body = Vec<MentorshipResponse>)
    ),
    security(("jwt" = [])),
    tag = "Mentorship"
)]
pub async fn list_as_mentee(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    ApiQuery(params): ApiQuery<MentorshipQueryParams>,
) -> Result<Json<Vec<MentorshipResponse>>, ApiError> {
    list(&state, &user_id, Role::Mentee, params).await
}

async fn list(
    state: &AppState,
    user_id: &str,
    role: Role,
    params: MentorshipQueryParams,
) -> Result<Json<Vec<MentorshipResponse>>, ApiError> {
    let relations = MentorshipService::list(&state.db, user_id, role, params.status).await?;
    Ok(Json(relations.into_iter().map(Into::into).collect()))
}

/// Get a mentorship the caller takes part in
#[utoipa::path(
    get,
    path = "/api/mentorship/{id}",
    params(("id" = Uuid, Path, description = "Mentorship ID")),
    responses(
        (status = 200, description = "Mentorship found", body = MentorshipResponse),
        (status = 404, description = "Mentorship not found", body = ErrorBody)
    ),
    security(("jwt" = [])),
    tag = "Mentorship"
)]
pub async fn get_mentorship(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MentorshipResponse>, ApiError> {
    let relation = MentorshipService::get(&state.db, &user_id, id).await?;
    Ok(Json(relation.into()))
}

/// Accept or decline a pending request (mentor only)
#[utoipa::path(
    post,
    path = "/api/mentorship/{id}/respond",
    params(("id" = Uuid, Path, description = "Mentorship ID")),
    request_body = RespondRequest,
    responses(
        (status = 200, description = "Request answered", body = MentorshipResponse),
        (status = 400, description = "Mentorship is no longer pending", body = ErrorBody),
        (status = 404, description = "Mentorship not found", body = ErrorBody)
    ),
    security(("jwt" = [])),
    tag = "Mentorship"
)]
pub async fn respond(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<RespondRequest>,
) -> Result<Json<MentorshipResponse>, ApiError> {
    let relation =
        MentorshipService::respond(&state.db, &user_id, id, body.accept, body.message).await?;
    Ok(Json(relation.into()))
}

/// Update the progress percentage of an active mentorship (mentor only)
#[utoipa::path(
    put,
    path = "/api/mentorship/{id}/progress",
    params(("id" = Uuid, Path, description = "Mentorship ID")),
    request_body = ProgressRequest,
    responses(
        (status = 200, description = "Progress updated", body = MentorshipResponse),
        (status = 400, description = "Out of range or mentorship not active", body = ErrorBody),
        (status = 404, description = "Mentorship not found", body = ErrorBody)
    ),
    security(("jwt" = [])),
    tag = "Mentorship"
)]
pub async fn update_progress(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<ProgressRequest>,
) -> Result<Json<MentorshipResponse>, ApiError> {
    let relation =
        MentorshipService::update_progress(&state.db, &user_id, id, body.progress).await?;
    Ok(Json(relation.into()))
}

/// Mark an active mentorship as completed (mentor only)
#[utoipa::path(
    post,
    path = "/api/mentorship/{id}/complete",
    params(("id" = Uuid, Path, description = "Mentorship ID")),
    responses(
        (status = 200, description = "Mentorship completed", body = MentorshipResponse),
        (status = 400, description = "Mentorship not active", body = ErrorBody),
        (status = 404, description = "Mentorship not found", body = ErrorBody)
    ),
    security(("jwt" = [])),
    tag = "Mentorship"
)]
pub async fn complete(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MentorshipResponse>, ApiError> {
    let relation = MentorshipService::complete(&state.db, &user_id, id).await?;
    Ok(Json(relation.into()))
}

/// Cancel a pending or active mentorship (either party)
#[utoipa::path(
    post,
    path = "/api/mentorship/{id}/cancel",
    params(("id" = Uuid, Path, description = "Mentorship ID")),
    responses(
        (status = 200, description = "Mentorship cancelled", body = MentorshipResponse),
        (status = 400, description = "Mentorship already ended", body = ErrorBody),
        (status = 404, description = "Mentorship not found", body = ErrorBody)
    ),
    security(("jwt" = [])),
    tag = "Mentorship"
)]
pub async fn cancel(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MentorshipResponse>, ApiError> {
    let relation = MentorshipService::cancel(&state.db, &user_id, id).await?;
    Ok(Json(relation.into()))
}

/// Rate a completed mentorship (mentee only, once)
#[utoipa::path(
    post,
    path = "/api/mentorship/{id}/feedback",
    params(("id" = Uuid, Path, description = "Mentorship ID")),
    request_body = MentorshipFeedbackRequest,
    responses(
        (status = 200, description = "Feedback saved", body = MentorshipResponse),
        (
            status = 400,
            description = "Invalid rating,
            not completed,
            or already rated",
            body = ErrorBody
        ),
        (status = 404, description = "Mentorship not found", body = ErrorBody)
    ),
    security(("jwt" = [])),
    tag = "Mentorship"
)]
pub async fn leave_feedback(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<MentorshipFeedbackRequest>,
) -> Result<Json<MentorshipResponse>, ApiError> {
    let relation =
        MentorshipService::leave_feedback(&state.db, &user_id, id, body.rating, body.feedback)
            .await?;
    Ok(Json(relation.into()))
}

/// Sessions belonging to a mentorship, oldest first
#[utoipa::path(
    get,
    path = "/api/mentorship/{id}/sessions",
    params(("id" = Uuid, Path, description = "Mentorship ID")),
    responses(
        (status = 200, description = "Sessions", body = Vec<SessionResponse>),
        (status = 404, description = "Mentorship not found", body = ErrorBody)
    ),
    security(("jwt" = [])),
    tag = "Mentorship"
)]
pub async fn list_sessions(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Vec<SessionResponse>>, ApiError> {
    let sessions = MentoringSessionService::list_for_mentorship(&state.db, &user_id, id).await?;
    Ok(Json(sessions.into_iter().map(Into::into).collect()))
}
