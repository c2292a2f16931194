use crate::{
    dtos::session::{
        CancelSessionRequest, CompleteSessionRequest, CreateSessionRequest, SessionFeedbackRequest,
        SessionQueryParams, SessionResponse, UpdateSessionRequest,
    },
    error::{ApiError, ErrorBody},
    state::AppState,
    utils::{auth::CurrentUser, extract::{ApiJson, ApiPath, ApiQuery}},
};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use database::services::mentoring_session::MentoringSessionService;
use uuid::Uuid;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/mentoring-sessions",
            post(schedule_session).get(list_sessions),
        )
        .route(
            "/mentoring-sessions/{id}",
            get(get_session).put(update_session),
        )
        .route("/mentoring-sessions/{id}/complete", post(complete_session))
        .route("/mentoring-sessions/{id}/cancel", post(cancel_session))
        .route("/mentoring-sessions/{id}/feedback", post(leave_feedback))
}

/// Schedule a session, either inside an active mentorship or directly with a mentor
#[utoipa::path(
    post,
    path = "/api/mentoring-sessions",
    request_body = CreateSessionRequest,
    responses(
        (status = 201, description = "Session scheduled", body = SessionResponse),
        (status = 400, description = "Invalid session or mentorship not active", body = ErrorBody),
        (status = 404, description = "Mentorship or mentor not found", body = ErrorBody)
    ),
    security(("jwt" = [])),
    tag = "Sessions"
)]
pub async fn schedule_session(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    ApiJson(body): ApiJson<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let session = MentoringSessionService::schedule(&state.db, &user_id, body.into()).await?;
    Ok((StatusCode::CREATED, Json(session.into())))
}

/// The caller's sessions, optionally narrowed by role, status or upcoming
#[utoipa::path(
    get,
    path = "/api/mentoring-sessions",
    params(SessionQueryParams),
    responses(
        (status = 200, description = "Sessions", body = Vec<SessionResponse>)
    ),
    security(("jwt" = [])),
    tag = "Sessions"
)]
pub async fn list_sessions(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    ApiQuery(params): ApiQuery<SessionQueryParams>,
) -> Result<Json<Vec<SessionResponse>>, ApiError> {
    let sessions = MentoringSessionService::list(&state.db, &user_id, params.into()).await?;
    Ok(Json(sessions.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/api/mentoring-sessions/{id}",
    params(("id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Session found", body = SessionResponse),
        (status = 404, description = "Session not found", body = ErrorBody)
    ),
    security(("jwt" = [])),
    tag = "Sessions"
)]
pub async fn get_session(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = MentoringSessionService::get(&state.db, &user_id, id).await?;
    Ok(Json(session.into()))
}

/// Reschedule or edit a session that is still scheduled
#[utoipa::path(
    put,
    path = "/api/mentoring-sessions/{id}",
    params(("id" = Uuid, Path, description = "Session ID")),
    request_body = UpdateSessionRequest,
    responses(
        (status = 200, description = "Session updated", body = SessionResponse),
        (status = 400, description = "Session already completed or cancelled", body = ErrorBody),
        (status = 404, description = "Session not found", body = ErrorBody)
    ),
    security(("jwt" = [])),
    tag = "Sessions"
)]
pub async fn update_session(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<UpdateSessionRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = MentoringSessionService::update(&state.db, &user_id, id, body.into()).await?;
    Ok(Json(session.into()))
}

/// Complete a session (mentor only) and credit its hours to the mentorship
#[utoipa::path(
    post,
    path = "/api/mentoring-sessions/{id}/complete",
    params(("id" = Uuid, Path, description = "Session ID")),
    request_body(content = CompleteSessionRequest, description = "May be omitted"),
    responses(
        (status = 200, description = "Session completed", body = SessionResponse),
        (status = 400, description = "Session not scheduled", body = ErrorBody),
        (status = 404, description = "Session not found", body = ErrorBody)
    ),
    security(("jwt" = [])),
    tag = "Sessions"
)]
pub async fn complete_session(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    body: Option<ApiJson<CompleteSessionRequest>>,
) -> Result<Json<SessionResponse>, ApiError> {
    let body = body.map(|ApiJson(body)| body).unwrap_or_default();
    let session = MentoringSessionService::complete(
        &state.db,
        &user_id,
        id,
        body.actual_duration_minutes,
        body.notes,
    )
    .await?;
    Ok(Json(session.into()))
}

#[utoipa::path(
    post,
    path = "/api/mentoring-sessions/{id}/cancel",
    params(("id" = Uuid, Path, description = "Session ID")),
    request_body(content = CancelSessionRequest, description = "May be omitted"),
    responses(
        (status = 200, description = "Session cancelled", body = SessionResponse),
        (status = 400, description = "Session not scheduled", body = ErrorBody),
        (status = 404, description = "Session not found", body = ErrorBody)
    ),
    security(("jwt" = [])),
    tag = "Sessions"
)]
pub async fn cancel_session(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    body: Option<ApiJson<CancelSessionRequest>>,
) -> Result<Json<SessionResponse>, ApiError> {
    let body = body.map(|ApiJson(body)| body).unwrap_or_default();
    let session = MentoringSessionService::cancel(&state.db, &user_id, id, body.reason).await?;
    Ok(Json(session.into()))
}

/// Rate a completed session from the caller's side
#[utoipa::path(
    post,
    path = "/api/mentoring-sessions/{id}/feedback",
    params(("id" = Uuid, Path, description = "Session ID")),
    request_body = SessionFeedbackRequest,
    responses(
        (status = 200, description = "Feedback saved", body = SessionResponse),
        (status = 400, description = "Invalid rating or session not completed", body = ErrorBody),
        (status = 404, description = "Session not found", body = ErrorBody)
    ),
    security(("jwt" = [])),
    tag = "Sessions"
)]
pub async fn leave_feedback(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<SessionFeedbackRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session =
        MentoringSessionService::leave_feedback(&state.db, &user_id, id, body.rating, body.notes)
            .await?;
    Ok(Json(session.into()))
}
