use crate::{
    dtos::review::{
        CreateReviewRequest, CreateReviewResponse, RatingSummaryResponse, ReviewResponse,
    },
    error::{ApiError, ErrorBody},
    state::AppState,
    utils::{auth::CurrentUser, extract::{ApiJson, ApiPath}},
};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
};
use database::services::mentor_review::MentorReviewService;
use uuid::Uuid;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/mentor-reviews", post(create_review))
        .route("/mentor-reviews/{id}", delete(delete_review))
        .route("/mentor-reviews/mentor/{mentor_id}", get(list_mentor_reviews))
}

/// Review a mentor. Returns the review and the mentor's updated rating
#[utoipa::path(
    post,
    path = "/api/mentor-reviews",
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = CreateReviewResponse),
        (
            status = 400,
            description = "Invalid rating,
            self-review or already reviewed",
            body = ErrorBody
        ),
        (status = 404, description = "Mentor not found", body = ErrorBody)
    ),
    security(("jwt" = [])),
    tag = "Reviews"
)]
pub async fn create_review(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    ApiJson(body): ApiJson<CreateReviewRequest>,
) -> Result<(StatusCode, Json<CreateReviewResponse>), ApiError> {
    let (review, summary) = MentorReviewService::create(&state.db, &user_id, body.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateReviewResponse {
            review: review.into(),
            mentor_rating: summary.into(),
        }),
    ))
}

/// Delete one of the caller's reviews. Returns the mentor's updated rating
#[utoipa::path(
    delete,
    path = "/api/mentor-reviews/{id}",
    params(("id" = Uuid, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review deleted", body = RatingSummaryResponse),
        (status = 404, description = "Review not found", body = ErrorBody)
    ),
    security(("jwt" = [])),
    tag = "Reviews"
)]
pub async fn delete_review(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<RatingSummaryResponse>, ApiError> {
    let summary = MentorReviewService::delete(&state.db, &user_id, id).await?;
    Ok(Json(summary.into()))
}

#[utoipa::path(
    get,
    path = "/api/mentor-reviews/mentor/{mentor_id}",
    params(("mentor_id" = String, Path, description = "Mentor's user id")),
    responses(
        (status = 200, description = "Approved reviews, newest first", body = Vec<ReviewResponse>)
    ),
    security(("jwt" = [])),
    tag = "Reviews"
)]
pub async fn list_mentor_reviews(
    State(state): State<AppState>,
    ApiPath(mentor_id): ApiPath<String>,
) -> Result<Json<Vec<ReviewResponse>>, ApiError> {
    let reviews = MentorReviewService::list_for_mentor(&state.db, &mentor_id).await?;
    Ok(Json(reviews.into_iter().map(Into::into).collect()))
}
