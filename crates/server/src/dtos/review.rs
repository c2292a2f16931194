use chrono::{DateTime, Utc};
use database::{entities::mentor_review, services::mentor_review::NewReview};
use models::rating::RatingSummary;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReviewRequest {
    pub mentor_id: String,
    pub mentorship_id: Option<Uuid>,
    /// 1-5
    pub rating: i32,
    pub communication_rating: Option<i32>,
    pub knowledge_rating: Option<i32>,
    pub helpfulness_rating: Option<i32>,
    pub comment: Option<String>,
}

impl From<CreateReviewRequest> for NewReview {
    fn from(request: CreateReviewRequest) -> Self {
        Self {
            mentor_id: request.mentor_id,
            mentorship_id: request.mentorship_id,
            rating: request.rating,
            communication_rating: request.communication_rating,
            knowledge_rating: request.knowledge_rating,
            helpfulness_rating: request.helpfulness_rating,
            comment: request.comment,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub mentor_id: String,
    pub reviewer_id: String,
    pub mentorship_id: Option<Uuid>,
    pub rating: i32,
    pub communication_rating: Option<i32>,
    pub knowledge_rating: Option<i32>,
    pub helpfulness_rating: Option<i32>,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<mentor_review::Model> for ReviewResponse {
    fn from(review: mentor_review::Model) -> Self {
        Self {
            id: review.id,
            mentor_id: review.mentor_id,
            reviewer_id: review.reviewer_id,
            mentorship_id: review.mentorship_id,
            rating: review.rating,
            communication_rating: review.communication_rating,
            knowledge_rating: review.knowledge_rating,
            helpfulness_rating: review.helpfulness_rating,
            comment: review.comment,
            created_at: review.created_at,
        }
    }
}

/// The mentor's rating aggregate after a review write
#[derive(Debug, Serialize, ToSchema)]
pub struct RatingSummaryResponse {
    pub average_rating: Option<f64>,
    pub review_count: i32,
}

impl From<RatingSummary> for RatingSummaryResponse {
    fn from(summary: RatingSummary) -> Self {
        Self {
            average_rating: summary.average,
            review_count: summary.count,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateReviewResponse {
    pub review: ReviewResponse,
    pub mentor_rating: RatingSummaryResponse,
}
