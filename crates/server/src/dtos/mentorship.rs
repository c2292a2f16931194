use chrono::{DateTime, Utc};
use database::{entities::mentorship_relation, services::mentorship::MentorshipRequest};
use models::mentorship::MentorshipStatus;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMentorshipRequest {
    pub mentor_id: String,
    pub message: Option<String>,
    pub goals: Option<String>,
}

impl From<CreateMentorshipRequest> for MentorshipRequest {
    fn from(request: CreateMentorshipRequest) -> Self {
        Self {
            mentor_id: request.mentor_id,
            message: request.message,
            goals: request.goals,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RespondRequest {
    pub accept: bool,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProgressRequest {
    /// Percentage, 0-100
    pub progress: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct MentorshipFeedbackRequest {
    /// 1-5
    pub rating: i32,
    pub feedback: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct MentorshipQueryParams {
    #[param(value_type = Option<String>)]
    pub status: Option<MentorshipStatus>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MentorshipResponse {
    pub id: Uuid,
    pub mentor_id: String,
    pub mentee_id: String,
    #[schema(value_type = String, example = "Active")]
    pub status: MentorshipStatus,
    pub request_message: Option<String>,
    pub response_message: Option<String>,
    pub goals: Option<String>,
    pub progress: i32,
    pub sessions_completed: i32,
    pub total_hours: f64,
    pub mentee_rating: Option<i32>,
    pub mentee_feedback: Option<String>,
    pub requested_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub last_activity_at: Option<DateTime<Utc>>,
}

impl From<mentorship_relation::Model> for MentorshipResponse {
    fn from(relation: mentorship_relation::Model) -> Self {
        Self {
            id: relation.id,
            mentor_id: relation.mentor_id,
            mentee_id: relation.mentee_id,
            status: relation.status,
            request_message: relation.request_message,
            response_message: relation.response_message,
            goals: relation.goals,
            progress: relation.progress,
            sessions_completed: relation.sessions_completed,
            total_hours: relation.total_hours,
            mentee_rating: relation.mentee_rating,
            mentee_feedback: relation.mentee_feedback,
            requested_at: relation.requested_at,
            responded_at: relation.responded_at,
            started_at: relation.started_at,
            ended_at: relation.ended_at,
            last_activity_at: relation.last_activity_at,
        }
    }
}
