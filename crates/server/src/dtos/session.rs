use chrono::{DateTime, Utc};
use database::{
    entities::mentoring_session,
    services::mentoring_session::{ScheduleSession, SessionChanges, SessionFilter},
};
use models::{
    mentorship::Role,
    session::{SessionStatus, SessionType},
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSessionRequest {
    pub mentorship_id: Option<Uuid>,
    pub mentor_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    #[schema(value_type = String, example = "Online")]
    pub session_type: SessionType,
    pub meeting_link: Option<String>,
    pub location: Option<String>,
}

impl From<CreateSessionRequest> for ScheduleSession {
    fn from(request: CreateSessionRequest) -> Self {
        Self {
            mentorship_id: request.mentorship_id,
            mentor_id: request.mentor_id,
            title: request.title,
            description: request.description,
            scheduled_at: request.scheduled_at,
            duration_minutes: request.duration_minutes,
            session_type: request.session_type,
            meeting_link: request.meeting_link,
            location: request.location,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSessionRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    #[schema(value_type = Option<String>)]
    pub session_type: Option<SessionType>,
    pub meeting_link: Option<String>,
    pub location: Option<String>,
}

impl From<UpdateSessionRequest> for SessionChanges {
    fn from(request: UpdateSessionRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            scheduled_at: request.scheduled_at,
            duration_minutes: request.duration_minutes,
            session_type: request.session_type,
            meeting_link: request.meeting_link,
            location: request.location,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CompleteSessionRequest {
    /// Falls back to the scheduled duration when omitted
    pub actual_duration_minutes: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CancelSessionRequest {
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SessionFeedbackRequest {
    /// 1-5
    pub rating: i32,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SessionQueryParams {
    /// `mentor` or `mentee`. Both sides when omitted
    #[param(value_type = Option<String>)]
    pub role: Option<Role>,

    #[param(value_type = Option<String>)]
    pub status: Option<SessionStatus>,

    #[serde(default)]
    pub upcoming: bool,
}

impl From<SessionQueryParams> for SessionFilter {
    fn from(params: SessionQueryParams) -> Self {
        Self {
            role: params.role,
            status: params.status,
            upcoming: params.upcoming,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub id: Uuid,
    pub mentorship_id: Option<Uuid>,
    pub mentor_id: String,
    pub mentee_id: String,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub actual_duration_minutes: Option<i32>,
    #[schema(value_type = String, example = "Online")]
    pub session_type: SessionType,
    pub meeting_link: Option<String>,
    pub location: Option<String>,
    #[schema(value_type = String, example = "Scheduled")]
    pub status: SessionStatus,
    pub mentor_notes: Option<String>,
    pub mentee_notes: Option<String>,
    pub mentor_rating: Option<i32>,
    pub mentee_rating: Option<i32>,
    pub cancellation_reason: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl From<mentoring_session::Model> for SessionResponse {
    fn from(session: mentoring_session::Model) -> Self {
        Self {
            id: session.id,
            mentorship_id: session.mentorship_id,
            mentor_id: session.mentor_id,
            mentee_id: session.mentee_id,
            title: session.title,
            description: session.description,
            scheduled_at: session.scheduled_at,
            duration_minutes: session.duration_minutes,
            actual_duration_minutes: session.actual_duration_minutes,
            session_type: session.session_type,
            meeting_link: session.meeting_link,
            location: session.location,
            status: session.status,
            mentor_notes: session.mentor_notes,
            mentee_notes: session.mentee_notes,
            mentor_rating: session.mentor_rating,
            mentee_rating: session.mentee_rating,
            cancellation_reason: session.cancellation_reason,
            completed_at: session.completed_at,
            cancelled_at: session.cancelled_at,
        }
    }
}
