use database::services::dashboard::MentorStats;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct MentorStatsResponse {
    pub pending_requests: u64,
    pub active_mentees: u64,
    pub completed_mentorships: u64,
    pub upcoming_sessions: u64,
    pub completed_sessions: u64,
    pub total_hours: f64,
    pub average_rating: Option<f64>,
    pub review_count: i32,
}

impl From<MentorStats> for MentorStatsResponse {
    fn from(stats: MentorStats) -> Self {
        Self {
            pending_requests: stats.pending_requests,
            active_mentees: stats.active_mentees,
            completed_mentorships: stats.completed_mentorships,
            upcoming_sessions: stats.upcoming_sessions,
            completed_sessions: stats.completed_sessions,
            total_hours: stats.total_hours,
            average_rating: stats.average_rating,
            review_count: stats.review_count,
        }
    }
}
