use super::{error::ServiceResult, mentor_profile::MentorProfileService};
use crate::entities::{mentoring_session, mentorship_relation};
use chrono::Utc;
use models::{mentorship::MentorshipStatus, session::SessionStatus};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

/// Summary numbers shown on a mentor's dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct MentorStats {
    pub pending_requests: u64,
    pub active_mentees: u64,
    pub completed_mentorships: u64,
    pub upcoming_sessions: u64,
    pub completed_sessions: u64,
    pub total_hours: f64,
    pub average_rating: Option<f64>,
    pub review_count: i32,
}

pub struct DashboardService;

impl DashboardService {
    pub async fn mentor_stats(
        db: &DatabaseConnection,
        mentor_id: &str,
    ) -> ServiceResult<MentorStats> {
        let relations_with = |status: MentorshipStatus| {
            mentorship_relation::Entity::find()
                .filter(mentorship_relation::Column::MentorId.eq(mentor_id))
                .filter(mentorship_relation::Column::Status.eq(status))
                .count(db)
        };

        let (pending_requests, active_mentees, completed_mentorships) = futures::try_join!(
            relations_with(MentorshipStatus::Pending),
            relations_with(MentorshipStatus::Active),
            relations_with(MentorshipStatus::Completed),
        )?;

        let upcoming_sessions = mentoring_session::Entity::find()
            .filter(mentoring_session::Column::MentorId.eq(mentor_id))
            .filter(mentoring_session::Column::Status.eq(SessionStatus::Scheduled))
            .filter(mentoring_session::Column::ScheduledAt.gt(Utc::now()))
            .count(db)
            .await?;

        let completed_sessions = mentoring_session::Entity::find()
            .filter(mentoring_session::Column::MentorId.eq(mentor_id))
            .filter(mentoring_session::Column::Status.eq(SessionStatus::Completed))
            .count(db)
            .await?;

        let total_hours: f64 = mentorship_relation::Entity::find()
            .filter(mentorship_relation::Column::MentorId.eq(mentor_id))
            .all(db)
            .await?
            .iter()
            .map(|relation| relation.total_hours)
            .sum();

        let profile = MentorProfileService::find_by_user(db, mentor_id).await?;

        Ok(MentorStats {
            pending_requests,
            active_mentees,
            completed_mentorships,
            upcoming_sessions,
            completed_sessions,
            total_hours,
            average_rating: profile.as_ref().and_then(|p| p.average_rating),
            review_count: profile.map(|p| p.review_count).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        services::{
            mentor_review::{MentorReviewService, NewReview},
            mentoring_session::{MentoringSessionService, ScheduleSession},
            mentorship::{MentorshipRequest, MentorshipService},
        },
        test_util::{seed_mentor, setup_db},
    };
    use chrono::Duration;
    use models::session::SessionType;

    fn request() -> MentorshipRequest {
        MentorshipRequest {
            mentor_id: "mentor".to_string(),
            message: None,
            goals: None,
        }
    }

    #[tokio::test]
    async fn test_empty_dashboard() {
        let db = setup_db().await;

        let stats = DashboardService::mentor_stats(&db, "mentor").await.unwrap();
        assert_eq!(stats.pending_requests, 0);
        assert_eq!(stats.total_hours, 0.0);
        assert_eq!(stats.average_rating, None);
        assert_eq!(stats.review_count, 0);
    }

    #[tokio::test]
    async fn test_mentor_stats() {
        let db = setup_db().await;
        seed_mentor(&db, "mentor").await;

        let active = MentorshipService::request(&db, "mentee-a", request())
            .await
            .unwrap();
        MentorshipService::request(&db, "mentee-b", request())
            .await
            .unwrap();
        MentorshipService::respond(&db, "mentor", active.id, true, None)
            .await
            .unwrap();

        let schedule = |hours: i64| ScheduleSession {
            mentorship_id: Some(active.id),
            mentor_id: None,
            title: "Weekly check-in".to_string(),
            description: None,
            scheduled_at: Utc::now() + Duration::hours(hours),
            duration_minutes: 60,
            session_type: SessionType::Online,
            meeting_link: None,
            location: None,
        };

        let done = MentoringSessionService::schedule(&db, "mentor", schedule(-2))
            .await
            .unwrap();
        MentoringSessionService::complete(&db, "mentor", done.id, Some(120), None)
            .await
            .unwrap();
        MentoringSessionService::schedule(&db, "mentor", schedule(48))
            .await
            .unwrap();

        MentorReviewService::create(
            &db,
            "mentee-a",
            NewReview {
                mentor_id: "mentor".to_string(),
                mentorship_id: Some(active.id),
                rating: 5,
                communication_rating: None,
                knowledge_rating: None,
                helpfulness_rating: None,
                comment: None,
            },
        )
        .await
        .unwrap();

        let stats = DashboardService::mentor_stats(&db, "mentor").await.unwrap();
        assert_eq!(
            stats,
            MentorStats {
                pending_requests: 1,
                active_mentees: 1,
                completed_mentorships: 0,
                upcoming_sessions: 1,
                completed_sessions: 1,
                total_hours: 2.0,
                average_rating: Some(5.0),
                review_count: 1,
            }
        );
    }
}
