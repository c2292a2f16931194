use super::{
    error::{ServiceError, ServiceResult},
    mentor_profile::MentorProfileService,
    mentorship::MentorshipService,
};
use crate::entities::{mentoring_session, mentorship_relation};
use chrono::{DateTime, Utc};
use log::{info, warn};
use models::{
    mentorship::Role,
    rating::check_rating,
    session::{SessionStatus, SessionType, check_duration, effective_minutes, minutes_to_hours},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct ScheduleSession {
    /// When set, both parties come from the mentorship
    pub mentorship_id: Option<Uuid>,
    /// Required for a standalone session booked by a mentee
    pub mentor_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub session_type: SessionType,
    pub meeting_link: Option<String>,
    pub location: Option<String>,
}

/// Fields that may change while a session is still scheduled
#[derive(Debug, Clone, Default)]
pub struct SessionChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub session_type: Option<SessionType>,
    pub meeting_link: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionFilter {
    pub role: Option<Role>,
    pub status: Option<SessionStatus>,
    /// Only scheduled sessions that have not started yet, soonest first
    pub upcoming: bool,
}

pub struct MentoringSessionService;

impl MentoringSessionService {
    pub async fn schedule(
        db: &DatabaseConnection,
        user_id: &str,
        params: ScheduleSession,
    ) -> ServiceResult<mentoring_session::Model> {
        let duration = check_duration(params.duration_minutes)?;
        if params.title.trim().is_empty() {
            return Err(ServiceError::validation("Title must not be empty"));
        }

        let (mentor_id, mentee_id) = match params.mentorship_id {
            Some(mentorship_id) => {
                let relation = MentorshipService::find_as(db, mentorship_id, user_id, None).await?;
                relation.status.ensure_active("schedule a session for")?;

                if let Some(mentor_id) = &params.mentor_id
                    && *mentor_id != relation.mentor_id
                {
                    return Err(ServiceError::validation(
                        "mentor_id does not match the mentorship",
                    ));
                }
                (relation.mentor_id, relation.mentee_id)
            }
            None => {
                let mentor_id = params.mentor_id.ok_or_else(|| {
                    ServiceError::validation("Either mentorship_id or mentor_id is required")
                })?;
                if mentor_id == user_id {
                    return Err(ServiceError::validation(
                        "You cannot book a session with yourself",
                    ));
                }
                MentorProfileService::require(db, &mentor_id).await?;
                (mentor_id, user_id.to_string())
            }
        };

        let now = Utc::now();
        let session = mentoring_session::ActiveModel {
            id: Set(Uuid::new_v4()),
            mentorship_id: Set(params.mentorship_id),
            mentor_id: Set(mentor_id),
            mentee_id: Set(mentee_id),
            title: Set(params.title),
            description: Set(params.description),
            scheduled_at: Set(params.scheduled_at),
            duration_minutes: Set(duration),
            actual_duration_minutes: Set(None),
            session_type: Set(params.session_type),
            meeting_link: Set(params.meeting_link),
            location: Set(params.location),
            status: Set(SessionStatus::Scheduled),
            mentor_notes: Set(None),
            mentee_notes: Set(None),
            mentor_rating: Set(None),
            mentee_rating: Set(None),
            cancellation_reason: Set(None),
            completed_at: Set(None),
            cancelled_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await?;

        info!(
            "Session {} scheduled for {} between {} and {}",
            session.id, session.scheduled_at, session.mentor_id, session.mentee_id
        );
        Ok(session)
    }

    /// Reschedule or edit a session that has not happened yet
    pub async fn update(
        db: &DatabaseConnection,
        user_id: &str,
        id: Uuid,
        changes: SessionChanges,
    ) -> ServiceResult<mentoring_session::Model> {
        let session = Self::find_as(db, id, user_id, None).await?;
        session.status.ensure_scheduled("reschedule")?;

        let mut active: mentoring_session::ActiveModel = session.into();
        if let Some(title) = changes.title {
            if title.trim().is_empty() {
                return Err(ServiceError::validation("Title must not be empty"));
            }
            active.title = Set(title);
        }
        if let Some(duration) = changes.duration_minutes {
            active.duration_minutes = Set(check_duration(duration)?);
        }
        if let Some(description) = changes.description {
            active.description = Set(Some(description));
        }
        if let Some(scheduled_at) = changes.scheduled_at {
            active.scheduled_at = Set(scheduled_at);
        }
        if let Some(session_type) = changes.session_type {
            active.session_type = Set(session_type);
        }
        if let Some(link) = changes.meeting_link {
            active.meeting_link = Set(Some(link));
        }
        if let Some(location) = changes.location {
            active.location = Set(Some(location));
        }
        active.updated_at = Set(Utc::now());

        Ok(active.update(db).await?)
    }

    /// Marks the session done and credits the parent mentorship.
    ///
    /// The mentorship counters are read and written back inside the same
    /// transaction with no version check, so two concurrent completions on
    /// one mentorship can lose an increment.
    pub async fn complete(
        db: &DatabaseConnection,
        mentor_id: &str,
        id: Uuid,
        actual_duration_minutes: Option<i32>,
        notes: Option<String>,
    ) -> ServiceResult<mentoring_session::Model> {
        let actual = actual_duration_minutes.map(check_duration).transpose()?;

        let txn = db.begin().await?;
        let session = Self::find_as(&txn, id, mentor_id, Some(Role::Mentor)).await?;
        let status = session.status.complete()?;
        let minutes = effective_minutes(actual, session.duration_minutes);
        let mentorship_id = session.mentorship_id;

        let now = Utc::now();
        let mut active: mentoring_session::ActiveModel = session.into();
        active.status = Set(status);
        active.actual_duration_minutes = Set(Some(minutes));
        if notes.is_some() {
            active.mentor_notes = Set(notes);
        }
        active.completed_at = Set(Some(now));
        active.updated_at = Set(now);
        let session = active.update(&txn).await?;

        if let Some(mentorship_id) = mentorship_id {
            Self::credit_mentorship(&txn, mentorship_id, minutes).await?;
        }

        txn.commit().await?;
        info!("Session {} completed after {minutes} minutes", session.id);
        Ok(session)
    }

    pub async fn cancel(
        db: &DatabaseConnection,
        user_id: &str,
        id: Uuid,
        reason: Option<String>,
    ) -> ServiceResult<mentoring_session::Model> {
        let session = Self::find_as(db, id, user_id, None).await?;
        let status = session.status.cancel()?;

        let now = Utc::now();
        let mut active: mentoring_session::ActiveModel = session.into();
        active.status = Set(status);
        active.cancellation_reason = Set(reason);
        active.cancelled_at = Set(Some(now));
        active.updated_at = Set(now);

        let session = active.update(db).await?;
        info!("Session {} cancelled by {user_id}", session.id);
        Ok(session)
    }

    /// Post-session rating and notes. Each side fills its own columns
    pub async fn leave_feedback(
        db: &DatabaseConnection,
        user_id: &str,
        id: Uuid,
        rating: i32,
        notes: Option<String>,
    ) -> ServiceResult<mentoring_session::Model> {
        let rating = check_rating(rating)?;
        let session = Self::find_as(db, id, user_id, None).await?;
        session.status.ensure_completed("leave feedback on")?;

        let role = Role::of(user_id, &session.mentor_id, &session.mentee_id)
            .ok_or(ServiceError::NotFound("Session"))?;

        let mut active: mentoring_session::ActiveModel = session.into();
        match role {
            Role::Mentor => {
                active.mentor_rating = Set(Some(rating));
                if notes.is_some() {
                    active.mentor_notes = Set(notes);
                }
            }
            Role::Mentee => {
                active.mentee_rating = Set(Some(rating));
                if notes.is_some() {
                    active.mentee_notes = Set(notes);
                }
            }
        }
        active.updated_at = Set(Utc::now());

        Ok(active.update(db).await?)
    }

    pub async fn get(
        db: &DatabaseConnection,
        user_id: &str,
        id: Uuid,
    ) -> ServiceResult<mentoring_session::Model> {
        Self::find_as(db, id, user_id, None).await
    }

    pub async fn list(
        db: &DatabaseConnection,
        user_id: &str,
        filter: SessionFilter,
    ) -> ServiceResult<Vec<mentoring_session::Model>> {
        let party = match filter.role {
            Some(Role::Mentor) => {
                Condition::all().add(mentoring_session::Column::MentorId.eq(user_id))
            }
            Some(Role::Mentee) => {
                Condition::all().add(mentoring_session::Column::MenteeId.eq(user_id))
            }
            None => Condition::any()
                .add(mentoring_session::Column::MentorId.eq(user_id))
                .add(mentoring_session::Column::MenteeId.eq(user_id)),
        };

        let mut condition = Condition::all().add(party);
        if let Some(status) = filter.status {
            condition = condition.add(mentoring_session::Column::Status.eq(status));
        }

        let query = mentoring_session::Entity::find();
        let query = if filter.upcoming {
            query
                .filter(
                    condition
                        .add(mentoring_session::Column::Status.eq(SessionStatus::Scheduled))
                        .add(mentoring_session::Column::ScheduledAt.gt(Utc::now())),
                )
                .order_by_asc(mentoring_session::Column::ScheduledAt)
        } else {
            query
                .filter(condition)
                .order_by_desc(mentoring_session::Column::ScheduledAt)
        };

        Ok(query.all(db).await?)
    }

    /// Sessions of one mentorship, oldest first. Party-only
    pub async fn list_for_mentorship(
        db: &DatabaseConnection,
        user_id: &str,
        mentorship_id: Uuid,
    ) -> ServiceResult<Vec<mentoring_session::Model>> {
        MentorshipService::find_as(db, mentorship_id, user_id, None).await?;

        Ok(mentoring_session::Entity::find()
            .filter(mentoring_session::Column::MentorshipId.eq(mentorship_id))
            .order_by_asc(mentoring_session::Column::ScheduledAt)
            .all(db)
            .await?)
    }

    async fn credit_mentorship<C: ConnectionTrait>(
        conn: &C,
        mentorship_id: Uuid,
        minutes: i32,
    ) -> ServiceResult<()> {
        let Some(relation) = mentorship_relation::Entity::find_by_id(mentorship_id)
            .one(conn)
            .await?
        else {
            warn!("Session completed for missing mentorship {mentorship_id}");
            return Ok(());
        };

        let now = Utc::now();
        let sessions_completed = relation.sessions_completed + 1;
        let total_hours = relation.total_hours + minutes_to_hours(minutes);

        let mut active: mentorship_relation::ActiveModel = relation.into();
        active.sessions_completed = Set(sessions_completed);
        active.total_hours = Set(total_hours);
        active.last_activity_at = Set(Some(now));
        active.updated_at = Set(now);
        active.update(conn).await?;

        Ok(())
    }

    async fn find_as<C: ConnectionTrait>(
        conn: &C,
        id: Uuid,
        user_id: &str,
        role: Option<Role>,
    ) -> ServiceResult<mentoring_session::Model> {
        let session = mentoring_session::Entity::find_by_id(id)
            .one(conn)
            .await?
            .ok_or(ServiceError::NotFound("Session"))?;

        let caller = Role::of(user_id, &session.mentor_id, &session.mentee_id);
        match (caller, role) {
            (None, _) => Err(ServiceError::NotFound("Session")),
            (Some(caller), Some(required)) if caller != required => {
                Err(ServiceError::NotFound("Session"))
            }
            _ => Ok(session),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        services::mentorship::MentorshipRequest,
        test_util::{seed_mentor, setup_db},
    };
    use chrono::Duration;

    async fn active_mentorship(db: &DatabaseConnection) -> mentorship_relation::Model {
        seed_mentor(db, "mentor").await;
        let relation = MentorshipService::request(
            db,
            "mentee",
            MentorshipRequest {
                mentor_id: "mentor".to_string(),
                message: None,
                goals: None,
            },
        )
        .await
        .unwrap();
        MentorshipService::respond(db, "mentor", relation.id, true, None)
            .await
            .unwrap()
    }

    fn session_for(mentorship_id: Option<Uuid>, hours_from_now: i64) -> ScheduleSession {
        ScheduleSession {
            mentorship_id,
            mentor_id: None,
            title: "Resume review".to_string(),
            description: None,
            scheduled_at: Utc::now() + Duration::hours(hours_from_now),
            duration_minutes: 90,
            session_type: SessionType::Online,
            meeting_link: Some("https://meet.example.com/abc".to_string()),
            location: None,
        }
    }

    #[tokio::test]
    async fn test_schedule_inherits_parties_from_mentorship() {
        let db = setup_db().await;
        let relation = active_mentorship(&db).await;

        let session =
            MentoringSessionService::schedule(&db, "mentee", session_for(Some(relation.id), 24))
                .await
                .unwrap();

        assert_eq!(session.mentor_id, "mentor");
        assert_eq!(session.mentee_id, "mentee");
        assert_eq!(session.status, SessionStatus::Scheduled);
    }

    #[tokio::test]
    async fn test_schedule_requires_active_mentorship() {
        let db = setup_db().await;
        seed_mentor(&db, "mentor").await;
        let pending = MentorshipService::request(
            &db,
            "mentee",
            MentorshipRequest {
                mentor_id: "mentor".to_string(),
                message: None,
                goals: None,
            },
        )
        .await
        .unwrap();

        let result =
            MentoringSessionService::schedule(&db, "mentee", session_for(Some(pending.id), 24))
                .await;
        assert!(matches!(result, Err(ServiceError::Transition(_))));
    }

    #[tokio::test]
    async fn test_standalone_session_needs_mentor() {
        let db = setup_db().await;

        let missing = MentoringSessionService::schedule(&db, "mentee", session_for(None, 24)).await;
        assert!(matches!(missing, Err(ServiceError::Validation(_))));

        let mut params = session_for(None, 24);
        params.mentor_id = Some("ghost".to_string());
        let unknown = MentoringSessionService::schedule(&db, "mentee", params).await;
        assert!(matches!(
            unknown,
            Err(ServiceError::NotFound("Mentor profile"))
        ));

        seed_mentor(&db, "mentor").await;
        let mut params = session_for(None, 24);
        params.mentor_id = Some("mentor".to_string());
        let session = MentoringSessionService::schedule(&db, "mentee", params)
            .await
            .unwrap();
        assert_eq!(session.mentorship_id, None);
        assert_eq!(session.mentee_id, "mentee");
    }

    #[tokio::test]
    async fn test_complete_falls_back_to_scheduled_duration() {
        let db = setup_db().await;
        let relation = active_mentorship(&db).await;
        let session =
            MentoringSessionService::schedule(&db, "mentee", session_for(Some(relation.id), 1))
                .await
                .unwrap();

        let completed = MentoringSessionService::complete(&db, "mentor", session.id, None, None)
            .await
            .unwrap();
        assert_eq!(completed.status, SessionStatus::Completed);
        assert_eq!(completed.actual_duration_minutes, Some(90));
        assert!(completed.completed_at.is_some());

        let relation = MentorshipService::get(&db, "mentor", relation.id)
            .await
            .unwrap();
        assert_eq!(relation.sessions_completed, 1);
        assert_eq!(relation.total_hours, 1.5);
    }

    #[tokio::test]
    async fn test_complete_accumulates_actual_minutes() {
        let db = setup_db().await;
        let relation = active_mentorship(&db).await;

        for actual in [30, 60] {
            let session =
                MentoringSessionService::schedule(&db, "mentor", session_for(Some(relation.id), 1))
                    .await
                    .unwrap();
            MentoringSessionService::complete(
                &db,
                "mentor",
                session.id,
                Some(actual),
                Some("Covered system design".to_string()),
            )
            .await
            .unwrap();
        }

        let relation = MentorshipService::get(&db, "mentee", relation.id)
            .await
            .unwrap();
        assert_eq!(relation.sessions_completed, 2);
        assert_eq!(relation.total_hours, 1.5);
    }

    #[tokio::test]
    async fn test_terminal_states_reject_transitions() {
        let db = setup_db().await;
        let relation = active_mentorship(&db).await;

        let done =
            MentoringSessionService::schedule(&db, "mentee", session_for(Some(relation.id), 1))
                .await
                .unwrap();
        MentoringSessionService::complete(&db, "mentor", done.id, None, None)
            .await
            .unwrap();
        let cancel_done = MentoringSessionService::cancel(&db, "mentee", done.id, None).await;
        assert!(matches!(cancel_done, Err(ServiceError::Transition(_))));
        let complete_again =
            MentoringSessionService::complete(&db, "mentor", done.id, None, None).await;
        assert!(matches!(complete_again, Err(ServiceError::Transition(_))));

        let dropped =
            MentoringSessionService::schedule(&db, "mentee", session_for(Some(relation.id), 2))
                .await
                .unwrap();
        let cancelled = MentoringSessionService::cancel(
            &db,
            "mentee",
            dropped.id,
            Some("Conflict".to_string()),
        )
        .await
        .unwrap();
        assert_eq!(cancelled.status, SessionStatus::Cancelled);
        assert_eq!(cancelled.cancellation_reason.as_deref(), Some("Conflict"));

        let complete_cancelled =
            MentoringSessionService::complete(&db, "mentor", dropped.id, None, None).await;
        assert!(matches!(
            complete_cancelled,
            Err(ServiceError::Transition(_))
        ));

        // The cancelled session did not count
        let relation = MentorshipService::get(&db, "mentor", relation.id)
            .await
            .unwrap();
        assert_eq!(relation.sessions_completed, 1);
    }

    #[tokio::test]
    async fn test_only_mentor_completes() {
        let db = setup_db().await;
        let relation = active_mentorship(&db).await;
        let session =
            MentoringSessionService::schedule(&db, "mentee", session_for(Some(relation.id), 1))
                .await
                .unwrap();

        let result = MentoringSessionService::complete(&db, "mentee", session.id, None, None).await;
        assert!(matches!(result, Err(ServiceError::NotFound("Session"))));
    }

    #[tokio::test]
    async fn test_feedback_fills_callers_side() {
        let db = setup_db().await;
        let relation = active_mentorship(&db).await;
        let session =
            MentoringSessionService::schedule(&db, "mentee", session_for(Some(relation.id), 1))
                .await
                .unwrap();

        let early =
            MentoringSessionService::leave_feedback(&db, "mentee", session.id, 5, None).await;
        assert!(matches!(early, Err(ServiceError::Transition(_))));

        MentoringSessionService::complete(&db, "mentor", session.id, None, None)
            .await
            .unwrap();

        let from_mentee = MentoringSessionService::leave_feedback(
            &db,
            "mentee",
            session.id,
            4,
            Some("Very useful".to_string()),
        )
        .await
        .unwrap();
        assert_eq!(from_mentee.mentee_rating, Some(4));
        assert_eq!(from_mentee.mentor_rating, None);

        let from_mentor =
            MentoringSessionService::leave_feedback(&db, "mentor", session.id, 5, None)
                .await
                .unwrap();
        assert_eq!(from_mentor.mentor_rating, Some(5));
        assert_eq!(from_mentor.mentee_notes.as_deref(), Some("Very useful"));

        let invalid =
            MentoringSessionService::leave_feedback(&db, "mentor", session.id, 0, None).await;
        assert!(matches!(invalid, Err(ServiceError::Value(_))));
    }

    #[tokio::test]
    async fn test_feedback_without_notes_keeps_existing_notes() {
        let db = setup_db().await;
        let relation = active_mentorship(&db).await;
        let session =
            MentoringSessionService::schedule(&db, "mentee", session_for(Some(relation.id), 1))
                .await
                .unwrap();
        MentoringSessionService::complete(
            &db,
            "mentor",
            session.id,
            None,
            Some("Covered system design".to_string()),
        )
        .await
        .unwrap();

        MentoringSessionService::leave_feedback(
            &db,
            "mentee",
            session.id,
            4,
            Some("Clear explanations".to_string()),
        )
        .await
        .unwrap();
        let rerated = MentoringSessionService::leave_feedback(&db, "mentee", session.id, 5, None)
            .await
            .unwrap();
        assert_eq!(rerated.mentee_rating, Some(5));
        assert_eq!(rerated.mentee_notes.as_deref(), Some("Clear explanations"));

        let rerated = MentoringSessionService::leave_feedback(&db, "mentor", session.id, 3, None)
            .await
            .unwrap();
        assert_eq!(rerated.mentor_rating, Some(3));
        assert_eq!(rerated.mentor_notes.as_deref(), Some("Covered system design"));
    }

    #[tokio::test]
    async fn test_update_while_scheduled() {
        let db = setup_db().await;
        let relation = active_mentorship(&db).await;
        let session =
            MentoringSessionService::schedule(&db, "mentee", session_for(Some(relation.id), 1))
                .await
                .unwrap();

        let moved_to = Utc::now() + Duration::days(3);
        let updated = MentoringSessionService::update(
            &db,
            "mentor",
            session.id,
            SessionChanges {
                scheduled_at: Some(moved_to),
                duration_minutes: Some(45),
                session_type: Some(SessionType::InPerson),
                location: Some("Library room 2".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.duration_minutes, 45);
        assert_eq!(updated.session_type, SessionType::InPerson);

        MentoringSessionService::cancel(&db, "mentor", session.id, None)
            .await
            .unwrap();
        let late = MentoringSessionService::update(
            &db,
            "mentor",
            session.id,
            SessionChanges {
                duration_minutes: Some(30),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(late, Err(ServiceError::Transition(_))));
    }

    #[tokio::test]
    async fn test_list_upcoming() {
        let db = setup_db().await;
        let relation = active_mentorship(&db).await;

        let past =
            MentoringSessionService::schedule(&db, "mentee", session_for(Some(relation.id), -48))
                .await
                .unwrap();
        let later =
            MentoringSessionService::schedule(&db, "mentee", session_for(Some(relation.id), 72))
                .await
                .unwrap();
        let sooner =
            MentoringSessionService::schedule(&db, "mentee", session_for(Some(relation.id), 24))
                .await
                .unwrap();
        let cancelled =
            MentoringSessionService::schedule(&db, "mentee", session_for(Some(relation.id), 36))
                .await
                .unwrap();
        MentoringSessionService::cancel(&db, "mentor", cancelled.id, None)
            .await
            .unwrap();

        let upcoming = MentoringSessionService::list(
            &db,
            "mentee",
            SessionFilter {
                upcoming: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let ids: Vec<Uuid> = upcoming.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![sooner.id, later.id]);

        let as_mentor = MentoringSessionService::list(
            &db,
            "mentor",
            SessionFilter {
                role: Some(Role::Mentor),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(as_mentor.len(), 4);
        assert!(as_mentor.iter().any(|s| s.id == past.id));

        let none_as_mentee = MentoringSessionService::list(
            &db,
            "mentor",
            SessionFilter {
                role: Some(Role::Mentee),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(none_as_mentee.is_empty());

        let for_relation = MentoringSessionService::list_for_mentorship(&db, "mentee", relation.id)
            .await
            .unwrap();
        assert_eq!(for_relation.first().map(|s| s.id), Some(past.id));

        let outsider =
            MentoringSessionService::list_for_mentorship(&db, "stranger", relation.id).await;
        assert!(matches!(outsider, Err(ServiceError::NotFound("Mentorship"))));
    }
}
