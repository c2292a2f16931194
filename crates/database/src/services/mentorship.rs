use super::{
    error::{ServiceError, ServiceResult},
    mentor_profile::MentorProfileService,
};
use crate::entities::mentorship_relation;
use chrono::Utc;
use log::info;
use models::{
    mentorship::{MentorshipStatus, Role, check_progress},
    rating::check_rating,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

/// A mentee asking a mentor to take them on
#[derive(Debug, Clone)]
pub struct MentorshipRequest {
    pub mentor_id: String,
    pub message: Option<String>,
    pub goals: Option<String>,
}

pub struct MentorshipService;

impl MentorshipService {
    pub async fn request(
        db: &DatabaseConnection,
        mentee_id: &str,
        request: MentorshipRequest,
    ) -> ServiceResult<mentorship_relation::Model> {
        if request.mentor_id == mentee_id {
            return Err(ServiceError::validation(
                "You cannot request mentorship from yourself",
            ));
        }

        MentorProfileService::require(db, &request.mentor_id).await?;

        // The unique index is the backstop, this check gives the common case a clean error
        if Self::find_pair(db, &request.mentor_id, mentee_id)
            .await?
            .is_some()
        {
            return Err(ServiceError::Duplicate("Mentorship request"));
        }

        let relation = Self::insert_pending(db, mentee_id, request).await?;

        info!(
            "Mentorship {} requested by {} from {}",
            relation.id, relation.mentee_id, relation.mentor_id
        );
        Ok(relation)
    }

    /// The mentor accepts or declines a pending request
    pub async fn respond(
        db: &DatabaseConnection,
        mentor_id: &str,
        id: Uuid,
        accept: bool,
        message: Option<String>,
    ) -> ServiceResult<mentorship_relation::Model> {
        let relation = Self::find_as(db, id, mentor_id, Some(Role::Mentor)).await?;
        let status = relation.status.respond(accept)?;

        let now = Utc::now();
        let mut active: mentorship_relation::ActiveModel = relation.into();
        active.status = Set(status);
        active.response_message = Set(message);
        active.responded_at = Set(Some(now));
        match status {
            MentorshipStatus::Active => active.started_at = Set(Some(now)),
            _ => active.ended_at = Set(Some(now)),
        }
        active.last_activity_at = Set(Some(now));
        active.updated_at = Set(now);

        let relation = active.update(db).await?;
        info!("Mentorship {} is now {}", relation.id, relation.status);
        Ok(relation)
    }

    pub async fn update_progress(
        db: &DatabaseConnection,
        mentor_id: &str,
        id: Uuid,
        progress: i32,
    ) -> ServiceResult<mentorship_relation::Model> {
        let progress = check_progress(progress)?;
        let relation = Self::find_as(db, id, mentor_id, Some(Role::Mentor)).await?;
        relation.status.ensure_active("update progress on")?;

        let now = Utc::now();
        let mut active: mentorship_relation::ActiveModel = relation.into();
        active.progress = Set(progress);
        active.last_activity_at = Set(Some(now));
        active.updated_at = Set(now);

        Ok(active.update(db).await?)
    }

    pub async fn complete(
        db: &DatabaseConnection,
        mentor_id: &str,
        id: Uuid,
    ) -> ServiceResult<mentorship_relation::Model> {
        let relation = Self::find_as(db, id, mentor_id, Some(Role::Mentor)).await?;
        let status = relation.status.complete()?;

        let now = Utc::now();
        let mut active: mentorship_relation::ActiveModel = relation.into();
        active.status = Set(status);
        active.progress = Set(100);
        active.ended_at = Set(Some(now));
        active.last_activity_at = Set(Some(now));
        active.updated_at = Set(now);

        let relation = active.update(db).await?;
        info!("Mentorship {} completed", relation.id);
        Ok(relation)
    }

    /// Either party may cancel while the mentorship is pending or running
    pub async fn cancel(
        db: &DatabaseConnection,
        user_id: &str,
        id: Uuid,
    ) -> ServiceResult<mentorship_relation::Model> {
        let relation = Self::find_as(db, id, user_id, None).await?;
        let status = relation.status.cancel()?;

        let now = Utc::now();
        let mut active: mentorship_relation::ActiveModel = relation.into();
        active.status = Set(status);
        active.ended_at = Set(Some(now));
        active.last_activity_at = Set(Some(now));
        active.updated_at = Set(now);

        let relation = active.update(db).await?;
        info!("Mentorship {} cancelled by {user_id}", relation.id);
        Ok(relation)
    }

    /// The mentee rates a finished mentorship, once
    pub async fn leave_feedback(
        db: &DatabaseConnection,
        mentee_id: &str,
        id: Uuid,
        rating: i32,
        feedback: Option<String>,
    ) -> ServiceResult<mentorship_relation::Model> {
        let rating = check_rating(rating)?;
        let relation = Self::find_as(db, id, mentee_id, Some(Role::Mentee)).await?;
        relation.status.ensure_completed("leave feedback on")?;
        if relation.mentee_rating.is_some() {
            return Err(ServiceError::Duplicate("Mentorship feedback"));
        }

        let now = Utc::now();
        let mut active: mentorship_relation::ActiveModel = relation.into();
        active.mentee_rating = Set(Some(rating));
        active.mentee_feedback = Set(feedback);
        active.last_activity_at = Set(Some(now));
        active.updated_at = Set(now);

        Ok(active.update(db).await?)
    }

    /// A relation visible to either party
    pub async fn get(
        db: &DatabaseConnection,
        user_id: &str,
        id: Uuid,
    ) -> ServiceResult<mentorship_relation::Model> {
        Self::find_as(db, id, user_id, None).await
    }

    /// The caller's relations on one side, newest first
    pub async fn list(
        db: &DatabaseConnection,
        user_id: &str,
        role: Role,
        status: Option<MentorshipStatus>,
    ) -> ServiceResult<Vec<mentorship_relation::Model>> {
        let mut condition = Condition::all();
        condition = match role {
            Role::Mentor => condition.add(mentorship_relation::Column::MentorId.eq(user_id)),
            Role::Mentee => condition.add(mentorship_relation::Column::MenteeId.eq(user_id)),
        };
        if let Some(status) = status {
            condition = condition.add(mentorship_relation::Column::Status.eq(status));
        }

        Ok(mentorship_relation::Entity::find()
            .filter(condition)
            .order_by_desc(mentorship_relation::Column::RequestedAt)
            .all(db)
            .await?)
    }

    /// Inserts a fresh Pending relation. A pair that already exists surfaces
    /// as `Duplicate` through the unique index
    async fn insert_pending<C: ConnectionTrait>(
        conn: &C,
        mentee_id: &str,
        request: MentorshipRequest,
    ) -> ServiceResult<mentorship_relation::Model> {
        let now = Utc::now();
        mentorship_relation::ActiveModel {
            id: Set(Uuid::new_v4()),
            mentor_id: Set(request.mentor_id),
            mentee_id: Set(mentee_id.to_string()),
            status: Set(MentorshipStatus::Pending),
            request_message: Set(request.message),
            response_message: Set(None),
            goals: Set(request.goals),
            progress: Set(0),
            sessions_completed: Set(0),
            total_hours: Set(0.0),
            mentee_rating: Set(None),
            mentee_feedback: Set(None),
            requested_at: Set(now),
            responded_at: Set(None),
            started_at: Set(None),
            ended_at: Set(None),
            last_activity_at: Set(Some(now)),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(conn)
        .await
        .map_err(|e| ServiceError::from_insert(e, "Mentorship request"))
    }

    pub async fn find_pair<C: ConnectionTrait>(
        conn: &C,
        mentor_id: &str,
        mentee_id: &str,
    ) -> ServiceResult<Option<mentorship_relation::Model>> {
        Ok(mentorship_relation::Entity::find()
            .filter(mentorship_relation::Column::MentorId.eq(mentor_id))
            .filter(mentorship_relation::Column::MenteeId.eq(mentee_id))
            .one(conn)
            .await?)
    }

    /// Loads a relation the caller takes part in, optionally on a given side.
    /// Outsiders get `NotFound` so they cannot probe for ids
    pub(crate) async fn find_as<C: ConnectionTrait>(
        conn: &C,
        id: Uuid,
        user_id: &str,
        role: Option<Role>,
    ) -> ServiceResult<mentorship_relation::Model> {
        let relation = mentorship_relation::Entity::find_by_id(id)
            .one(conn)
            .await?
            .ok_or(ServiceError::NotFound("Mentorship"))?;

        let caller = Role::of(user_id, &relation.mentor_id, &relation.mentee_id);
        match (caller, role) {
            (None, _) => Err(ServiceError::NotFound("Mentorship")),
            (Some(caller), Some(required)) if caller != required => {
                Err(ServiceError::NotFound("Mentorship"))
            }
            _ => Ok(relation),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_util::{seed_mentor, setup_db};

    fn request_for(mentor_id: &str) -> MentorshipRequest {
        MentorshipRequest {
            mentor_id: mentor_id.to_string(),
            message: Some("Could you help me prepare for interviews?".to_string()),
            goals: Some("Land a backend role".to_string()),
        }
    }

    async fn active_relation(db: &DatabaseConnection) -> mentorship_relation::Model {
        seed_mentor(db, "mentor").await;
        let relation = MentorshipService::request(db, "mentee", request_for("mentor"))
            .await
            .unwrap();
        MentorshipService::respond(db, "mentor", relation.id, true, None)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_unique_pair_index_maps_to_duplicate() {
        let db = setup_db().await;
        seed_mentor(&db, "mentor").await;
        MentorshipService::request(&db, "mentee", request_for("mentor"))
            .await
            .unwrap();

        // Skip the up-front pair lookup, as a concurrent request would
        let err = MentorshipService::insert_pending(&db, "mentee", request_for("mentor"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Duplicate("Mentorship request")));

        let relations = MentorshipService::list(&db, "mentee", Role::Mentee, None)
            .await
            .unwrap();
        assert_eq!(relations.len(), 1);
    }

    #[tokio::test]
    async fn test_request_starts_pending() {
        let db = setup_db().await;
        seed_mentor(&db, "mentor").await;

        let relation = MentorshipService::request(&db, "mentee", request_for("mentor"))
            .await
            .unwrap();

        assert_eq!(relation.status, MentorshipStatus::Pending);
        assert_eq!(relation.progress, 0);
        assert_eq!(relation.sessions_completed, 0);
        assert!(relation.responded_at.is_none());
    }

    #[tokio::test]
    async fn test_request_requires_mentor_profile() {
        let db = setup_db().await;

        let result = MentorshipService::request(&db, "mentee", request_for("ghost")).await;
        assert!(matches!(
            result,
            Err(ServiceError::NotFound("Mentor profile"))
        ));
    }

    #[tokio::test]
    async fn test_request_rejects_self() {
        let db = setup_db().await;
        seed_mentor(&db, "mentor").await;

        let result = MentorshipService::request(&db, "mentor", request_for("mentor")).await;
        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn test_one_relation_per_pair() {
        let db = setup_db().await;
        seed_mentor(&db, "mentor").await;

        let first = MentorshipService::request(&db, "mentee", request_for("mentor"))
            .await
            .unwrap();
        MentorshipService::respond(&db, "mentor", first.id, false, None)
            .await
            .unwrap();

        // Even after a rejection the pair stays taken
        let second = MentorshipService::request(&db, "mentee", request_for("mentor")).await;
        assert!(matches!(
            second,
            Err(ServiceError::Duplicate("Mentorship request"))
        ));

        let all = MentorshipService::list(&db, "mentee", Role::Mentee, None)
            .await
            .unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_respond_accept_and_decline() {
        let db = setup_db().await;
        seed_mentor(&db, "mentor").await;

        let a = MentorshipService::request(&db, "mentee-a", request_for("mentor"))
            .await
            .unwrap();
        let b = MentorshipService::request(&db, "mentee-b", request_for("mentor"))
            .await
            .unwrap();

        let accepted = MentorshipService::respond(&db, "mentor", a.id, true, None)
            .await
            .unwrap();
        assert_eq!(accepted.status, MentorshipStatus::Active);
        assert!(accepted.started_at.is_some());
        assert!(accepted.responded_at.is_some());

        let declined =
            MentorshipService::respond(&db, "mentor", b.id, false, Some("Fully booked".into()))
                .await
                .unwrap();
        assert_eq!(declined.status, MentorshipStatus::Rejected);
        assert!(declined.started_at.is_none());
        assert!(declined.ended_at.is_some());
        assert_eq!(declined.response_message.as_deref(), Some("Fully booked"));

        // Only while pending
        let again = MentorshipService::respond(&db, "mentor", a.id, false, None).await;
        assert!(matches!(again, Err(ServiceError::Transition(_))));
    }

    #[tokio::test]
    async fn test_only_mentor_can_respond() {
        let db = setup_db().await;
        seed_mentor(&db, "mentor").await;
        let relation = MentorshipService::request(&db, "mentee", request_for("mentor"))
            .await
            .unwrap();

        let result = MentorshipService::respond(&db, "mentee", relation.id, true, None).await;
        assert!(matches!(result, Err(ServiceError::NotFound("Mentorship"))));

        let outsider = MentorshipService::get(&db, "stranger", relation.id).await;
        assert!(matches!(outsider, Err(ServiceError::NotFound("Mentorship"))));
    }

    #[tokio::test]
    async fn test_progress_requires_active_and_range() {
        let db = setup_db().await;
        seed_mentor(&db, "mentor").await;
        let pending = MentorshipService::request(&db, "mentee", request_for("mentor"))
            .await
            .unwrap();

        let result = MentorshipService::update_progress(&db, "mentor", pending.id, 50).await;
        assert!(matches!(result, Err(ServiceError::Transition(_))));

        let active = MentorshipService::respond(&db, "mentor", pending.id, true, None)
            .await
            .unwrap();
        let out_of_range =
            MentorshipService::update_progress(&db, "mentor", active.id, 150).await;
        assert!(matches!(out_of_range, Err(ServiceError::Value(_))));

        let updated = MentorshipService::update_progress(&db, "mentor", active.id, 40)
            .await
            .unwrap();
        assert_eq!(updated.progress, 40);
    }

    #[tokio::test]
    async fn test_complete_then_feedback() {
        let db = setup_db().await;
        let relation = active_relation(&db).await;

        let early = MentorshipService::leave_feedback(&db, "mentee", relation.id, 5, None).await;
        assert!(matches!(early, Err(ServiceError::Transition(_))));

        let completed = MentorshipService::complete(&db, "mentor", relation.id)
            .await
            .unwrap();
        assert_eq!(completed.status, MentorshipStatus::Completed);
        assert_eq!(completed.progress, 100);
        assert!(completed.ended_at.is_some());

        let rated = MentorshipService::leave_feedback(
            &db,
            "mentee",
            relation.id,
            5,
            Some("Great mentor".to_string()),
        )
        .await
        .unwrap();
        assert_eq!(rated.mentee_rating, Some(5));

        let twice = MentorshipService::leave_feedback(&db, "mentee", relation.id, 4, None).await;
        assert!(matches!(twice, Err(ServiceError::Duplicate(_))));

        // Completed is terminal
        let cancel = MentorshipService::cancel(&db, "mentee", relation.id).await;
        assert!(matches!(cancel, Err(ServiceError::Transition(_))));
    }

    #[tokio::test]
    async fn test_mentee_can_withdraw_pending_request() {
        let db = setup_db().await;
        seed_mentor(&db, "mentor").await;
        let relation = MentorshipService::request(&db, "mentee", request_for("mentor"))
            .await
            .unwrap();

        let cancelled = MentorshipService::cancel(&db, "mentee", relation.id)
            .await
            .unwrap();
        assert_eq!(cancelled.status, MentorshipStatus::Cancelled);

        let respond = MentorshipService::respond(&db, "mentor", relation.id, true, None).await;
        assert!(matches!(respond, Err(ServiceError::Transition(_))));
    }

    #[tokio::test]
    async fn test_list_filters_by_role_and_status() {
        let db = setup_db().await;
        seed_mentor(&db, "mentor").await;
        let a = MentorshipService::request(&db, "mentee-a", request_for("mentor"))
            .await
            .unwrap();
        MentorshipService::request(&db, "mentee-b", request_for("mentor"))
            .await
            .unwrap();
        MentorshipService::respond(&db, "mentor", a.id, true, None)
            .await
            .unwrap();

        let all = MentorshipService::list(&db, "mentor", Role::Mentor, None)
            .await
            .unwrap();
        assert_eq!(all.len(), 2);

        let pending =
            MentorshipService::list(&db, "mentor", Role::Mentor, Some(MentorshipStatus::Pending))
                .await
                .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].mentee_id, "mentee-b");

        let as_mentee = MentorshipService::list(&db, "mentor", Role::Mentee, None)
            .await
            .unwrap();
        assert!(as_mentee.is_empty());
    }
}
