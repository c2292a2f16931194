use super::{
    error::{ServiceError, ServiceResult},
    mentor_profile::MentorProfileService,
};
use crate::entities::{mentor_profile, mentor_review, mentorship_relation};
use chrono::Utc;
use log::{debug, info};
use models::rating::{RatingSummary, check_optional_rating, check_rating};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, ModelTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct NewReview {
    pub mentor_id: String,
    pub mentorship_id: Option<Uuid>,
    pub rating: i32,
    pub communication_rating: Option<i32>,
    pub knowledge_rating: Option<i32>,
    pub helpfulness_rating: Option<i32>,
    pub comment: Option<String>,
}

pub struct MentorReviewService;

impl MentorReviewService {
    /// Stores a review and rewrites the mentor's rating aggregate
    pub async fn create(
        db: &DatabaseConnection,
        reviewer_id: &str,
        review: NewReview,
    ) -> ServiceResult<(mentor_review::Model, RatingSummary)> {
        let rating = check_rating(review.rating)?;
        let communication_rating = check_optional_rating(review.communication_rating)?;
        let knowledge_rating = check_optional_rating(review.knowledge_rating)?;
        let helpfulness_rating = check_optional_rating(review.helpfulness_rating)?;

        if review.mentor_id == reviewer_id {
            return Err(ServiceError::validation("You cannot review yourself"));
        }

        let txn = db.begin().await?;
        MentorProfileService::require(&txn, &review.mentor_id).await?;

        if Self::find_pair(&txn, &review.mentor_id, reviewer_id)
            .await?
            .is_some()
        {
            return Err(ServiceError::Duplicate("Review"));
        }

        if let Some(mentorship_id) = review.mentorship_id {
            let relation = mentorship_relation::Entity::find_by_id(mentorship_id)
                .one(&txn)
                .await?
                .ok_or(ServiceError::NotFound("Mentorship"))?;
            if relation.mentor_id != review.mentor_id || relation.mentee_id != reviewer_id {
                return Err(ServiceError::validation(
                    "The mentorship does not belong to this mentor and reviewer",
                ));
            }
        }

        let now = Utc::now();
        let created = mentor_review::ActiveModel {
            id: Set(Uuid::new_v4()),
            mentor_id: Set(review.mentor_id),
            reviewer_id: Set(reviewer_id.to_string()),
            mentorship_id: Set(review.mentorship_id),
            rating: Set(rating),
            communication_rating: Set(communication_rating),
            knowledge_rating: Set(knowledge_rating),
            helpfulness_rating: Set(helpfulness_rating),
            comment: Set(review.comment),
            is_approved: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(|e| ServiceError::from_insert(e, "Review"))?;

        let summary = Self::recompute_rating(&txn, &created.mentor_id).await?;
        txn.commit().await?;

        info!(
            "Review {} by {} for mentor {}",
            created.id, created.reviewer_id, created.mentor_id
        );
        Ok((created, summary))
    }

    /// Only the author may delete a review. Anyone else gets `NotFound`
    pub async fn delete(
        db: &DatabaseConnection,
        reviewer_id: &str,
        id: Uuid,
    ) -> ServiceResult<RatingSummary> {
        let txn = db.begin().await?;

        let review = mentor_review::Entity::find_by_id(id)
            .filter(mentor_review::Column::ReviewerId.eq(reviewer_id))
            .one(&txn)
            .await?
            .ok_or(ServiceError::NotFound("Review"))?;
        let mentor_id = review.mentor_id.clone();

        review.delete(&txn).await?;
        let summary = Self::recompute_rating(&txn, &mentor_id).await?;
        txn.commit().await?;

        info!("Review {id} deleted by {reviewer_id}");
        Ok(summary)
    }

    /// Approved reviews for a mentor, newest first
    pub async fn list_for_mentor(
        db: &DatabaseConnection,
        mentor_id: &str,
    ) -> ServiceResult<Vec<mentor_review::Model>> {
        Ok(mentor_review::Entity::find()
            .filter(mentor_review::Column::MentorId.eq(mentor_id))
            .filter(mentor_review::Column::IsApproved.eq(true))
            .order_by_desc(mentor_review::Column::CreatedAt)
            .all(db)
            .await?)
    }

    /// Re-reads every approved review and overwrites the profile aggregate.
    /// With no reviews left the average is cleared, not zeroed
    pub async fn recompute_rating<C: ConnectionTrait>(
        conn: &C,
        mentor_id: &str,
    ) -> ServiceResult<RatingSummary> {
        let ratings: Vec<i32> = mentor_review::Entity::find()
            .filter(mentor_review::Column::MentorId.eq(mentor_id))
            .filter(mentor_review::Column::IsApproved.eq(true))
            .all(conn)
            .await?
            .into_iter()
            .map(|review| review.rating)
            .collect();

        let summary = RatingSummary::from_ratings(&ratings);

        if let Some(profile) = MentorProfileService::find_by_user(conn, mentor_id).await? {
            let mut active: mentor_profile::ActiveModel = profile.into();
            active.average_rating = Set(summary.average);
            active.review_count = Set(summary.count);
            active.updated_at = Set(Utc::now());
            active.update(conn).await?;
        }

        debug!(
            "Mentor {mentor_id} rating recomputed: {:?} over {} reviews",
            summary.average, summary.count
        );
        Ok(summary)
    }

    async fn find_pair<C: ConnectionTrait>(
        conn: &C,
        mentor_id: &str,
        reviewer_id: &str,
    ) -> ServiceResult<Option<mentor_review::Model>> {
        Ok(mentor_review::Entity::find()
            .filter(mentor_review::Column::MentorId.eq(mentor_id))
            .filter(mentor_review::Column::ReviewerId.eq(reviewer_id))
            .one(conn)
            .await?)
    }
}
