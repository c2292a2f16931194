use crate::entities::mentor_profile;
use super::error::{ServiceError, ServiceResult};
use chrono::Utc;
use log::info;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter,
};
use uuid::Uuid;

/// Editable part of a mentor profile. Rating aggregates are not included
#[derive(Debug, Clone)]
pub struct ProfileInput {
    pub headline: String,
    pub bio: Option<String>,
    pub expertise: Vec<String>,
    pub years_of_experience: i32,
    pub is_available: bool,
}

pub struct MentorProfileService;

impl MentorProfileService {
    /// Creates the caller's profile, or updates it in place
    pub async fn upsert(
        db: &DatabaseConnection,
        user_id: &str,
        input: ProfileInput,
    ) -> ServiceResult<mentor_profile::Model> {
        if input.headline.trim().is_empty() {
            return Err(ServiceError::validation("Headline must not be empty"));
        }
        if input.years_of_experience < 0 {
            return Err(ServiceError::validation(
                "Years of experience must not be negative",
            ));
        }

        let now = Utc::now();
        let expertise = serde_json::json!(input.expertise);

        match Self::find_by_user(db, user_id).await? {
            Some(existing) => {
                let mut profile: mentor_profile::ActiveModel = existing.into();
                profile.headline = Set(input.headline);
                profile.bio = Set(input.bio);
                profile.expertise = Set(expertise);
                profile.years_of_experience = Set(input.years_of_experience);
                profile.is_available = Set(input.is_available);
                profile.updated_at = Set(now);

                Ok(profile.update(db).await?)
            }
            None => {
                let profile = mentor_profile::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    user_id: Set(user_id.to_string()),
                    headline: Set(input.headline),
                    bio: Set(input.bio),
                    expertise: Set(expertise),
                    years_of_experience: Set(input.years_of_experience),
                    is_available: Set(input.is_available),
                    average_rating: Set(None),
                    review_count: Set(0),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(db)
                .await
                .map_err(|e| ServiceError::from_insert(e, "Mentor profile"))?;

                info!("Created mentor profile for {user_id}");
                Ok(profile)
            }
        }
    }

    pub async fn find_by_user<C: ConnectionTrait>(
        conn: &C,
        user_id: &str,
    ) -> ServiceResult<Option<mentor_profile::Model>> {
        Ok(mentor_profile::Entity::find()
            .filter(mentor_profile::Column::UserId.eq(user_id))
            .one(conn)
            .await?)
    }

    /// Like [`Self::find_by_user`] but a missing profile is an error
    pub async fn require<C: ConnectionTrait>(
        conn: &C,
        user_id: &str,
    ) -> ServiceResult<mentor_profile::Model> {
        Self::find_by_user(conn, user_id)
            .await?
            .ok_or(ServiceError::NotFound("Mentor profile"))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_util::{profile_input, setup_db};

    #[tokio::test]
    async fn test_upsert_creates_then_updates() {
        let db = setup_db().await;

        let created = MentorProfileService::upsert(&db, "mentor-1", profile_input())
            .await
            .unwrap();
        assert_eq!(created.user_id, "mentor-1");
        assert_eq!(created.average_rating, None);
        assert_eq!(created.review_count, 0);

        let mut input = profile_input();
        input.headline = "Staff engineer".to_string();
        input.expertise = vec!["rust".to_string(), "databases".to_string()];

        let updated = MentorProfileService::upsert(&db, "mentor-1", input)
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.headline, "Staff engineer");
        assert_eq!(updated.expertise, serde_json::json!(["rust", "databases"]));
    }

    #[tokio::test]
    async fn test_upsert_rejects_blank_headline() {
        let db = setup_db().await;

        let mut input = profile_input();
        input.headline = "   ".to_string();

        let result = MentorProfileService::upsert(&db, "mentor-1", input).await;
        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn test_require_missing_profile() {
        let db = setup_db().await;

        let result = MentorProfileService::require(&db, "nobody").await;
        assert!(matches!(
            result,
            Err(ServiceError::NotFound("Mentor profile"))
        ));
    }
}
