use chrono::{DateTime, Utc};
use database::{entities::mentor_profile, services::mentor_profile::ProfileInput};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct MentorProfileRequest {
    pub headline: String,
    pub bio: Option<String>,
    #[serde(default)]
    pub expertise: Vec<String>,
    #[serde(default)]
    pub years_of_experience: i32,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}

impl From<MentorProfileRequest> for ProfileInput {
    fn from(request: MentorProfileRequest) -> Self {
        Self {
            headline: request.headline,
            bio: request.bio,
            expertise: request.expertise,
            years_of_experience: request.years_of_experience,
            is_available: request.is_available,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MentorProfileResponse {
    pub id: Uuid,
    pub user_id: String,
    pub headline: String,
    pub bio: Option<String>,
    pub expertise: Vec<String>,
    pub years_of_experience: i32,
    pub is_available: bool,
    /// Absent until the mentor has at least one review
    pub average_rating: Option<f64>,
    pub review_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<mentor_profile::Model> for MentorProfileResponse {
    fn from(profile: mentor_profile::Model) -> Self {
        let expertise: Vec<String> = profile
            .expertise
            .as_array()
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str())
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            id: profile.id,
            user_id: profile.user_id,
            headline: profile.headline,
            bio: profile.bio,
            expertise,
            years_of_experience: profile.years_of_experience,
            is_available: profile.is_available,
            average_rating: profile.average_rating,
            review_count: profile.review_count,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}
