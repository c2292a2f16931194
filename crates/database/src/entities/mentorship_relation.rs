use models::mentorship::MentorshipStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "mentorship_relations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub mentor_id: String,
    pub mentee_id: String,
    pub status: MentorshipStatus,
    #[sea_orm(column_type = "Text", nullable)]
    pub request_message: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub response_message: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub goals: Option<String>,
    pub progress: i32, // 0-100
    pub sessions_completed: i32,
    #[sea_orm(column_type = "Double")]
    pub total_hours: f64,
    pub mentee_rating: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub mentee_feedback: Option<String>,
    pub requested_at: DateTimeUtc,
    pub responded_at: Option<DateTimeUtc>,
    pub started_at: Option<DateTimeUtc>,
    pub ended_at: Option<DateTimeUtc>,
    pub last_activity_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::mentoring_session::Entity")]
    MentoringSessions,
    #[sea_orm(has_many = "super::mentor_review::Entity")]
    MentorReviews,
}

impl Related<super::mentoring_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MentoringSessions.def()
    }
}

impl Related<super::mentor_review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MentorReviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_party(&self, user_id: &str) -> bool {
        self.mentor_id == user_id || self.mentee_id == user_id
    }
}
