use models::session::{SessionStatus, SessionType};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "mentoring_sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub mentorship_id: Option<Uuid>,
    pub mentor_id: String,
    pub mentee_id: String,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub scheduled_at: DateTimeUtc,
    pub duration_minutes: i32,
    pub actual_duration_minutes: Option<i32>,
    pub session_type: SessionType,
    pub meeting_link: Option<String>,
    pub location: Option<String>,
    pub status: SessionStatus,
    #[sea_orm(column_type = "Text", nullable)]
    pub mentor_notes: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub mentee_notes: Option<String>,
    pub mentor_rating: Option<i32>,
    pub mentee_rating: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub cancellation_reason: Option<String>,
    pub completed_at: Option<DateTimeUtc>,
    pub cancelled_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::mentorship_relation::Entity",
        from = "Column::MentorshipId",
        to = "super::mentorship_relation::Column::Id",
        on_delete = "SetNull"
    )]
    MentorshipRelation,
}

impl Related<super::mentorship_relation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MentorshipRelation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_party(&self, user_id: &str) -> bool {
        self.mentor_id == user_id || self.mentee_id == user_id
    }
}
