use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One review per (mentor, reviewer) pair
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "mentor_reviews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub mentor_id: String,
    pub reviewer_id: String,
    pub mentorship_id: Option<Uuid>,
    pub rating: i32, // 1-5
    pub communication_rating: Option<i32>,
    pub knowledge_rating: Option<i32>,
    pub helpfulness_rating: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
    pub is_approved: bool,
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
