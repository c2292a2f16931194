use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A user who offers mentorship, keyed by their identity-provider subject
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "mentor_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: String,
    pub headline: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    pub expertise: Json, // e.g. ["rust", "career switching"]
    pub years_of_experience: i32,
    pub is_available: bool,
    #[sea_orm(column_type = "Double", nullable)]
    pub average_rating: Option<f64>,
    pub review_count: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
