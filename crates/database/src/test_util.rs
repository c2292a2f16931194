use crate::{
    entities::mentor_profile,
    services::mentor_profile::{MentorProfileService, ProfileInput},
};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Fresh in-memory database with every migration applied
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    // A second pooled connection would see a different, empty database
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("failed to run migrations");
    db
}

pub fn profile_input() -> ProfileInput {
    ProfileInput {
        headline: "Senior backend engineer".to_string(),
        bio: Some("Ten years of distributed systems".to_string()),
        expertise: vec!["rust".to_string()],
        years_of_experience: 10,
        is_available: true,
    }
}

pub async fn seed_mentor(db: &DatabaseConnection, user_id: &str) -> mentor_profile::Model {
    MentorProfileService::upsert(db, user_id, profile_input())
        .await
        .expect("failed to seed mentor profile")
}
