pub use sea_orm_migration::prelude::*;

mod m20250901_create_mentorship_tables;
mod m20250902_add_mentorship_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_create_mentorship_tables::Migration),
            Box::new(m20250902_add_mentorship_indexes::Migration),
        ]
    }
}
