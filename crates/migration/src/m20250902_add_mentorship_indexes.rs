use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // At most one relation per (mentor, mentee) pair
        manager
            .create_index(
                Index::create()
                    .name("idx_mentorship_relations_mentor_mentee")
                    .table(MentorshipRelations::Table)
                    .col(MentorshipRelations::MentorId)
                    .col(MentorshipRelations::MenteeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_mentorship_relations_mentee_id")
                    .table(MentorshipRelations::Table)
                    .col(MentorshipRelations::MenteeId)
                    .to_owned(),
            )
            .await?;

        // Index on mentoring_sessions for per-party listings
        manager
            .create_index(
                Index::create()
                    .name("idx_mentoring_sessions_mentor_id_scheduled_at")
                    .table(MentoringSessions::Table)
                    .col(MentoringSessions::MentorId)
                    .col(MentoringSessions::ScheduledAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_mentoring_sessions_mentee_id_scheduled_at")
                    .table(MentoringSessions::Table)
                    .col(MentoringSessions::MenteeId)
                    .col(MentoringSessions::ScheduledAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_mentoring_sessions_mentorship_id")
                    .table(MentoringSessions::Table)
                    .col(MentoringSessions::MentorshipId)
                    .to_owned(),
            )
            .await?;

        // One review per (mentor, reviewer) pair
        manager
            .create_index(
                Index::create()
                    .name("idx_mentor_reviews_mentor_reviewer")
                    .table(MentorReviews::Table)
                    .col(MentorReviews::MentorId)
                    .col(MentorReviews::ReviewerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let indexes = [
            "idx_mentor_reviews_mentor_reviewer",
            "idx_mentoring_sessions_mentorship_id",
            "idx_mentoring_sessions_mentee_id_scheduled_at",
            "idx_mentoring_sessions_mentor_id_scheduled_at",
            "idx_mentorship_relations_mentee_id",
            "idx_mentorship_relations_mentor_mentee",
        ];

        for name in indexes {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }

        Ok(())
    }
}

#[derive(Iden)]
enum MentorshipRelations {
    Table,
    MentorId,
    MenteeId,
}

#[derive(Iden)]
enum MentoringSessions {
    Table,
    MentorId,
    MenteeId,
    MentorshipId,
    ScheduledAt,
}

#[derive(Iden)]
enum MentorReviews {
    Table,
    MentorId,
    ReviewerId,
}
