use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create mentor_profiles table
        manager
            .create_table(
                Table::create()
                    .table(MentorProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MentorProfiles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MentorProfiles::UserId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(MentorProfiles::Headline).string().not_null())
                    .col(ColumnDef::new(MentorProfiles::Bio).text())
                    .col(ColumnDef::new(MentorProfiles::Expertise).json().not_null())
                    .col(
                        ColumnDef::new(MentorProfiles::YearsOfExperience)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(MentorProfiles::IsAvailable)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    // Rating aggregate, rewritten whenever reviews change
                    .col(ColumnDef::new(MentorProfiles::AverageRating).double())
                    .col(
                        ColumnDef::new(MentorProfiles::ReviewCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(MentorProfiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MentorProfiles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create mentorship_relations table
        manager
            .create_table(
                Table::create()
                    .table(MentorshipRelations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MentorshipRelations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MentorshipRelations::MentorId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MentorshipRelations::MenteeId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MentorshipRelations::Status)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MentorshipRelations::RequestMessage).text())
                    .col(ColumnDef::new(MentorshipRelations::ResponseMessage).text())
                    .col(ColumnDef::new(MentorshipRelations::Goals).text())
                    .col(
                        ColumnDef::new(MentorshipRelations::Progress)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(MentorshipRelations::SessionsCompleted)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(MentorshipRelations::TotalHours)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(MentorshipRelations::MenteeRating).integer())
                    .col(ColumnDef::new(MentorshipRelations::MenteeFeedback).text())
                    .col(
                        ColumnDef::new(MentorshipRelations::RequestedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MentorshipRelations::RespondedAt).timestamp_with_time_zone(),
                    )
                    .col(ColumnDef::new(MentorshipRelations::StartedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(MentorshipRelations::EndedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(MentorshipRelations::LastActivityAt)
                            .timestamp_with_time_zone(),
                    )
                    .col(
                        ColumnDef::new(MentorshipRelations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MentorshipRelations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create mentoring_sessions table
        manager
            .create_table(
                Table::create()
                    .table(MentoringSessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MentoringSessions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MentoringSessions::MentorshipId).uuid())
                    .col(ColumnDef::new(MentoringSessions::MentorId).string().not_null())
                    .col(ColumnDef::new(MentoringSessions::MenteeId).string().not_null())
                    .col(ColumnDef::new(MentoringSessions::Title).string().not_null())
                    .col(ColumnDef::new(MentoringSessions::Description).text())
                    .col(
                        ColumnDef::new(MentoringSessions::ScheduledAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MentoringSessions::DurationMinutes)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MentoringSessions::ActualDurationMinutes).integer())
                    .col(
                        ColumnDef::new(MentoringSessions::SessionType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MentoringSessions::MeetingLink).string())
                    .col(ColumnDef::new(MentoringSessions::Location).string())
                    .col(ColumnDef::new(MentoringSessions::Status).string().not_null())
                    .col(ColumnDef::new(MentoringSessions::MentorNotes).text())
                    .col(ColumnDef::new(MentoringSessions::MenteeNotes).text())
                    .col(ColumnDef::new(MentoringSessions::MentorRating).integer())
                    .col(ColumnDef::new(MentoringSessions::MenteeRating).integer())
                    .col(ColumnDef::new(MentoringSessions::CancellationReason).text())
                    .col(ColumnDef::new(MentoringSessions::CompletedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(MentoringSessions::CancelledAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(MentoringSessions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MentoringSessions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-mentoring_sessions-mentorship_id")
                            .from(MentoringSessions::Table, MentoringSessions::MentorshipId)
                            .to(MentorshipRelations::Table, MentorshipRelations::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create mentor_reviews table
        manager
            .create_table(
                Table::create()
                    .table(MentorReviews::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MentorReviews::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MentorReviews::MentorId).string().not_null())
                    .col(ColumnDef::new(MentorReviews::ReviewerId).string().not_null())
                    .col(ColumnDef::new(MentorReviews::MentorshipId).uuid())
                    .col(ColumnDef::new(MentorReviews::Rating).integer().not_null())
                    .col(ColumnDef::new(MentorReviews::CommunicationRating).integer())
                    .col(ColumnDef::new(MentorReviews::KnowledgeRating).integer())
                    .col(ColumnDef::new(MentorReviews::HelpfulnessRating).integer())
                    .col(ColumnDef::new(MentorReviews::Comment).text())
                    .col(
                        ColumnDef::new(MentorReviews::IsApproved)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(MentorReviews::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MentorReviews::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-mentor_reviews-mentorship_id")
                            .from(MentorReviews::Table, MentorReviews::MentorshipId)
                            .to(MentorshipRelations::Table, MentorshipRelations::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order due to foreign key constraints
        manager
            .drop_table(Table::drop().table(MentorReviews::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(MentoringSessions::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(MentorshipRelations::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(MentorProfiles::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum MentorProfiles {
    Table,
    Id,
    UserId,
    Headline,
    Bio,
    Expertise,
    YearsOfExperience,
    IsAvailable,
    AverageRating,
    ReviewCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum MentorshipRelations {
    Table,
    Id,
    MentorId,
    MenteeId,
    Status,
    RequestMessage,
    ResponseMessage,
    Goals,
    Progress,
    SessionsCompleted,
    TotalHours,
    MenteeRating,
    MenteeFeedback,
    RequestedAt,
    RespondedAt,
    StartedAt,
    EndedAt,
    LastActivityAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum MentoringSessions {
    Table,
    Id,
    MentorshipId,
    MentorId,
    MenteeId,
    Title,
    Description,
    ScheduledAt,
    DurationMinutes,
    ActualDurationMinutes,
    SessionType,
    MeetingLink,
    Location,
    Status,
    MentorNotes,
    MenteeNotes,
    MentorRating,
    MenteeRating,
    CancellationReason,
    CompletedAt,
    CancelledAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum MentorReviews {
    Table,
    Id,
    MentorId,
    ReviewerId,
    MentorshipId,
    Rating,
    CommunicationRating,
    KnowledgeRating,
    HelpfulnessRating,
    Comment,
    IsApproved,
    CreatedAt,
    UpdatedAt,
}
