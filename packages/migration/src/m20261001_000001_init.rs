use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Events {
    Table,
    Id,
    Name,
    Status,
    Options,
    Winner,
    Score,
    StartsAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Picks {
    Table,
    Id,
    UserId,
    CompetitionId,
    EventId,
    SelectedTeam,
    IsCorrect,
    Points,
    CreatedAt,
}

#[derive(Iden)]
enum CompetitionUsers {
    Table,
    UserId,
    CompetitionId,
    Score,
    JoinedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // events
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Events::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Events::Name).string().not_null())
                    .col(
                        ColumnDef::new(Events::Status)
                            .string_len(16)
                            .not_null()
                            .default("upcoming"),
                    )
                    // JSON array of allowed winner labels; "[]" means unrestricted
                    .col(
                        ColumnDef::new(Events::Options)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(ColumnDef::new(Events::Winner).string().null())
                    .col(ColumnDef::new(Events::Score).string().null())
                    .col(
                        ColumnDef::new(Events::StartsAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Events::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_events_starts_at")
                    .table(Events::Table)
                    .col(Events::StartsAt)
                    .to_owned(),
            )
            .await?;

        // picks
        manager
            .create_table(
                Table::create()
                    .table(Picks::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Picks::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Picks::UserId).string().not_null())
                    .col(ColumnDef::new(Picks::CompetitionId).string().not_null())
                    .col(ColumnDef::new(Picks::EventId).string().not_null())
                    .col(ColumnDef::new(Picks::SelectedTeam).string().not_null())
                    .col(ColumnDef::new(Picks::IsCorrect).boolean().null())
                    .col(
                        ColumnDef::new(Picks::Points)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Picks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_picks_event")
                            .from(Picks::Table, Picks::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // one pick per (user, competition, event)
        manager
            .create_index(
                Index::create()
                    .name("ux_picks_user_competition_event")
                    .table(Picks::Table)
                    .col(Picks::UserId)
                    .col(Picks::CompetitionId)
                    .col(Picks::EventId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_picks_event_id")
                    .table(Picks::Table)
                    .col(Picks::EventId)
                    .to_owned(),
            )
            .await?;

        // competition_users
        manager
            .create_table(
                Table::create()
                    .table(CompetitionUsers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CompetitionUsers::UserId).string().not_null())
                    .col(
                        ColumnDef::new(CompetitionUsers::CompetitionId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CompetitionUsers::Score)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CompetitionUsers::JoinedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(CompetitionUsers::UserId)
                            .col(CompetitionUsers::CompetitionId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_competition_users_competition_score")
                    .table(CompetitionUsers::Table)
                    .col(CompetitionUsers::CompetitionId)
                    .col(CompetitionUsers::Score)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order
        manager
            .drop_table(Table::drop().table(CompetitionUsers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Picks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await?;
        Ok(())
    }
}
