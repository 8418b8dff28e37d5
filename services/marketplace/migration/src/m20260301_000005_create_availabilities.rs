use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Availabilities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Availabilities::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Availabilities::ArtistProfileId).uuid().not_null())
                    .col(ColumnDef::new(Availabilities::AvailableDate).date().not_null())
                    .col(ColumnDef::new(Availabilities::StartTime).time().not_null())
                    .col(ColumnDef::new(Availabilities::EndTime).time().not_null())
                    .col(
                        ColumnDef::new(Availabilities::IsBooked)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Availabilities::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Availabilities::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Availabilities::Table, Availabilities::ArtistProfileId)
                            .to(ArtistProfiles::Table, ArtistProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Availabilities::Table)
                    .col(Availabilities::ArtistProfileId)
                    .col(Availabilities::AvailableDate)
                    .name("idx_availabilities_artist_profile_id_available_date")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Availabilities::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Availabilities {
    Table,
    Id,
    ArtistProfileId,
    AvailableDate,
    StartTime,
    EndTime,
    IsBooked,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ArtistProfiles {
    Table,
    Id,
}
