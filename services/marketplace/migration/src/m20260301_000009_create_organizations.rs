use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Organizations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Organizations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Organizations::Name).string().not_null())
                    .col(ColumnDef::new(Organizations::Description).text().null())
                    .col(ColumnDef::new(Organizations::Phone).string().null())
                    .col(ColumnDef::new(Organizations::Email).string().null())
                    .col(ColumnDef::new(Organizations::Address).string().null())
                    .col(ColumnDef::new(Organizations::City).string().null())
                    .col(ColumnDef::new(Organizations::State).string().null())
                    .col(ColumnDef::new(Organizations::Country).string().null())
                    .col(ColumnDef::new(Organizations::LogoUrl).string().null())
                    .col(ColumnDef::new(Organizations::Website).string().null())
                    .col(
                        ColumnDef::new(Organizations::Status)
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(Organizations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Organizations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Organizations::Table)
                    .col(Organizations::Name)
                    .name("idx_organizations_name")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Organizations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Organizations {
    Table,
    Id,
    Name,
    Description,
    Phone,
    Email,
    Address,
    City,
    State,
    Country,
    LogoUrl,
    Website,
    Status,
    CreatedAt,
    UpdatedAt,
}
