//! Create `form_data` table.
//! Question/answer entries written by the intake pipeline; read-only for this service.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FormData::Table)
                    .if_not_exists()
                    .col(uuid(FormData::Id).primary_key())
                    .col(text(FormData::Question).not_null())
                    .col(text(FormData::Answer).not_null())
                    .col(boolean_null(FormData::Reviewed))
                    .col(boolean_null(FormData::Flagged))
                    .col(
                        timestamp_with_time_zone(FormData::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing pages are ordered by creation time
        manager
            .create_index(
                Index::create()
                    .name("idx_form_data_created_at")
                    .table(FormData::Table)
                    .col(FormData::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(FormData::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum FormData {
    Table,
    Id,
    Question,
    Answer,
    Reviewed,
    Flagged,
    CreatedAt,
}
