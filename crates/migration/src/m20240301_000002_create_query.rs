//! Create `query` table.
//! One follow-up query per form data entry; the unique index on
//! `form_data_id` is what serializes concurrent creates.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Query::Table)
                    .if_not_exists()
                    .col(uuid(Query::Id).primary_key())
                    .col(text(Query::Title).not_null())
                    .col(text_null(Query::Description))
                    .col(string_len(Query::Status, 16).not_null().default("OPEN"))
                    .col(uuid(Query::FormDataId).not_null())
                    .col(
                        timestamp_with_time_zone(Query::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Query::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .check(Expr::col(Query::Status).is_in(["OPEN", "RESOLVED"]))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_query_form_data")
                            .from(Query::Table, Query::FormDataId)
                            .to(FormData::Table, FormData::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_query_form_data_unique")
                    .table(Query::Table)
                    .col(Query::FormDataId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Query::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Query {
    Table,
    Id,
    Title,
    Description,
    Status,
    FormDataId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum FormData { Table, Id }
