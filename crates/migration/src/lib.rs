//! Migrator registering entity-specific migrations in dependency order.
//! `query` references `form_data`, so form data is created first.
pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_form_data;
mod m20240301_000002_create_query;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_form_data::Migration),
            Box::new(m20240301_000002_create_query::Migration),
        ]
    }
}
