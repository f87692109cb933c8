use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::form_data::{domain::FormData, repository::FormDataRepository};
use crate::query::{domain::{NewQuery, Query, QueryChanges}, repository::QueryRepository};

/// SeaORM-backed query repository.
#[derive(Clone)]
pub struct SeaOrmQueryRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl QueryRepository for SeaOrmQueryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Query>, ServiceError> {
        let found = models::query::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(found.map(Query::from))
    }

    async fn find_by_form_data_id(&self, form_data_id: Uuid) -> Result<Option<Query>, ServiceError> {
        let found = models::query::find_by_form_data_id(&self.db, form_data_id).await?;
        Ok(found.map(Query::from))
    }

    async fn create(&self, new: NewQuery) -> Result<Query, ServiceError> {
        let created = models::query::create(&self.db, &new.title, new.description.as_deref(), new.form_data_id).await?;
        Ok(Query::from(created))
    }

    async fn update(&self, id: Uuid, changes: QueryChanges) -> Result<Query, ServiceError> {
        let updated = models::query::update(&self.db, id, changes.status, changes.description).await?;
        Ok(Query::from(updated))
    }
}

/// SeaORM-backed form data repository.
#[derive(Clone)]
pub struct SeaOrmFormDataRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl FormDataRepository for SeaOrmFormDataRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<FormData>, ServiceError> {
        let found = models::form_data::find_with_query(&self.db, id).await?;
        Ok(found.map(FormData::from))
    }

    async fn list(&self, page_index: u64, per_page: u64) -> Result<(Vec<FormData>, u64), ServiceError> {
        let (rows, total) = models::form_data::list_with_query(&self.db, page_index, per_page).await?;
        Ok((rows.into_iter().map(FormData::from).collect(), total))
    }
}
