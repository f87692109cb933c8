use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::ServiceError;
use super::domain::{NewQuery, Query, QueryChanges};

/// Persistence for queries. Implementations must enforce at most one query
/// per form data entry and report a violation as `ServiceError::Conflict`.
#[async_trait]
pub trait QueryRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Query>, ServiceError>;
    async fn find_by_form_data_id(&self, form_data_id: Uuid) -> Result<Option<Query>, ServiceError>;
    async fn create(&self, new: NewQuery) -> Result<Query, ServiceError>;
    async fn update(&self, id: Uuid, changes: QueryChanges) -> Result<Query, ServiceError>;
}
