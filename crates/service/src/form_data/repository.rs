use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::ServiceError;
use super::domain::FormData;

/// Read access to form data; each entry comes joined with its query.
#[async_trait]
pub trait FormDataRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<FormData>, ServiceError>;
    /// Page `page_index` (0-based) of `per_page` entries and the total count.
    async fn list(&self, page_index: u64, per_page: u64) -> Result<(Vec<FormData>, u64), ServiceError>;
}
