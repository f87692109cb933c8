use std::sync::Arc;

use tracing::{debug, instrument};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::pagination::Pagination;
use super::domain::{CountedFormData, FormData};
use super::repository::FormDataRepository;

pub const FORM_DATA_NOT_FOUND: &str = "Form data not found";
pub const FETCH_FAILED: &str = "Failed to fetch form data";

/// Read surface over form data entries.
pub struct FormDataService {
    repo: Arc<dyn FormDataRepository>,
}

impl FormDataService {
    pub fn new(repo: Arc<dyn FormDataRepository>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<FormData, ServiceError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| ServiceError::operation_failed(FETCH_FAILED, e))?
            .ok_or_else(|| ServiceError::NotFound(FORM_DATA_NOT_FOUND.into()))
    }

    #[instrument(skip(self))]
    pub async fn list(&self, page: Pagination) -> Result<CountedFormData, ServiceError> {
        let (page_index, per_page) = page.normalize();
        let (form_data, total) = self.repo
            .list(page_index, per_page)
            .await
            .map_err(|e| ServiceError::operation_failed(FETCH_FAILED, e))?;
        debug!(total, returned = form_data.len(), "listed form data");
        Ok(CountedFormData { total, form_data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::mock::MockStore;

    #[tokio::test]
    async fn get_returns_entry_without_query() {
        let store = Arc::new(MockStore::default());
        let fd = store.insert_form_data("Q", "A").await;
        let svc = FormDataService::new(store);
        let found = svc.get(fd.id).await.unwrap();
        assert_eq!(found.question, "Q");
        assert!(found.query.is_none());
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let svc = FormDataService::new(Arc::new(MockStore::default()));
        let err = svc.get(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == FORM_DATA_NOT_FOUND));
    }

    #[tokio::test]
    async fn list_pages_in_insertion_order_with_total() {
        let store = Arc::new(MockStore::default());
        for i in 0..5 {
            store.insert_form_data(&format!("q{}", i), "a").await;
        }
        let svc = FormDataService::new(store);
        let page = svc.list(Pagination { page: 2, per_page: 2 }).await.unwrap();
        assert_eq!(page.total, 5);
        let questions: Vec<_> = page.form_data.iter().map(|f| f.question.as_str()).collect();
        assert_eq!(questions, ["q2", "q3"]);
    }

    #[tokio::test]
    async fn store_failure_is_reported_generically() {
        let store = Arc::new(MockStore::default());
        store.set_failing(true);
        let svc = FormDataService::new(store);
        let err = svc.list(Pagination::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::OperationFailed(ref m) if m == FETCH_FAILED));
    }
}
