use std::sync::Arc;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::form_data::repository::FormDataRepository;
use crate::form_data::service::FORM_DATA_NOT_FOUND;
use super::domain::{CreateQueryInput, NewQuery, Query, QueryChanges, UpdateQueryInput};
use super::repository::QueryRepository;

pub const QUERY_NOT_FOUND: &str = "Query not found";
pub const QUERY_EXISTS: &str = "Query already exists for this form data";
pub const TITLE_REQUIRED: &str = "Title is required";
pub const CREATE_FAILED: &str = "Failed to create query";
pub const UPDATE_FAILED: &str = "Failed to update query";
pub const FETCH_FAILED: &str = "Failed to fetch query";

/// Query business rules, independent of the web framework.
///
/// Preconditions are checked before any write; every store failure is logged
/// and replaced by the operation's generic message.
pub struct QueryService {
    queries: Arc<dyn QueryRepository>,
    form_data: Arc<dyn FormDataRepository>,
}

impl QueryService {
    pub fn new(queries: Arc<dyn QueryRepository>, form_data: Arc<dyn FormDataRepository>) -> Self {
        Self { queries, form_data }
    }

    /// Raise a query against an existing form data entry.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::query::{QueryService, domain::{CreateQueryInput, QueryStatus}};
    /// use service::repo::mock::MockStore;
    ///
    /// let store = Arc::new(MockStore::default());
    /// let fd = tokio_test::block_on(store.insert_form_data("Age?", "42"));
    /// let svc = QueryService::new(store.clone(), store);
    /// let input = CreateQueryInput { title: "Why?".into(), description: None, form_data_id: fd.id.to_string() };
    /// let q = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(q.status, QueryStatus::Open);
    /// ```
    #[instrument(skip(self, input), fields(form_data_id = %input.form_data_id))]
    pub async fn create(&self, input: CreateQueryInput) -> Result<Query, ServiceError> {
        debug!(title = %input.title, "create query");
        if input.title.is_empty() {
            return Err(ServiceError::Validation(TITLE_REQUIRED.into()));
        }
        let Ok(form_data_id) = Uuid::parse_str(&input.form_data_id) else {
            return Err(ServiceError::NotFound(FORM_DATA_NOT_FOUND.into()));
        };

        let form_data = self.form_data
            .find_by_id(form_data_id)
            .await
            .map_err(|e| ServiceError::operation_failed(CREATE_FAILED, e))?;
        if form_data.is_none() {
            return Err(ServiceError::NotFound(FORM_DATA_NOT_FOUND.into()));
        }

        let existing = self.queries
            .find_by_form_data_id(form_data_id)
            .await
            .map_err(|e| ServiceError::operation_failed(CREATE_FAILED, e))?;
        if let Some(existing) = existing {
            debug!(query_id = %existing.id, "query exists for form data");
            return Err(ServiceError::Conflict(QUERY_EXISTS.into()));
        }

        let new = NewQuery {
            title: input.title,
            description: input.description,
            form_data_id,
        };
        match self.queries.create(new).await {
            Ok(q) => {
                info!(query_id = %q.id, form_data_id = %q.form_data_id, "query_created");
                Ok(q)
            }
            // lost a race with a concurrent create; the store's unique index caught it
            Err(ServiceError::Conflict(cause)) => {
                debug!(%cause, "unique violation on create");
                Err(ServiceError::Conflict(QUERY_EXISTS.into()))
            }
            Err(e) => Err(ServiceError::operation_failed(CREATE_FAILED, e)),
        }
    }

    /// Set the status, and the description if the input carries one.
    #[instrument(skip(self, input), fields(query_id = %id, status = %input.status))]
    pub async fn update(&self, id: Uuid, input: UpdateQueryInput) -> Result<Query, ServiceError> {
        debug!("update query");
        let existing = self.queries
            .find_by_id(id)
            .await
            .map_err(|e| ServiceError::operation_failed(UPDATE_FAILED, e))?;
        if existing.is_none() {
            return Err(ServiceError::NotFound(QUERY_NOT_FOUND.into()));
        }

        match self.queries.update(id, QueryChanges::from(input)).await {
            Ok(q) => {
                info!(query_id = %q.id, status = %q.status, "query_updated");
                Ok(q)
            }
            // removed between the check and the write
            Err(ServiceError::NotFound(_)) => Err(ServiceError::NotFound(QUERY_NOT_FOUND.into())),
            Err(e) => Err(ServiceError::operation_failed(UPDATE_FAILED, e)),
        }
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<Query, ServiceError> {
        self.queries
            .find_by_id(id)
            .await
            .map_err(|e| ServiceError::operation_failed(FETCH_FAILED, e))?
            .ok_or_else(|| ServiceError::NotFound(QUERY_NOT_FOUND.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::domain::{Patch, QueryStatus};
    use crate::repo::mock::MockStore;

    fn service(store: &Arc<MockStore>) -> QueryService {
        QueryService::new(store.clone(), store.clone())
    }

    fn create_input(form_data_id: Uuid, title: &str) -> CreateQueryInput {
        CreateQueryInput { title: title.into(), description: None, form_data_id: form_data_id.to_string() }
    }

    fn status_only(status: QueryStatus) -> UpdateQueryInput {
        UpdateQueryInput { status, description: Patch::Absent }
    }

    #[tokio::test]
    async fn create_for_missing_form_data_is_not_found_and_writes_nothing() {
        let store = Arc::new(MockStore::default());
        let svc = service(&store);
        let err = svc.create(create_input(Uuid::new_v4(), "Why?")).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == FORM_DATA_NOT_FOUND));
        assert_eq!(store.query_count().await, 0);
    }

    #[tokio::test]
    async fn create_twice_for_same_form_data_conflicts() {
        let store = Arc::new(MockStore::default());
        let fd = store.insert_form_data("Q", "A").await;
        let svc = service(&store);
        svc.create(create_input(fd.id, "first")).await.unwrap();

        let err = svc.create(create_input(fd.id, "second")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(ref m) if m == QUERY_EXISTS));
        assert_eq!(store.query_count().await, 1);
    }

    #[tokio::test]
    async fn create_opens_a_new_query() {
        let store = Arc::new(MockStore::default());
        let fd = store.insert_form_data("Q", "A").await;
        let svc = service(&store);
        let input = CreateQueryInput { title: "Why?".into(), description: Some("details".into()), form_data_id: fd.id.to_string() };
        let q = svc.create(input).await.unwrap();
        assert_eq!(q.status, QueryStatus::Open);
        assert_eq!(q.title, "Why?");
        assert_eq!(q.description.as_deref(), Some("details"));
        assert_eq!(q.form_data_id, fd.id);

        let other = store.insert_form_data("Q2", "A2").await;
        let q2 = svc.create(create_input(other.id, "Again")).await.unwrap();
        assert_ne!(q.id, q2.id);
    }

    #[tokio::test]
    async fn create_rejects_empty_title() {
        let store = Arc::new(MockStore::default());
        let fd = store.insert_form_data("Q", "A").await;
        let err = service(&store).create(create_input(fd.id, "")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref m) if m == TITLE_REQUIRED));

        let q = service(&store).create(create_input(fd.id, "  ")).await.unwrap();
        assert_eq!(q.title, "  ");
    }

    #[tokio::test]
    async fn create_with_unparseable_form_data_id_is_not_found() {
        let store = Arc::new(MockStore::default());
        let input = CreateQueryInput { title: "Why?".into(), description: None, form_data_id: "F1".into() };
        let err = service(&store).create(input).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == FORM_DATA_NOT_FOUND));
        assert_eq!(store.query_count().await, 0);
    }

    #[tokio::test]
    async fn create_store_failure_is_generic() {
        let store = Arc::new(MockStore::default());
        let fd = store.insert_form_data("Q", "A").await;
        store.set_failing(true);
        let err = service(&store).create(create_input(fd.id, "Why?")).await.unwrap_err();
        assert!(matches!(err, ServiceError::OperationFailed(ref m) if m == CREATE_FAILED));
    }

    #[tokio::test]
    async fn update_missing_query_is_not_found() {
        let store = Arc::new(MockStore::default());
        let err = service(&store).update(Uuid::new_v4(), status_only(QueryStatus::Resolved)).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == QUERY_NOT_FOUND));
    }

    #[tokio::test]
    async fn update_status_only_keeps_description() {
        let store = Arc::new(MockStore::default());
        let fd = store.insert_form_data("Q", "A").await;
        let svc = service(&store);
        let input = CreateQueryInput { title: "Why?".into(), description: Some("keep me".into()), form_data_id: fd.id.to_string() };
        let q = svc.create(input).await.unwrap();

        let updated = svc.update(q.id, status_only(QueryStatus::Resolved)).await.unwrap();
        assert_eq!(updated.status, QueryStatus::Resolved);
        assert_eq!(updated.description.as_deref(), Some("keep me"));
        assert_eq!(updated.title, "Why?");
    }

    #[tokio::test]
    async fn update_sets_both_fields_and_can_reopen() {
        let store = Arc::new(MockStore::default());
        let fd = store.insert_form_data("Q", "A").await;
        let svc = service(&store);
        let q = svc.create(create_input(fd.id, "Why?")).await.unwrap();

        let input = UpdateQueryInput { status: QueryStatus::Resolved, description: Patch::Present(Some("answered".into())) };
        let resolved = svc.update(q.id, input).await.unwrap();
        assert_eq!(resolved.status, QueryStatus::Resolved);
        assert_eq!(resolved.description.as_deref(), Some("answered"));

        let input = UpdateQueryInput { status: QueryStatus::Open, description: Patch::Present(Some(String::new())) };
        let reopened = svc.update(q.id, input).await.unwrap();
        assert_eq!(reopened.status, QueryStatus::Open);
        assert_eq!(reopened.description.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn update_store_failure_is_generic() {
        let store = Arc::new(MockStore::default());
        let fd = store.insert_form_data("Q", "A").await;
        let svc = service(&store);
        let q = svc.create(create_input(fd.id, "Why?")).await.unwrap();
        store.set_failing(true);
        let err = svc.update(q.id, status_only(QueryStatus::Resolved)).await.unwrap_err();
        assert!(matches!(err, ServiceError::OperationFailed(ref m) if m == UPDATE_FAILED));
    }

    #[tokio::test]
    async fn get_returns_stored_record() {
        let store = Arc::new(MockStore::default());
        let fd = store.insert_form_data("Q", "A").await;
        let svc = service(&store);
        let q = svc.create(create_input(fd.id, "Why?")).await.unwrap();
        assert_eq!(svc.get(q.id).await.unwrap(), q);

        let err = svc.get(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == QUERY_NOT_FOUND));
    }

    #[tokio::test]
    async fn get_store_failure_is_generic() {
        let store = Arc::new(MockStore::default());
        store.set_failing(true);
        let err = service(&store).get(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::OperationFailed(ref m) if m == FETCH_FAILED));
    }

    #[tokio::test]
    async fn created_query_shows_up_on_its_form_data() {
        let store = Arc::new(MockStore::default());
        let fd = store.insert_form_data("Q", "A").await;
        let q = service(&store).create(create_input(fd.id, "Why?")).await.unwrap();
        let joined = crate::form_data::FormDataService::new(store.clone()).get(fd.id).await.unwrap();
        assert_eq!(joined.query, Some(q));
    }
}
