use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::form_data::{domain::FormData, repository::FormDataRepository};
use crate::query::{domain::{NewQuery, Query, QueryChanges, QueryStatus}, repository::QueryRepository};

#[derive(Debug, Clone)]
struct FormDataRow {
    id: Uuid,
    question: String,
    answer: String,
    reviewed: Option<bool>,
    flagged: Option<bool>,
}

/// In-memory store backing both repositories, with the same uniqueness and
/// foreign-key rules as the database schema.
#[derive(Default)]
pub struct MockStore {
    form_data: Mutex<Vec<FormDataRow>>, // insertion order = creation order
    queries: Mutex<HashMap<Uuid, Query>>,
    failing: AtomicBool,
}

impl MockStore {
    /// Seed a form data entry.
    pub async fn insert_form_data(&self, question: &str, answer: &str) -> FormData {
        let row = FormDataRow {
            id: Uuid::new_v4(),
            question: question.to_string(),
            answer: answer.to_string(),
            reviewed: None,
            flagged: None,
        };
        self.form_data.lock().await.push(row.clone());
        Self::join(row, None)
    }

    /// Make every subsequent repository call fail with a database error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn query_count(&self) -> usize {
        self.queries.lock().await.len()
    }

    fn check(&self) -> Result<(), ServiceError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ServiceError::Db("mock store unavailable".into()));
        }
        Ok(())
    }

    fn join(row: FormDataRow, query: Option<Query>) -> FormData {
        FormData {
            id: row.id,
            question: row.question,
            answer: row.answer,
            reviewed: row.reviewed,
            flagged: row.flagged,
            query,
        }
    }

    async fn query_for(&self, form_data_id: Uuid) -> Option<Query> {
        self.queries.lock().await.values().find(|q| q.form_data_id == form_data_id).cloned()
    }
}

#[async_trait]
impl FormDataRepository for MockStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<FormData>, ServiceError> {
        self.check()?;
        let row = self.form_data.lock().await.iter().find(|r| r.id == id).cloned();
        match row {
            Some(row) => {
                let q = self.query_for(row.id).await;
                Ok(Some(Self::join(row, q)))
            }
            None => Ok(None),
        }
    }

    async fn list(&self, page_index: u64, per_page: u64) -> Result<(Vec<FormData>, u64), ServiceError> {
        self.check()?;
        let rows = self.form_data.lock().await.clone();
        let total = rows.len() as u64;
        let mut page = Vec::new();
        for row in rows.into_iter().skip((page_index * per_page) as usize).take(per_page as usize) {
            let q = self.query_for(row.id).await;
            page.push(Self::join(row, q));
        }
        Ok((page, total))
    }
}

#[async_trait]
impl QueryRepository for MockStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Query>, ServiceError> {
        self.check()?;
        Ok(self.queries.lock().await.get(&id).cloned())
    }

    async fn find_by_form_data_id(&self, form_data_id: Uuid) -> Result<Option<Query>, ServiceError> {
        self.check()?;
        Ok(self.query_for(form_data_id).await)
    }

    async fn create(&self, new: NewQuery) -> Result<Query, ServiceError> {
        self.check()?;
        if !self.form_data.lock().await.iter().any(|r| r.id == new.form_data_id) {
            return Err(ServiceError::Db("foreign key violation: form_data_id".into()));
        }
        let mut queries = self.queries.lock().await;
        if queries.values().any(|q| q.form_data_id == new.form_data_id) {
            return Err(ServiceError::Conflict("idx_query_form_data_unique".into()));
        }
        let now = Utc::now();
        let q = Query {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            status: QueryStatus::Open,
            form_data_id: new.form_data_id,
            created_at: now,
            updated_at: now,
        };
        queries.insert(q.id, q.clone());
        Ok(q)
    }

    async fn update(&self, id: Uuid, changes: QueryChanges) -> Result<Query, ServiceError> {
        self.check()?;
        let mut queries = self.queries.lock().await;
        let q = queries.get_mut(&id).ok_or_else(|| ServiceError::not_found("query"))?;
        q.status = changes.status;
        if let Some(d) = changes.description {
            q.description = d;
        }
        q.updated_at = Utc::now();
        Ok(q.clone())
    }
}
