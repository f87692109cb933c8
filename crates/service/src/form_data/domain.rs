use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::query::domain::Query;

/// Form data entry with its query, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub reviewed: Option<bool>,
    pub flagged: Option<bool>,
    pub query: Option<Query>,
}

impl From<models::form_data::WithQuery> for FormData {
    fn from((fd, q): models::form_data::WithQuery) -> Self {
        Self {
            id: fd.id,
            question: fd.question,
            answer: fd.answer,
            reviewed: fd.reviewed,
            flagged: fd.flagged,
            query: q.map(Query::from),
        }
    }
}

/// One page of form data plus the overall count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountedFormData {
    pub total: u64,
    pub form_data: Vec<FormData>,
}
