use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

pub use models::query::QueryStatus;

/// Query as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: QueryStatus,
    pub form_data_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<models::query::Model> for Query {
    fn from(m: models::query::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            status: m.status,
            form_data_id: m.form_data_id,
            created_at: m.created_at.with_timezone(&Utc),
            updated_at: m.updated_at.with_timezone(&Utc),
        }
    }
}

/// Body of `POST /query`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQueryInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Kept as text so an id that is not a UUID reads as unknown form data.
    pub form_data_id: String,
}

/// Body of `PUT /query/:id`
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateQueryInput {
    pub status: QueryStatus,
    /// `null` clears the description; leaving the field out keeps it.
    #[serde(default)]
    pub description: Patch<Option<String>>,
}

/// A field in a partial update: either left out of the request or present
/// with a value (which may itself be empty or null).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Absent,
    Present(T),
}

impl<T> Patch<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Patch::Absent => None,
            Patch::Present(v) => Some(v),
        }
    }

    pub fn is_absent(&self) -> bool { matches!(self, Patch::Absent) }
}

impl<T> Default for Patch<T> {
    fn default() -> Self { Patch::Absent }
}

impl<T> From<T> for Patch<T> {
    fn from(v: T) -> Self { Patch::Present(v) }
}

// Only called when the key is in the payload; `#[serde(default)]` covers absence.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Patch::Present)
    }
}

/// Insert payload handed to the repository once preconditions hold.
#[derive(Debug, Clone)]
pub struct NewQuery {
    pub title: String,
    pub description: Option<String>,
    pub form_data_id: Uuid,
}

/// Changes applied by an update; `description: None` means untouched.
#[derive(Debug, Clone)]
pub struct QueryChanges {
    pub status: QueryStatus,
    pub description: Option<Option<String>>,
}

impl From<UpdateQueryInput> for QueryChanges {
    fn from(input: UpdateQueryInput) -> Self {
        Self { status: input.status, description: input.description.into_option() }
    }
}
