use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorMessageDoc { pub message: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryStatusDoc { Open, Resolved }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueryDoc {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: QueryStatusDoc,
    pub form_data_id: Uuid,
    /// RFC 3339 timestamp
    pub created_at: String,
    /// RFC 3339 timestamp
    pub updated_at: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateQueryDoc {
    pub title: String,
    pub description: Option<String>,
    pub form_data_id: Uuid,
}

#[derive(Serialize, ToSchema)]
pub struct UpdateQueryDoc {
    pub status: QueryStatusDoc,
    /// Omit to keep the stored value; `null` clears it.
    pub description: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct FormDataDoc {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub reviewed: Option<bool>,
    pub flagged: Option<bool>,
    pub query: Option<QueryDoc>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CountedFormDataDoc {
    pub total: u64,
    pub form_data: Vec<FormDataDoc>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::query::create,
        crate::routes::query::update,
        crate::routes::query::get,
        crate::routes::form_data::list,
        crate::routes::form_data::get,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorMessageDoc,
            QueryStatusDoc,
            QueryDoc,
            CreateQueryDoc,
            UpdateQueryDoc,
            FormDataDoc,
            CountedFormDataDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "query"),
        (name = "form-data")
    )
)]
pub struct ApiDoc;
