use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::StatusCode,
    Json,
};
use service::query::domain::{CreateQueryInput, Query, UpdateQueryInput};
use service::query::service::QUERY_NOT_FOUND;
use uuid::Uuid;

use crate::{errors::ApiError, state::AppState};

// An id that is not a UUID cannot name a stored query.
fn query_id(path: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, ApiError> {
    path.map(|Path(id)| id).map_err(|_| ApiError::not_found(QUERY_NOT_FOUND))
}

#[utoipa::path(
    post, path = "/query", tag = "query",
    request_body = crate::openapi::CreateQueryDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::QueryDoc),
        (status = 400, description = "Duplicate query, invalid body or create failure", body = crate::openapi::ErrorMessageDoc),
        (status = 404, description = "Form data not found", body = crate::openapi::ErrorMessageDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateQueryInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Query>), ApiError> {
    let Json(input) = body?;
    let q = state.queries.create(input).await?;
    Ok((StatusCode::CREATED, Json(q)))
}

#[utoipa::path(
    put, path = "/query/{id}", tag = "query",
    params(("id" = Uuid, Path, description = "Query ID")),
    request_body = crate::openapi::UpdateQueryDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::QueryDoc),
        (status = 400, description = "Invalid body or update failure", body = crate::openapi::ErrorMessageDoc),
        (status = 404, description = "Query not found", body = crate::openapi::ErrorMessageDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<UpdateQueryInput>, JsonRejection>,
) -> Result<Json<Query>, ApiError> {
    let id = query_id(path)?;
    let Json(input) = body?;
    let q = state.queries.update(id, input).await?;
    Ok(Json(q))
}

#[utoipa::path(
    get, path = "/query/{id}", tag = "query",
    params(("id" = Uuid, Path, description = "Query ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::QueryDoc),
        (status = 400, description = "Fetch failure", body = crate::openapi::ErrorMessageDoc),
        (status = 404, description = "Query not found", body = crate::openapi::ErrorMessageDoc)
    )
)]
pub async fn get(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Query>, ApiError> {
    let id = query_id(path)?;
    Ok(Json(state.queries.get(id).await?))
}
