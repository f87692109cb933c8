use axum::{
    extract::{rejection::{PathRejection, QueryRejection}, Path, Query as QueryParams, State},
    Json,
};
use service::form_data::domain::{CountedFormData, FormData};
use service::form_data::service::FORM_DATA_NOT_FOUND;
use service::pagination::Pagination;
use uuid::Uuid;

use crate::{errors::ApiError, state::AppState};

#[utoipa::path(
    get, path = "/form-data", tag = "form-data",
    params(
        ("page" = Option<u32>, Query, description = "1-based page, defaults to 1"),
        ("perPage" = Option<u32>, Query, description = "Page size, 1..=100, defaults to 20")
    ),
    responses(
        (status = 200, description = "OK", body = crate::openapi::CountedFormDataDoc),
        (status = 400, description = "Fetch failure", body = crate::openapi::ErrorMessageDoc)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    params: Result<QueryParams<Pagination>, QueryRejection>,
) -> Result<Json<CountedFormData>, ApiError> {
    let QueryParams(page) = params?;
    Ok(Json(state.form_data.list(page).await?))
}

#[utoipa::path(
    get, path = "/form-data/{id}", tag = "form-data",
    params(("id" = Uuid, Path, description = "Form data ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::FormDataDoc),
        (status = 400, description = "Fetch failure", body = crate::openapi::ErrorMessageDoc),
        (status = 404, description = "Form data not found", body = crate::openapi::ErrorMessageDoc)
    )
)]
pub async fn get(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<FormData>, ApiError> {
    let Path(id) = path.map_err(|_| ApiError::not_found(FORM_DATA_NOT_FOUND))?;
    Ok(Json(state.form_data.get(id).await?))
}
