use std::fmt;

use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, form_data};

/// Lifecycle of a query. Both states can be set at any time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryStatus {
    #[default]
    #[sea_orm(string_value = "OPEN")]
    Open,
    #[sea_orm(string_value = "RESOLVED")]
    Resolved,
}

impl fmt::Display for QueryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryStatus::Open => f.write_str("OPEN"),
            QueryStatus::Resolved => f.write_str("RESOLVED"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "query")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub status: QueryStatus,
    #[sea_orm(unique)]
    pub form_data_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { FormData }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::FormData => Entity::belongs_to(form_data::Entity)
                .from(Column::FormDataId)
                .to(form_data::Column::Id)
                .into(),
        }
    }
}

impl Related<form_data::Entity> for Entity {
    fn to() -> RelationDef { Relation::FormData.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_title(title: &str) -> Result<(), errors::ModelError> {
    if title.is_empty() {
        return Err(errors::ModelError::Validation("title is required".into()));
    }
    Ok(())
}

/// Insert an OPEN query for `form_data_id`. A second insert for the same
/// form data trips the unique index and surfaces as `ModelError::Conflict`.
pub async fn create(
    db: &DatabaseConnection,
    title: &str,
    description: Option<&str>,
    form_data_id: Uuid,
) -> Result<Model, errors::ModelError> {
    validate_title(title)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(title.to_string()),
        description: Set(description.map(str::to_string)),
        status: Set(QueryStatus::Open),
        form_data_id: Set(form_data_id),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_form_data_id(db: &DatabaseConnection, form_data_id: Uuid) -> Result<Option<Model>, errors::ModelError> {
    let found = Entity::find()
        .filter(Column::FormDataId.eq(form_data_id))
        .one(db)
        .await?;
    Ok(found)
}

/// Set `status`; `description` is only touched when the outer option is `Some`.
pub async fn update(
    db: &DatabaseConnection,
    id: Uuid,
    status: QueryStatus,
    description: Option<Option<String>>,
) -> Result<Model, errors::ModelError> {
    let mut found: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(errors::ModelError::NotFound("query"))?
        .into();
    found.status = Set(status);
    if let Some(d) = description {
        found.description = Set(d);
    }
    found.updated_at = Set(Utc::now().into());
    Ok(found.update(db).await?)
}
