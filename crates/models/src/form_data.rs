use sea_orm::{entity::prelude::*, DatabaseConnection, PaginatorTrait, QueryOrder, QuerySelect, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, query};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "form_data")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub question: String,
    #[sea_orm(column_type = "Text")]
    pub answer: String,
    pub reviewed: Option<bool>,
    pub flagged: Option<bool>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Query }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Query => Entity::has_one(query::Entity).into(),
        }
    }
}

impl Related<query::Entity> for Entity {
    fn to() -> RelationDef { Relation::Query.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// A form data row joined with its query, if one was raised.
pub type WithQuery = (Model, Option<query::Model>);

/// Insert a form data entry. Entries normally arrive from the intake side;
/// this exists for seeding and tests.
pub async fn create(db: &DatabaseConnection, question: &str, answer: &str) -> Result<Model, errors::ModelError> {
    if question.trim().is_empty() { return Err(errors::ModelError::Validation("question required".into())); }
    if answer.trim().is_empty() { return Err(errors::ModelError::Validation("answer required".into())); }
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        question: Set(question.to_string()),
        answer: Set(answer.to_string()),
        reviewed: Set(None),
        flagged: Set(None),
        created_at: Set(Utc::now().into()),
    };
    Ok(am.insert(db).await?)
}

pub async fn find_with_query(db: &DatabaseConnection, id: Uuid) -> Result<Option<WithQuery>, errors::ModelError> {
    let row = Entity::find_by_id(id)
        .find_also_related(query::Entity)
        .one(db)
        .await?;
    Ok(row)
}

/// One page of form data in creation order, plus the total row count.
pub async fn list_with_query(
    db: &DatabaseConnection,
    page_index: u64,
    per_page: u64,
) -> Result<(Vec<WithQuery>, u64), errors::ModelError> {
    let total = Entity::find().count(db).await?;
    let rows = Entity::find()
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .find_also_related(query::Entity)
        .offset(page_index * per_page)
        .limit(per_page)
        .all(db)
        .await?;
    Ok((rows, total))
}
