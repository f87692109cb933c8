use crate::errors::ModelError;
use crate::query::QueryStatus;
use crate::{form_data, query};
use anyhow::Result;
use sea_orm::EntityTrait;
use uuid::Uuid;

use super::setup_test_db;

#[tokio::test]
async fn test_form_data_create_and_read() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let question = format!("question_{}", Uuid::new_v4());
    let created = form_data::create(&db, &question, "forty-two").await?;
    assert_eq!(created.question, question);
    assert!(created.reviewed.is_none());

    let (found, q) = form_data::find_with_query(&db, created.id).await?.expect("form data present");
    assert_eq!(found.id, created.id);
    assert!(q.is_none());

    form_data::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_query_lifecycle() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let fd = form_data::create(&db, "Is the form clear?", "Mostly").await?;
    let q = query::create(&db, "Why?", None, fd.id).await?;
    assert_eq!(q.status, QueryStatus::Open);
    assert_eq!(q.form_data_id, fd.id);
    assert!(q.description.is_none());

    let by_fk = query::find_by_form_data_id(&db, fd.id).await?.expect("query by form data");
    assert_eq!(by_fk.id, q.id);

    let resolved = query::update(&db, q.id, QueryStatus::Resolved, None).await?;
    assert_eq!(resolved.status, QueryStatus::Resolved);
    assert!(resolved.description.is_none());
    assert_eq!(resolved.title, "Why?");

    let described = query::update(&db, q.id, QueryStatus::Open, Some(Some("follow up".into()))).await?;
    assert_eq!(described.description.as_deref(), Some("follow up"));

    let (_, joined) = form_data::find_with_query(&db, fd.id).await?.expect("form data present");
    assert_eq!(joined.map(|j| j.id), Some(q.id));

    // cascades to the query
    form_data::Entity::delete_by_id(fd.id).exec(&db).await?;
    assert!(query::Entity::find_by_id(q.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_long_title_is_stored_whole() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let fd = form_data::create(&db, "Long?", "Yes").await?;
    let title = "why ".repeat(1000);
    let q = query::create(&db, &title, None, fd.id).await?;
    let stored = query::Entity::find_by_id(q.id).one(&db).await?.expect("query present");
    assert_eq!(stored.title, title);

    form_data::Entity::delete_by_id(fd.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_second_query_for_same_form_data_conflicts() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let fd = form_data::create(&db, "Duplicate?", "Yes").await?;
    let _first = query::create(&db, "first", None, fd.id).await?;
    let second = query::create(&db, "second", Some("again"), fd.id).await;
    assert!(matches!(second, Err(ModelError::Conflict(_))), "got {:?}", second);

    form_data::Entity::delete_by_id(fd.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_update_missing_query_is_not_found() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let res = query::update(&db, Uuid::new_v4(), QueryStatus::Resolved, None).await;
    assert!(matches!(res, Err(ModelError::NotFound("query"))));
    Ok(())
}

#[tokio::test]
async fn test_list_pages_and_counts() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let mut ids = vec![];
    for i in 0..3 {
        let fd = form_data::create(&db, &format!("list question {}", i), "answer").await?;
        ids.push(fd.id);
    }

    let (page, total) = form_data::list_with_query(&db, 0, 2).await?;
    assert!(total >= 3);
    assert_eq!(page.len(), 2);

    for id in ids {
        form_data::Entity::delete_by_id(id).exec(&db).await?;
    }
    Ok(())
}
