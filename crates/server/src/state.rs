use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::form_data::{repository::FormDataRepository, FormDataService};
use service::query::{repository::QueryRepository, QueryService};
use service::repo::seaorm::{SeaOrmFormDataRepository, SeaOrmQueryRepository};

/// Shared handler state; services are behind `Arc` so cloning per request is cheap.
#[derive(Clone)]
pub struct AppState {
    pub queries: Arc<QueryService>,
    pub form_data: Arc<FormDataService>,
}

impl AppState {
    pub fn new(queries: Arc<dyn QueryRepository>, form_data: Arc<dyn FormDataRepository>) -> Self {
        Self {
            queries: Arc::new(QueryService::new(queries, Arc::clone(&form_data))),
            form_data: Arc::new(FormDataService::new(form_data)),
        }
    }

    /// State wired to the SeaORM repositories.
    pub fn from_db(db: DatabaseConnection) -> Self {
        let queries = Arc::new(SeaOrmQueryRepository { db: db.clone() });
        let form_data = Arc::new(SeaOrmFormDataRepository { db });
        Self::new(queries, form_data)
    }
}
