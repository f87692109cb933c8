use thiserror::Error;

use models::errors::ModelError;

/// Errors raised by the service layer. The `String` payload of the first
/// four variants is the caller-facing message.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    /// Generic per-operation failure; the cause has already been logged.
    #[error("{0}")]
    OperationFailed(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Log `cause` and replace it with the stable message for the operation.
    pub fn operation_failed(message: &str, cause: ServiceError) -> Self {
        tracing::error!(error = %cause, "{}", message);
        Self::OperationFailed(message.to_string())
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(m) => ServiceError::Validation(m),
            ModelError::NotFound(entity) => ServiceError::not_found(entity),
            ModelError::Conflict(m) => ServiceError::Conflict(m),
            ModelError::Db(m) => ServiceError::Db(m),
        }
    }
}
