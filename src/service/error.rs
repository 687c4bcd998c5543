use crate::notifier::NotifyError;
use crate::repository::error::DatabaseError;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ServiceError {
    #[error("{message}")]
    Validation { field: String, message: String },

    #[error("{message}")]
    Conflict { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("NotifyError: {0}")]
    Notification(#[from] NotifyError),

    #[error("DatabaseError: {0}")]
    DatabaseError(#[from] DatabaseError),
}
