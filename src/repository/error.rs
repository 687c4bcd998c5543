#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DatabaseError {
    #[error("Unique constraint violated on `{field}`")]
    UniqueViolation { field: String },

    #[error("Table `{table}` lock poisoned")]
    LockPoisoned { table: &'static str },

    #[error("Internal database error: {message}")]
    InternalError { message: String },
}
