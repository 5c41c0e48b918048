use thiserror::Error;

/// Failures surfaced by the data access layer
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A write would duplicate a value the schema requires to be unique
    #[error("Constraint violation: {0}")]
    Conflict(String),

    /// The targeted row does not exist (or vanished mid-sequence)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Store unreachable or connection dropped
    #[error("Connection error: {0}")]
    Connection(String),

    /// Any other query failure
    #[error("Query error: {0}")]
    Query(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<sqlx::Error> for RepositoryError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepositoryError::Conflict(db.message().to_string())
            }
            sqlx::Error::Io(e) => RepositoryError::Connection(e.to_string()),
            sqlx::Error::Tls(e) => RepositoryError::Connection(e.to_string()),
            e @ (sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed) => {
                RepositoryError::Connection(e.to_string())
            }
            e @ sqlx::Error::RowNotFound => RepositoryError::NotFound(e.to_string()),
            other => RepositoryError::Query(other.to_string()),
        }
    }
}
