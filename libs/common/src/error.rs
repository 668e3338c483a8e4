//! Custom error types for the common library
//!
//! Storage failures are classified here so that services can tell a
//! uniqueness or reference violation apart from an unreachable database.

use sqlx::Error as SqlxError;
use sqlx::error::ErrorKind;
use sqlx::migrate::MigrateError;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Error occurred during database migration
    #[error("Database migration error: {0}")]
    Migration(#[from] MigrateError),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),

    /// A unique constraint rejected the write
    #[error("Unique constraint violated: {}", constraint.as_deref().unwrap_or("unknown"))]
    UniqueViolation { constraint: Option<String> },

    /// A foreign key constraint rejected the write
    #[error("Foreign key constraint violated: {}", constraint.as_deref().unwrap_or("unknown"))]
    ForeignKeyViolation { constraint: Option<String> },
}

impl DatabaseError {
    /// Name of the violated constraint, if this is a constraint violation
    pub fn constraint(&self) -> Option<&str> {
        match self {
            DatabaseError::UniqueViolation { constraint }
            | DatabaseError::ForeignKeyViolation { constraint } => constraint.as_deref(),
            _ => None,
        }
    }
}

impl From<SqlxError> for DatabaseError {
    fn from(err: SqlxError) -> Self {
        if let SqlxError::Database(db_err) = &err {
            let constraint = db_err.constraint().map(str::to_string);
            match db_err.kind() {
                ErrorKind::UniqueViolation => {
                    return DatabaseError::UniqueViolation { constraint };
                }
                ErrorKind::ForeignKeyViolation => {
                    return DatabaseError::ForeignKeyViolation { constraint };
                }
                _ => {}
            }
        }

        match err {
            SqlxError::PoolTimedOut | SqlxError::PoolClosed | SqlxError::Io(_) => {
                DatabaseError::Connection(err)
            }
            other => DatabaseError::Query(other),
        }
    }
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
