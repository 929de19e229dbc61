/// Storage-specific errors
use thiserror::Error;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

impl From<StorageError> for pariszik_core::ZikError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { entity, id } => Self::not_found(entity, id),
            StorageError::Database(e) => Self::Database(e.to_string()),
            StorageError::Io(e) => Self::Io(e),
            other => Self::storage(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pariszik_core::ZikError;

    #[test]
    fn not_found_stays_not_found_in_core() {
        let err: ZikError = StorageError::not_found("Content", "x").into();
        assert!(err.is_not_found());
    }

    #[test]
    fn database_error_maps_to_database() {
        let err: ZikError = StorageError::Database(sqlx::Error::RowNotFound).into();
        assert!(matches!(err, ZikError::Database(_)));
    }
}
