use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    #[error("Stale row: {0}")]
    StaleRow(String),

    #[error("Mapping error: {0}")]
    MappingError(String),
}

pub type DbResult<T> = Result<T, DbError>;

// Convert DbError to DomainError
impl From<DbError> for domain::errors::DomainError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound(msg) => domain::errors::DomainError::NotFound(msg),
            DbError::DuplicateEntry(msg) => domain::errors::DomainError::Conflict(msg),
            DbError::StaleRow(msg) => domain::errors::DomainError::Conflict(msg),
            DbError::DatabaseError(e) => {
                domain::errors::DomainError::StorageError(format!("Database error: {}", e))
            }
            DbError::MappingError(msg) => {
                domain::errors::DomainError::InternalError(format!("Mapping error: {}", msg))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::errors::DomainError;

    #[test]
    fn test_stale_row_maps_to_conflict() {
        let err: DomainError = DbError::StaleRow("pick already complete".to_string()).into();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn test_not_found_maps_through() {
        let err: DomainError = DbError::NotFound("missing".to_string()).into();
        assert!(matches!(err, DomainError::NotFound(_)));
    }
}
