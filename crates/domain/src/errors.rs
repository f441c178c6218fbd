use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not your turn: {0}")]
    NotYourTurn(String),

    #[error("Player unavailable: {0}")]
    PlayerUnavailable(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Trade not found: {0}")]
    TradeNotFound(String),

    #[error("Trade expired: {0}")]
    TradeExpired(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Wire error code delivered to the requesting session.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::ValidationError(_) | DomainError::NotFound(_) => "VALIDATION_FAILED",
            DomainError::Unauthorized(_) => "UNAUTHORIZED",
            DomainError::NotYourTurn(_) => "NOT_YOUR_TURN",
            DomainError::PlayerUnavailable(_) => "PLAYER_UNAVAILABLE",
            DomainError::InvalidState(_) => "INVALID_STATE",
            DomainError::TradeNotFound(_) => "TRADE_NOT_FOUND",
            DomainError::TradeExpired(_) => "TRADE_EXPIRED",
            DomainError::Conflict(_) => "VALIDATION_FAILED",
            DomainError::StorageError(_) => "STORAGE_ERROR",
            DomainError::InternalError(_) => "CONN_ERROR",
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
