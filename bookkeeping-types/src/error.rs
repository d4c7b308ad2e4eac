//! Error types for the bookkeeping service.

use exchange_rates::{CurrencyCode, ExchangeRateError};

/// Domain-level errors (business rule violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("User not found: {0}")]
    UserNotFound(i64),

    #[error("Unknown currency: {0}")]
    InvalidCurrency(String),

    #[error("Invalid exchange rate: {0}")]
    InvalidExchangeRate(String),

    #[error("Custom exchange rate not found: {0}")]
    CustomExchangeRateNotFound(CurrencyCode),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes. `UpstreamFailed` and
/// `OperationFailed` carry no detail so nothing about the failing provider
/// row or storage query leaks to API consumers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Failed to request third party api")]
    UpstreamFailed,

    #[error("Operation failed")]
    OperationFailed,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::UserNotFound(uid) => AppError::NotFound(format!("User {}", uid)),
            DomainError::CustomExchangeRateNotFound(currency) => {
                AppError::NotFound(format!("Custom exchange rate {}", currency))
            }
            e => AppError::BadRequest(e.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(e) => e.into(),
            RepoError::NotFound => AppError::NotFound("Resource not found".into()),
            RepoError::Conflict(e) => AppError::Conflict(e),
            RepoError::Database(_) => AppError::OperationFailed,
        }
    }
}

impl From<ExchangeRateError> for AppError {
    fn from(err: ExchangeRateError) -> Self {
        match err {
            ExchangeRateError::FailedToRequestRemoteApi => AppError::UpstreamFailed,
            e => AppError::Internal(e.to_string()),
        }
    }
}
