//! Error types for exchange rate retrieval.

/// Errors surfaced by data sources, the fetch wrapper and configuration.
///
/// Row-level problems never show up here: a malformed currency row is
/// logged and dropped by the adapter that found it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExchangeRateError {
    /// Transport failure, non-200 status, or a body whose root structure
    /// could not be understood.
    #[error("Failed to request third party api")]
    FailedToRequestRemoteApi,

    /// The configured data source value is empty or unknown.
    #[error("Invalid exchange rates data source: {0}")]
    InvalidExchangeRatesDataSource(String),

    /// The HTTP client could not be built from the given settings.
    #[error("Invalid http client configuration: {0}")]
    InvalidHttpClientConfig(String),
}
