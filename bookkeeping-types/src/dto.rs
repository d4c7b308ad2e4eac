//! Data Transfer Objects (DTOs) for requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use exchange_rates::CurrencyCode;

// ─────────────────────────────────────────────────────────────────────────────
// User DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[schema(example = "alice")]
    pub username: String,
    /// Three-letter code, checked against the currency allow-list
    #[serde(default = "default_currency")]
    #[schema(example = "USD")]
    pub default_currency: String,
}

fn default_currency() -> String {
    CurrencyCode::USD.code().to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Custom exchange rate DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to add or replace one custom exchange rate.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateCustomExchangeRateRequest {
    /// Three-letter code, checked against the currency allow-list
    #[schema(example = "JPY")]
    pub currency: String,
    /// Positive decimal with at most 8 fractional digits
    #[schema(example = "150.25")]
    pub rate: String,
}

/// One stored custom exchange rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserCustomExchangeRateInfoResponse {
    pub currency: CurrencyCode,
    #[schema(example = "150.25")]
    pub rate: String,
    #[schema(example = 1617280200)]
    pub update_time: i64,
}
