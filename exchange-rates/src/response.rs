//! Normalized exchange rate response shared by every data source.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::CurrencyCode;

/// One currency quoted against the response's base currency.
///
/// `rate` reads as "1 unit of base currency = `rate` units of `currency`".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LatestExchangeRate {
    #[schema(value_type = String, example = "USD")]
    pub currency: CurrencyCode,
    #[schema(example = "1.1746")]
    pub rate: String,
}

impl LatestExchangeRate {
    pub fn new(currency: CurrencyCode, rate: impl Into<String>) -> Self {
        Self {
            currency,
            rate: rate.into(),
        }
    }
}

/// Latest rates published by one data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LatestExchangeRateResponse {
    /// Human readable provider name
    #[schema(example = "European Central Bank")]
    pub data_source: String,
    /// Page describing the published rates
    pub reference_url: String,
    /// Publication time as a Unix timestamp (seconds)
    #[schema(example = 1617285600)]
    pub update_time: i64,
    #[schema(value_type = String, example = "EUR")]
    pub base_currency: CurrencyCode,
    pub exchange_rates: Vec<LatestExchangeRate>,
}

impl LatestExchangeRateResponse {
    pub fn new(
        data_source: impl Into<String>,
        reference_url: impl Into<String>,
        update_time: i64,
        base_currency: CurrencyCode,
        exchange_rates: Vec<LatestExchangeRate>,
    ) -> Self {
        Self {
            data_source: data_source.into(),
            reference_url: reference_url.into(),
            update_time,
            base_currency,
            exchange_rates,
        }
    }

    /// Returns the rate string for `currency`, if present.
    pub fn rate_of(&self, currency: CurrencyCode) -> Option<&str> {
        self.exchange_rates
            .iter()
            .find(|r| r.currency == currency)
            .map(|r| r.rate.as_str())
    }

    /// Sorts the rates ascending by currency code.
    pub fn sort(&mut self) {
        sort_exchange_rates(&mut self.exchange_rates);
    }
}

/// Orders rates lexicographically by currency code.
pub fn sort_exchange_rates(rates: &mut [LatestExchangeRate]) {
    rates.sort_by(|a, b| a.currency.code().cmp(b.currency.code()));
}
