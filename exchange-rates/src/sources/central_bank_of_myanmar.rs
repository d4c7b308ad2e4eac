//! Central Bank of Myanmar reference rates.
//!
//! Values are MMK per foreign unit, written with thousands separators. A
//! handful of currencies are quoted per 100 units.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::parse::{parse_grouped, parse_json, skip_row, structural_error, unit_over_rate};
use crate::{
    CurrencyCode, ExchangeRateError, ExchangeRatesDataSource, LatestExchangeRate,
    LatestExchangeRateResponse, RemoteRequest,
};

const DATA_SOURCE: &str = "Central Bank of Myanmar";
const REFERENCE_URL: &str = "https://forex.cbm.gov.mm/index.php/fxrate";
const LATEST_URL: &str = "https://forex.cbm.gov.mm/api/latest";

const PER_HUNDRED_CURRENCIES: &[CurrencyCode] = &[
    CurrencyCode::IDR,
    CurrencyCode::JPY,
    CurrencyCode::KHR,
    CurrencyCode::KRW,
    CurrencyCode::LAK,
    CurrencyCode::VND,
];

#[derive(Debug, Deserialize)]
struct LatestRates {
    #[serde(default)]
    timestamp: Value,
    #[serde(default)]
    rates: Option<BTreeMap<String, Value>>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CentralBankOfMyanmarDataSource;

impl ExchangeRatesDataSource for CentralBankOfMyanmarDataSource {
    fn name(&self) -> &'static str {
        DATA_SOURCE
    }

    fn build_requests(&self) -> Result<Vec<RemoteRequest>, ExchangeRateError> {
        // The API rejects requests carrying the default client User-Agent.
        Ok(vec![RemoteRequest::get(LATEST_URL).without_user_agent()])
    }

    fn parse(&self, body: &[u8]) -> Result<LatestExchangeRateResponse, ExchangeRateError> {
        let latest: LatestRates = parse_json(body, DATA_SOURCE)?;

        let update_time = parse_timestamp(&latest.timestamp)
            .ok_or_else(|| structural_error(DATA_SOURCE, "invalid timestamp"))?;
        let rates = latest
            .rates
            .ok_or_else(|| structural_error(DATA_SOURCE, "no rates"))?;

        let exchange_rates = rates
            .iter()
            .filter_map(|(code, value)| parse_rate(code, value))
            .collect();

        Ok(LatestExchangeRateResponse::new(
            DATA_SOURCE,
            REFERENCE_URL,
            update_time,
            CurrencyCode::MMK,
            exchange_rates,
        ))
    }
}

fn parse_timestamp(value: &Value) -> Option<i64> {
    let timestamp = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    timestamp.filter(|t| *t > 0)
}

fn parse_rate(code: &str, value: &Value) -> Option<LatestExchangeRate> {
    let Some(currency) = CurrencyCode::parse_code(code) else {
        return skip_row(DATA_SOURCE, code, "unknown currency");
    };

    let rate = match value {
        Value::String(s) => parse_grouped(s),
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite() && *v > 0.0),
        _ => None,
    };
    let Some(rate) = rate else {
        return skip_row(DATA_SOURCE, code, "invalid rate");
    };

    let unit = if PER_HUNDRED_CURRENCIES.contains(&currency) {
        100.0
    } else {
        1.0
    };

    match unit_over_rate(unit, rate) {
        Some(rate) => Some(LatestExchangeRate::new(currency, rate)),
        None => skip_row(DATA_SOURCE, code, "rate out of range"),
    }
}
