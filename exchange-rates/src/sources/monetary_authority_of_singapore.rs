//! Monetary Authority of Singapore end-of-day exchange rates.
//!
//! Each record holds one day with a column per currency: `usd_sgd` is SGD
//! per 1 USD, `jpy_sgd_100` is SGD per 100 JPY.

use chrono_tz::Asia::Singapore;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::parse::{
    json_number, parse_date, parse_json, publication_time, skip_row, structural_error,
    unit_over_rate,
};
use crate::{
    CurrencyCode, ExchangeRateError, ExchangeRatesDataSource, LatestExchangeRate,
    LatestExchangeRateResponse, RemoteRequest,
};

const DATA_SOURCE: &str = "Monetary Authority of Singapore";
const REFERENCE_URL: &str = "https://eservices.mas.gov.sg/statistics/msb/exchangerates.aspx";
const LATEST_URL: &str = "https://eservices.mas.gov.sg/api/action/datastore/search.json?resource_id=95932927-c8bc-4e7a-b484-68a66a24edfe&limit=1&sort=end_of_day%20desc";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    result: Option<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    records: Vec<Map<String, Value>>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MonetaryAuthorityOfSingaporeDataSource;

impl ExchangeRatesDataSource for MonetaryAuthorityOfSingaporeDataSource {
    fn name(&self) -> &'static str {
        DATA_SOURCE
    }

    fn build_requests(&self) -> Result<Vec<RemoteRequest>, ExchangeRateError> {
        Ok(vec![RemoteRequest::get(LATEST_URL)])
    }

    fn parse(&self, body: &[u8]) -> Result<LatestExchangeRateResponse, ExchangeRateError> {
        let response: SearchResponse = parse_json(body, DATA_SOURCE)?;
        let records = response
            .result
            .map(|r| r.records)
            .filter(|r| !r.is_empty())
            .ok_or_else(|| structural_error(DATA_SOURCE, "no records"))?;

        let latest = records
            .iter()
            .max_by(|a, b| end_of_day(a).cmp(end_of_day(b)))
            .ok_or_else(|| structural_error(DATA_SOURCE, "no records"))?;

        let update_time = parse_date(end_of_day(latest), "%Y-%m-%d")
            .and_then(|d| publication_time(d, 18, 0, Singapore))
            .ok_or_else(|| structural_error(DATA_SOURCE, "invalid end_of_day"))?;

        let exchange_rates = latest
            .iter()
            .filter_map(|(column, value)| parse_rate(column, value))
            .collect();

        Ok(LatestExchangeRateResponse::new(
            DATA_SOURCE,
            REFERENCE_URL,
            update_time,
            CurrencyCode::SGD,
            exchange_rates,
        ))
    }
}

fn end_of_day(record: &Map<String, Value>) -> &str {
    record
        .get("end_of_day")
        .and_then(Value::as_str)
        .unwrap_or_default()
}

/// Splits a rate column into its currency code and quoted unit.
fn rate_column(column: &str) -> Option<(String, f64)> {
    let (code, unit) = match column.strip_suffix("_sgd_100") {
        Some(code) => (code, 100.0),
        None => (column.strip_suffix("_sgd")?, 1.0),
    };
    Some((code.to_ascii_uppercase(), unit))
}

fn parse_rate(column: &str, value: &Value) -> Option<LatestExchangeRate> {
    let (code, unit) = rate_column(column)?;
    let Some(currency) = CurrencyCode::parse_code(&code) else {
        return skip_row(DATA_SOURCE, &code, "unknown currency");
    };

    let Some(rate) = json_number(value) else {
        return skip_row(DATA_SOURCE, &code, "invalid rate");
    };

    match unit_over_rate(unit, rate) {
        Some(rate) => Some(LatestExchangeRate::new(currency, rate)),
        None => skip_row(DATA_SOURCE, &code, "rate out of range"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<LatestExchangeRateResponse, ExchangeRateError> {
        MonetaryAuthorityOfSingaporeDataSource.parse(body.as_bytes())
    }

    #[test]
    fn test_parse_latest_record() {
        let body = r#"{"success": true, "result": {"limit": 1, "total": "2", "records": [
            {"end_of_day": "2021-03-31", "preliminary": "0", "usd_sgd": "2"},
            {"end_of_day": "2021-04-01", "preliminary": "0", "usd_sgd": "1.25", "jpy_sgd_100": "1.25", "timestamp": "1617271200"}
        ]}}"#;

        let response = parse(body).unwrap();

        assert_eq!(response.base_currency, CurrencyCode::SGD);
        assert_eq!(response.update_time, 1617271200);
        assert_eq!(response.exchange_rates.len(), 2);
        assert_eq!(response.rate_of(CurrencyCode::USD), Some("0.8"));
        assert_eq!(response.rate_of(CurrencyCode::JPY), Some("80"));
    }

    #[test]
    fn test_rate_column() {
        assert_eq!(rate_column("usd_sgd"), Some(("USD".to_string(), 1.0)));
        assert_eq!(rate_column("krw_sgd_100"), Some(("KRW".to_string(), 100.0)));
        assert_eq!(rate_column("end_of_day"), None);
    }

    #[test]
    fn test_missing_records_fails() {
        assert_eq!(parse(""), Err(ExchangeRateError::FailedToRequestRemoteApi));
        assert_eq!(parse("{}"), Err(ExchangeRateError::FailedToRequestRemoteApi));
        assert_eq!(
            parse(r#"{"result": {"records": []}}"#),
            Err(ExchangeRateError::FailedToRequestRemoteApi)
        );
    }

    #[test]
    fn test_invalid_rows_are_dropped() {
        let body = r#"{"result": {"records": [{
            "end_of_day": "2021-04-01",
            "xxx_sgd": "1.25", "usd_sgd": "", "eur_sgd": "abc", "gbp_sgd": "0",
            "jpy_sgd_100": null, "chf_sgd": "-1"
        }]}}"#;

        let response = parse(body).unwrap();
        assert!(response.exchange_rates.is_empty());
    }
}
