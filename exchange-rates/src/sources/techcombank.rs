//! Techcombank (Vietnam) published exchange rates.
//!
//! The bank lists several rows per currency (by note denomination); only
//! the first valid row of each currency is used. The published rate is the
//! midpoint between the transfer bid and the ask.

use std::collections::HashSet;

use chrono::{NaiveDateTime, TimeZone};
use chrono_tz::Asia::Ho_Chi_Minh;
use serde::Deserialize;
use serde_json::Value;

use crate::parse::{parse_grouped, parse_json, reciprocal, skip_row, structural_error};
use crate::{
    CurrencyCode, ExchangeRateError, ExchangeRatesDataSource, LatestExchangeRate,
    LatestExchangeRateResponse, RemoteRequest,
};

const DATA_SOURCE: &str = "Techcombank";
const REFERENCE_URL: &str = "https://techcombank.com/en/tools/exchange-rates";
const LATEST_URL: &str = "https://techcombank.com/content/techcombank/web/vn/en/cong-cu-tien-ich/ty-gia/_jcr_content.exchange-rates.integration.json";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RatesPage {
    #[serde(default)]
    exchange_rate: Option<RatesTable>,
}

#[derive(Debug, Deserialize)]
struct RatesTable {
    #[serde(default)]
    data: Option<Vec<RateRow>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RateRow {
    #[serde(default)]
    source_currency: String,
    #[serde(default)]
    target_currency: String,
    #[serde(default, rename = "bidRateCK")]
    bid_rate_ck: Value,
    #[serde(default)]
    ask_rate: Value,
    #[serde(default)]
    input_date: String,
    #[serde(default)]
    input_time: String,
}

impl RateRow {
    fn input_time(&self) -> Option<i64> {
        let time = match self.input_time.trim() {
            "" => "00:00:00",
            t => t,
        };
        let naive = NaiveDateTime::parse_from_str(
            &format!("{} {}", self.input_date.trim(), time),
            "%Y-%m-%d %H:%M:%S",
        )
        .ok()?;
        Ho_Chi_Minh
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.timestamp())
    }
}

fn grouped_number(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => parse_grouped(s),
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite() && *v > 0.0),
        _ => None,
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TechcombankDataSource;

impl ExchangeRatesDataSource for TechcombankDataSource {
    fn name(&self) -> &'static str {
        DATA_SOURCE
    }

    fn build_requests(&self) -> Result<Vec<RemoteRequest>, ExchangeRateError> {
        // The site blocks the default client User-Agent.
        Ok(vec![RemoteRequest::get(LATEST_URL).without_user_agent()])
    }

    fn parse(&self, body: &[u8]) -> Result<LatestExchangeRateResponse, ExchangeRateError> {
        let page: RatesPage = parse_json(body, DATA_SOURCE)?;
        let rows = page
            .exchange_rate
            .and_then(|t| t.data)
            .filter(|rows| !rows.is_empty())
            .ok_or_else(|| structural_error(DATA_SOURCE, "no exchange rate rows"))?;

        let update_time = rows
            .iter()
            .filter_map(RateRow::input_time)
            .max()
            .ok_or_else(|| structural_error(DATA_SOURCE, "no valid input date"))?;

        let mut seen = HashSet::new();
        let exchange_rates = rows
            .iter()
            .filter_map(parse_rate)
            .filter(|rate| seen.insert(rate.currency))
            .collect();

        Ok(LatestExchangeRateResponse::new(
            DATA_SOURCE,
            REFERENCE_URL,
            update_time,
            CurrencyCode::VND,
            exchange_rates,
        ))
    }
}

fn parse_rate(row: &RateRow) -> Option<LatestExchangeRate> {
    let code = row.source_currency.trim();
    if row.target_currency.trim() != CurrencyCode::VND.code() {
        return skip_row(DATA_SOURCE, code, "target currency is not VND");
    }
    let Some(currency) = CurrencyCode::parse_code(code) else {
        return skip_row(DATA_SOURCE, code, "unknown currency");
    };

    let Some(bid) = grouped_number(&row.bid_rate_ck) else {
        return skip_row(DATA_SOURCE, code, "invalid bid rate");
    };
    let Some(ask) = grouped_number(&row.ask_rate) else {
        return skip_row(DATA_SOURCE, code, "invalid ask rate");
    };

    match reciprocal((bid + ask) / 2.0) {
        Some(rate) => Some(LatestExchangeRate::new(currency, rate)),
        None => skip_row(DATA_SOURCE, code, "rate out of range"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UserAgent;

    fn parse(body: &str) -> Result<LatestExchangeRateResponse, ExchangeRateError> {
        TechcombankDataSource.parse(body.as_bytes())
    }

    fn row(source: &str, target: &str, bid: &str, ask: &str, time: &str) -> String {
        format!(
            r#"{{"label": "{source}", "sourceCurrency": "{source}", "targetCurrency": "{target}", "bidRateCK": "{bid}", "bidRateTM": "{bid}", "askRate": "{ask}", "inputDate": "2024-06-14", "inputTime": "{time}"}}"#
        )
    }

    fn page(rows: &[String]) -> String {
        format!(r#"{{"exchangeRate": {{"data": [{}]}}}}"#, rows.join(","))
    }

    #[test]
    fn test_parse_first_row_per_currency() {
        let body = page(&[
            row("USD", "VND", "24,000", "26,000", "08:30:00"),
            row("USD", "VND", "1", "1", "08:30:00"),
            row("EUR", "VND", "12,000", "13,000", "08:00:00"),
        ]);

        let response = parse(&body).unwrap();

        assert_eq!(response.base_currency, CurrencyCode::VND);
        assert_eq!(response.update_time, 1718328600);
        assert_eq!(response.exchange_rates.len(), 2);
        assert_eq!(response.rate_of(CurrencyCode::USD), Some("0.00004"));
        assert_eq!(response.rate_of(CurrencyCode::EUR), Some("0.00008"));
    }

    #[test]
    fn test_malformed_first_row_falls_through_to_next() {
        let body = page(&[
            row("USD", "VND", "", "26,000", "08:30:00"),
            row("USD", "VND", "24,000", "26,000", "08:30:00"),
            row("USD", "VND", "1", "1", "08:30:00"),
        ]);

        let response = parse(&body).unwrap();

        assert_eq!(response.exchange_rates.len(), 1);
        assert_eq!(response.rate_of(CurrencyCode::USD), Some("0.00004"));
    }

    #[test]
    fn test_request_omits_user_agent() {
        let requests = TechcombankDataSource.build_requests().unwrap();
        assert_eq!(requests[0].user_agent, UserAgent::Omit);
    }

    #[test]
    fn test_missing_rows_fails() {
        assert_eq!(parse(""), Err(ExchangeRateError::FailedToRequestRemoteApi));
        assert_eq!(parse("{}"), Err(ExchangeRateError::FailedToRequestRemoteApi));
        assert_eq!(
            parse(&page(&[])),
            Err(ExchangeRateError::FailedToRequestRemoteApi)
        );
    }

    #[test]
    fn test_invalid_rows_are_dropped() {
        let body = page(&[
            row("XXX", "VND", "24,000", "26,000", "08:30:00"),
            row("USD", "VND", "", "26,000", "08:30:00"),
            row("EUR", "VND", "abc", "26,000", "08:30:00"),
            row("GBP", "VND", "24,000", "0", "08:30:00"),
            row("JPY", "USD", "24,000", "26,000", "08:30:00"),
        ]);

        let response = parse(&body).unwrap();
        assert!(response.exchange_rates.is_empty());
        assert_eq!(response.update_time, 1718328600);
    }
}
