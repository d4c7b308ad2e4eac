//! National Bank of Ukraine official rates (UAH per 1 foreign unit).

use chrono_tz::Europe::Kiev;
use serde::Deserialize;
use serde_json::Value;

use crate::parse::{
    json_number, parse_date, parse_json, publication_time, reciprocal, skip_row,
    structural_error,
};
use crate::{
    CurrencyCode, ExchangeRateError, ExchangeRatesDataSource, LatestExchangeRate,
    LatestExchangeRateResponse, RemoteRequest,
};

const DATA_SOURCE: &str = "National Bank of Ukraine";
const REFERENCE_URL: &str = "https://bank.gov.ua/en/markets/exchangerates";
const LATEST_URL: &str = "https://bank.gov.ua/NBUStatService/v1/statdirectory/exchange?json";

#[derive(Debug, Deserialize)]
struct ExchangeRow {
    #[serde(default)]
    cc: String,
    #[serde(default)]
    rate: Value,
    #[serde(default)]
    exchangedate: String,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NationalBankOfUkraineDataSource;

impl ExchangeRatesDataSource for NationalBankOfUkraineDataSource {
    fn name(&self) -> &'static str {
        DATA_SOURCE
    }

    fn build_requests(&self) -> Result<Vec<RemoteRequest>, ExchangeRateError> {
        Ok(vec![RemoteRequest::get(LATEST_URL)])
    }

    fn parse(&self, body: &[u8]) -> Result<LatestExchangeRateResponse, ExchangeRateError> {
        let rows: Vec<ExchangeRow> = parse_json(body, DATA_SOURCE)?;
        if rows.is_empty() {
            return Err(structural_error(DATA_SOURCE, "empty response array"));
        }

        let update_time = rows
            .iter()
            .filter_map(|row| parse_date(&row.exchangedate, "%d.%m.%Y"))
            .max()
            .and_then(|d| publication_time(d, 0, 0, Kiev))
            .ok_or_else(|| structural_error(DATA_SOURCE, "no valid exchangedate"))?;

        let exchange_rates = rows.iter().filter_map(parse_rate).collect();

        Ok(LatestExchangeRateResponse::new(
            DATA_SOURCE,
            REFERENCE_URL,
            update_time,
            CurrencyCode::UAH,
            exchange_rates,
        ))
    }
}

fn parse_rate(row: &ExchangeRow) -> Option<LatestExchangeRate> {
    let code = row.cc.as_str();
    let Some(currency) = CurrencyCode::parse_code(code) else {
        return skip_row(DATA_SOURCE, code, "unknown currency");
    };

    let Some(rate) = json_number(&row.rate) else {
        return skip_row(DATA_SOURCE, code, "invalid rate");
    };

    match reciprocal(rate) {
        Some(rate) => Some(LatestExchangeRate::new(currency, rate)),
        None => skip_row(DATA_SOURCE, code, "rate out of range"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<LatestExchangeRateResponse, ExchangeRateError> {
        NationalBankOfUkraineDataSource.parse(body.as_bytes())
    }

    #[test]
    fn test_parse_latest_rates() {
        let body = r#"[
            {"r030": 840, "txt": "US Dollar", "rate": 25, "cc": "USD", "exchangedate": "02.04.2021"},
            {"r030": 978, "txt": "Euro", "rate": 32, "cc": "EUR", "exchangedate": "01.04.2021"}
        ]"#;

        let response = parse(body).unwrap();

        assert_eq!(response.base_currency, CurrencyCode::UAH);
        assert_eq!(response.update_time, 1617310800);
        assert_eq!(response.rate_of(CurrencyCode::USD), Some("0.04"));
        assert_eq!(response.rate_of(CurrencyCode::EUR), Some("0.03125"));
    }

    #[test]
    fn test_missing_root_fails() {
        assert_eq!(parse(""), Err(ExchangeRateError::FailedToRequestRemoteApi));
        assert_eq!(parse("[]"), Err(ExchangeRateError::FailedToRequestRemoteApi));
        assert_eq!(parse("{}"), Err(ExchangeRateError::FailedToRequestRemoteApi));
        assert_eq!(
            parse(r#"[{"cc": "USD", "rate": 25, "exchangedate": ""}]"#),
            Err(ExchangeRateError::FailedToRequestRemoteApi)
        );
    }

    #[test]
    fn test_invalid_rows_are_dropped() {
        let body = r#"[
            {"cc": "XXX", "rate": 25, "exchangedate": "02.04.2021"},
            {"cc": "USD", "rate": "", "exchangedate": "02.04.2021"},
            {"cc": "EUR", "rate": "abc", "exchangedate": "02.04.2021"},
            {"cc": "GBP", "rate": 0, "exchangedate": "02.04.2021"},
            {"cc": "CHF", "rate": -1.5, "exchangedate": "02.04.2021"},
            {"cc": "SEK", "exchangedate": "02.04.2021"}
        ]"#;

        let response = parse(body).unwrap();
        assert!(response.exchange_rates.is_empty());
    }
}
