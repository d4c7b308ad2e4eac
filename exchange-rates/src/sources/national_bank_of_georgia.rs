//! National Bank of Georgia official exchange rates.

use serde::Deserialize;
use serde_json::Value;

use crate::parse::{
    json_number, parse_json, parse_rfc3339, skip_row, structural_error, unit_over_rate,
};
use crate::{
    CurrencyCode, ExchangeRateError, ExchangeRatesDataSource, LatestExchangeRate,
    LatestExchangeRateResponse, RemoteRequest,
};

const DATA_SOURCE: &str = "National Bank of Georgia";
const REFERENCE_URL: &str = "https://nbg.gov.ge/en/monetary-policy/currency";
const LATEST_URL: &str = "https://nbg.gov.ge/gw/api/ct/monetarypolicy/currencies/en/json";

#[derive(Debug, Deserialize)]
struct DailyRates {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    currencies: Option<Vec<CurrencyRow>>,
}

#[derive(Debug, Deserialize)]
struct CurrencyRow {
    #[serde(default)]
    code: String,
    #[serde(default)]
    quantity: Value,
    #[serde(default)]
    rate: Value,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NationalBankOfGeorgiaDataSource;

impl ExchangeRatesDataSource for NationalBankOfGeorgiaDataSource {
    fn name(&self) -> &'static str {
        DATA_SOURCE
    }

    fn build_requests(&self) -> Result<Vec<RemoteRequest>, ExchangeRateError> {
        Ok(vec![RemoteRequest::get(LATEST_URL)])
    }

    fn parse(&self, body: &[u8]) -> Result<LatestExchangeRateResponse, ExchangeRateError> {
        let days: Vec<DailyRates> = parse_json(body, DATA_SOURCE)?;
        let latest = days
            .into_iter()
            .next()
            .ok_or_else(|| structural_error(DATA_SOURCE, "empty response array"))?;

        let update_time = latest
            .date
            .as_deref()
            .and_then(parse_rfc3339)
            .ok_or_else(|| structural_error(DATA_SOURCE, "invalid date"))?;

        let currencies = latest
            .currencies
            .ok_or_else(|| structural_error(DATA_SOURCE, "no currencies"))?;

        let exchange_rates = currencies.iter().filter_map(parse_rate).collect();

        Ok(LatestExchangeRateResponse::new(
            DATA_SOURCE,
            REFERENCE_URL,
            update_time,
            CurrencyCode::GEL,
            exchange_rates,
        ))
    }
}

fn parse_rate(row: &CurrencyRow) -> Option<LatestExchangeRate> {
    let code = row.code.as_str();
    let Some(currency) = CurrencyCode::parse_code(code) else {
        return skip_row(DATA_SOURCE, code, "unknown currency");
    };

    let Some(quantity) = json_number(&row.quantity) else {
        return skip_row(DATA_SOURCE, code, "invalid quantity");
    };
    let Some(rate) = json_number(&row.rate) else {
        return skip_row(DATA_SOURCE, code, "invalid rate");
    };

    match unit_over_rate(quantity, rate) {
        Some(rate) => Some(LatestExchangeRate::new(currency, rate)),
        None => skip_row(DATA_SOURCE, code, "rate out of range"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<LatestExchangeRateResponse, ExchangeRateError> {
        NationalBankOfGeorgiaDataSource.parse(body.as_bytes())
    }

    #[test]
    fn test_parse_latest_rates() {
        let body = r#"[{
            "date": "2021-04-01T00:00:00.000Z",
            "currencies": [
                {"code": "USD", "quantity": 1, "rateFormated": "4.0000", "rate": 4, "name": "US Dollar"},
                {"code": "JPY", "quantity": 100, "rateFormated": "4.0000", "rate": 4, "name": "Japanese Yen"}
            ]
        }]"#;

        let response = parse(body).unwrap();

        assert_eq!(response.base_currency, CurrencyCode::GEL);
        assert_eq!(response.update_time, 1617235200);
        assert_eq!(response.rate_of(CurrencyCode::USD), Some("0.25"));
        assert_eq!(response.rate_of(CurrencyCode::JPY), Some("25"));
    }

    #[test]
    fn test_missing_root_fails() {
        assert_eq!(parse(""), Err(ExchangeRateError::FailedToRequestRemoteApi));
        assert_eq!(parse("[]"), Err(ExchangeRateError::FailedToRequestRemoteApi));
        assert_eq!(parse("{}"), Err(ExchangeRateError::FailedToRequestRemoteApi));
        assert_eq!(
            parse(r#"[{"date": "2021-04-01T00:00:00.000Z"}]"#),
            Err(ExchangeRateError::FailedToRequestRemoteApi)
        );
    }

    #[test]
    fn test_invalid_rows_are_dropped() {
        let body = r#"[{
            "date": "2021-04-01T00:00:00.000Z",
            "currencies": [
                {"code": "XXX", "quantity": 1, "rate": 4},
                {"code": "USD", "quantity": 1, "rate": ""},
                {"code": "EUR", "quantity": 1, "rate": "abc"},
                {"code": "GBP", "quantity": 1, "rate": 0},
                {"code": "JPY", "quantity": 0, "rate": 4},
                {"code": "CHF", "rate": 4}
            ]
        }]"#;

        let response = parse(body).unwrap();
        assert!(response.exchange_rates.is_empty());
    }
}
