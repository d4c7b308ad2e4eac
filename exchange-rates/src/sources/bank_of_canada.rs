//! Bank of Canada daily exchange rates (Valet API).
//!
//! Each series `FX{CCY}CAD` reports CAD per 1 foreign unit; the adapter
//! publishes the reciprocal so rates read "1 CAD = x foreign".

use chrono_tz::America::Toronto;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::parse::{
    json_number, parse_date, parse_json, publication_time, reciprocal, skip_row,
    structural_error,
};
use crate::{
    CurrencyCode, ExchangeRateError, ExchangeRatesDataSource, LatestExchangeRate,
    LatestExchangeRateResponse, RemoteRequest,
};

const DATA_SOURCE: &str = "Bank of Canada";
const REFERENCE_URL: &str = "https://www.bankofcanada.ca/rates/exchange/daily-exchange-rates/";
const LATEST_URL: &str =
    "https://www.bankofcanada.ca/valet/observations/group/FX_RATES_DAILY/json?recent=1";

#[derive(Debug, Deserialize)]
struct ValetResponse {
    #[serde(default)]
    observations: Option<Vec<Map<String, Value>>>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BankOfCanadaDataSource;

impl ExchangeRatesDataSource for BankOfCanadaDataSource {
    fn name(&self) -> &'static str {
        DATA_SOURCE
    }

    fn build_requests(&self) -> Result<Vec<RemoteRequest>, ExchangeRateError> {
        Ok(vec![RemoteRequest::get(LATEST_URL)])
    }

    fn parse(&self, body: &[u8]) -> Result<LatestExchangeRateResponse, ExchangeRateError> {
        let response: ValetResponse = parse_json(body, DATA_SOURCE)?;
        let observations = response
            .observations
            .filter(|o| !o.is_empty())
            .ok_or_else(|| structural_error(DATA_SOURCE, "no observations"))?;

        let latest = observations
            .iter()
            .max_by(|a, b| observation_date(a).cmp(observation_date(b)))
            .ok_or_else(|| structural_error(DATA_SOURCE, "no observations"))?;

        let update_time = parse_date(observation_date(latest), "%Y-%m-%d")
            .and_then(|d| publication_time(d, 16, 30, Toronto))
            .ok_or_else(|| structural_error(DATA_SOURCE, "invalid observation date"))?;

        let exchange_rates = latest
            .iter()
            .filter_map(|(key, value)| {
                let code = key.strip_prefix("FX")?.strip_suffix("CAD")?;
                parse_rate(code, value)
            })
            .collect();

        Ok(LatestExchangeRateResponse::new(
            DATA_SOURCE,
            REFERENCE_URL,
            update_time,
            CurrencyCode::CAD,
            exchange_rates,
        ))
    }
}

fn observation_date(observation: &Map<String, Value>) -> &str {
    observation
        .get("d")
        .and_then(Value::as_str)
        .unwrap_or_default()
}

fn parse_rate(code: &str, value: &Value) -> Option<LatestExchangeRate> {
    let Some(currency) = CurrencyCode::parse_code(code) else {
        return skip_row(DATA_SOURCE, code, "unknown currency");
    };

    let Some(rate) = value.get("v").and_then(json_number) else {
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
        BankOfCanadaDataSource.parse(body.as_bytes())
    }

    #[test]
    fn test_parse_latest_rates() {
        let body = r#"{
            "terms": {"url": "https://www.bankofcanada.ca/terms/"},
            "seriesDetail": {"FXUSDCAD": {"label": "USD/CAD"}},
            "observations": [
                {"d": "2021-03-31", "FXUSDCAD": {"v": "2.0"}},
                {"d": "2021-04-01", "FXUSDCAD": {"v": "1.2565"}, "FXEURCAD": {"v": "1.25"}}
            ]
        }"#;

        let response = parse(body).unwrap();

        assert_eq!(response.base_currency, CurrencyCode::CAD);
        assert_eq!(response.update_time, 1617309000);
        assert_eq!(response.exchange_rates.len(), 2);
        assert_eq!(
            response.rate_of(CurrencyCode::USD),
            Some("0.7958615200955034")
        );
        assert_eq!(response.rate_of(CurrencyCode::EUR), Some("0.8"));
    }

    #[test]
    fn test_missing_observations_fails() {
        assert_eq!(parse(""), Err(ExchangeRateError::FailedToRequestRemoteApi));
        assert_eq!(parse("{}"), Err(ExchangeRateError::FailedToRequestRemoteApi));
        assert_eq!(
            parse(r#"{"observations": []}"#),
            Err(ExchangeRateError::FailedToRequestRemoteApi)
        );
    }

    #[test]
    fn test_invalid_rows_are_dropped() {
        let body = r#"{"observations": [{
            "d": "2021-04-01",
            "FXXXXCAD": {"v": "1.5"},
            "FXUSDCAD": {"v": ""},
            "FXEURCAD": {"v": "abc"},
            "FXGBPCAD": {"v": "0"},
            "FXJPYCAD": {"v": "-1"},
            "FXCHFCAD": {}
        }]}"#;

        let response = parse(body).unwrap();
        assert!(response.exchange_rates.is_empty());
    }
}
