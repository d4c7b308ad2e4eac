//! Central Bank of the Republic of Uzbekistan official rates.

use chrono_tz::Asia::Tashkent;
use serde::Deserialize;
use serde_json::Value;

use crate::parse::{
    json_number, parse_date, parse_json, publication_time, skip_row, structural_error,
    unit_over_rate,
};
use crate::{
    CurrencyCode, ExchangeRateError, ExchangeRatesDataSource, LatestExchangeRate,
    LatestExchangeRateResponse, RemoteRequest,
};

const DATA_SOURCE: &str = "Central Bank of the Republic of Uzbekistan";
const REFERENCE_URL: &str = "https://cbu.uz/en/arkhiv-kursov-valyut/";
const LATEST_URL: &str = "https://cbu.uz/en/arkhiv-kursov-valyut/json/";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CurrencyRow {
    #[serde(default)]
    ccy: String,
    #[serde(default)]
    nominal: Value,
    #[serde(default)]
    rate: Value,
    #[serde(default)]
    date: String,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CentralBankOfUzbekistanDataSource;

impl ExchangeRatesDataSource for CentralBankOfUzbekistanDataSource {
    fn name(&self) -> &'static str {
        DATA_SOURCE
    }

    fn build_requests(&self) -> Result<Vec<RemoteRequest>, ExchangeRateError> {
        Ok(vec![RemoteRequest::get(LATEST_URL)])
    }

    fn parse(&self, body: &[u8]) -> Result<LatestExchangeRateResponse, ExchangeRateError> {
        let rows: Vec<CurrencyRow> = parse_json(body, DATA_SOURCE)?;
        if rows.is_empty() {
            return Err(structural_error(DATA_SOURCE, "empty response array"));
        }

        let update_time = rows
            .iter()
            .filter_map(|row| parse_date(&row.date, "%d.%m.%Y"))
            .max()
            .and_then(|d| publication_time(d, 0, 0, Tashkent))
            .ok_or_else(|| structural_error(DATA_SOURCE, "no valid Date"))?;

        let exchange_rates = rows.iter().filter_map(parse_rate).collect();

        Ok(LatestExchangeRateResponse::new(
            DATA_SOURCE,
            REFERENCE_URL,
            update_time,
            CurrencyCode::UZS,
            exchange_rates,
        ))
    }
}

fn parse_rate(row: &CurrencyRow) -> Option<LatestExchangeRate> {
    let code = row.ccy.as_str();
    let Some(currency) = CurrencyCode::parse_code(code) else {
        return skip_row(DATA_SOURCE, code, "unknown currency");
    };

    let Some(nominal) = json_number(&row.nominal) else {
        return skip_row(DATA_SOURCE, code, "invalid nominal");
    };
    let Some(rate) = json_number(&row.rate) else {
        return skip_row(DATA_SOURCE, code, "invalid rate");
    };

    match unit_over_rate(nominal, rate) {
        Some(rate) => Some(LatestExchangeRate::new(currency, rate)),
        None => skip_row(DATA_SOURCE, code, "rate out of range"),
    }
}
