//! Bank of Israel representative exchange rates.

use chrono::NaiveDateTime;
use roxmltree::Node;

use crate::parse::{
    body_text, child_text, elements, parse_positive, parse_rfc3339, parse_xml, skip_row,
    structural_error, unit_over_rate,
};
use crate::{
    CurrencyCode, ExchangeRateError, ExchangeRatesDataSource, LatestExchangeRate,
    LatestExchangeRateResponse, RemoteRequest,
};

const DATA_SOURCE: &str = "Bank of Israel";
const REFERENCE_URL: &str = "https://www.boi.org.il/en/economic-roles/financial-markets/exchange-rates/";
const LATEST_URL: &str = "https://boi.org.il/PublicApi/GetExchangeRates?asXML=true";

#[derive(Debug, Default, Clone, Copy)]
pub struct BankOfIsraelDataSource;

impl ExchangeRatesDataSource for BankOfIsraelDataSource {
    fn name(&self) -> &'static str {
        DATA_SOURCE
    }

    fn build_requests(&self) -> Result<Vec<RemoteRequest>, ExchangeRateError> {
        Ok(vec![RemoteRequest::get(LATEST_URL)])
    }

    fn parse(&self, body: &[u8]) -> Result<LatestExchangeRateResponse, ExchangeRateError> {
        let text = body_text(body);
        let doc = parse_xml(&text, DATA_SOURCE)?;

        let rows: Vec<_> = elements(doc.root_element(), "ExchangeRateResponseDTO").collect();
        if rows.is_empty() {
            return Err(structural_error(DATA_SOURCE, "no ExchangeRateResponseDTO elements"));
        }

        let update_time = rows
            .iter()
            .filter_map(|row| child_text(*row, "LastUpdate").and_then(parse_last_update))
            .max()
            .ok_or_else(|| structural_error(DATA_SOURCE, "no valid LastUpdate"))?;

        let exchange_rates = rows.into_iter().filter_map(parse_rate).collect();

        Ok(LatestExchangeRateResponse::new(
            DATA_SOURCE,
            REFERENCE_URL,
            update_time,
            CurrencyCode::ILS,
            exchange_rates,
        ))
    }
}

/// `LastUpdate` normally carries a `Z` suffix; bare timestamps are read as UTC.
fn parse_last_update(value: &str) -> Option<i64> {
    parse_rfc3339(value).or_else(|| {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|dt| dt.and_utc().timestamp())
    })
}

fn parse_rate(node: Node<'_, '_>) -> Option<LatestExchangeRate> {
    let code = child_text(node, "Key").unwrap_or_default();
    let Some(currency) = CurrencyCode::parse_code(code) else {
        return skip_row(DATA_SOURCE, code, "unknown currency");
    };

    let Some(unit) = child_text(node, "Unit").and_then(parse_positive) else {
        return skip_row(DATA_SOURCE, code, "invalid unit");
    };
    let Some(rate) = child_text(node, "CurrentExchangeRate").and_then(parse_positive) else {
        return skip_row(DATA_SOURCE, code, "invalid rate");
    };

    match unit_over_rate(unit, rate) {
        Some(rate) => Some(LatestExchangeRate::new(currency, rate)),
        None => skip_row(DATA_SOURCE, code, "rate out of range"),
    }
}
