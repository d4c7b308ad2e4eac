//! Narodowy Bank Polski average rates, tables A and B.
//!
//! Table A (major currencies) is published every business day, table B
//! (remaining currencies) weekly. Both are fetched and merged.

use chrono_tz::Europe::Warsaw;
use roxmltree::Node;

use crate::parse::{
    body_text, child, child_text, elements, is_element, parse_date, parse_positive, parse_xml,
    publication_time, reciprocal, skip_row, structural_error,
};
use crate::{
    CurrencyCode, ExchangeRateError, ExchangeRatesDataSource, LatestExchangeRate,
    LatestExchangeRateResponse, RemoteRequest,
};

const DATA_SOURCE: &str = "National Bank of Poland";
const REFERENCE_URL: &str = "https://www.nbp.pl/homen.aspx?f=/kursy/kursyen.htm";
const TABLE_A_URL: &str = "https://api.nbp.pl/api/exchangerates/tables/A?format=xml";
const TABLE_B_URL: &str = "https://api.nbp.pl/api/exchangerates/tables/B?format=xml";

#[derive(Debug, Default, Clone, Copy)]
pub struct NationalBankOfPolandDataSource;

impl ExchangeRatesDataSource for NationalBankOfPolandDataSource {
    fn name(&self) -> &'static str {
        DATA_SOURCE
    }

    fn build_requests(&self) -> Result<Vec<RemoteRequest>, ExchangeRateError> {
        Ok(vec![
            RemoteRequest::get(TABLE_A_URL),
            RemoteRequest::get(TABLE_B_URL),
        ])
    }

    fn parse(&self, body: &[u8]) -> Result<LatestExchangeRateResponse, ExchangeRateError> {
        let text = body_text(body);
        let doc = parse_xml(&text, DATA_SOURCE)?;

        let table = elements(doc.root_element(), "ExchangeRatesTable")
            .max_by_key(|t| child_text(*t, "EffectiveDate").unwrap_or_default())
            .ok_or_else(|| structural_error(DATA_SOURCE, "no ExchangeRatesTable element"))?;

        let update_time = child_text(table, "EffectiveDate")
            .and_then(|d| parse_date(d, "%Y-%m-%d"))
            .and_then(|d| publication_time(d, 12, 15, Warsaw))
            .ok_or_else(|| structural_error(DATA_SOURCE, "invalid EffectiveDate"))?;

        let rates = child(table, "Rates")
            .ok_or_else(|| structural_error(DATA_SOURCE, "no Rates element"))?;

        let exchange_rates = rates
            .children()
            .filter(|n| is_element(n, "Rate"))
            .filter_map(parse_rate)
            .collect();

        Ok(LatestExchangeRateResponse::new(
            DATA_SOURCE,
            REFERENCE_URL,
            update_time,
            CurrencyCode::PLN,
            exchange_rates,
        ))
    }
}

fn parse_rate(node: Node<'_, '_>) -> Option<LatestExchangeRate> {
    let code = child_text(node, "Code").unwrap_or_default();
    let Some(currency) = CurrencyCode::parse_code(code) else {
        return skip_row(DATA_SOURCE, code, "unknown currency");
    };

    let Some(mid) = child_text(node, "Mid").and_then(parse_positive) else {
        return skip_row(DATA_SOURCE, code, "invalid rate");
    };

    match reciprocal(mid) {
        Some(rate) => Some(LatestExchangeRate::new(currency, rate)),
        None => skip_row(DATA_SOURCE, code, "rate out of range"),
    }
}
