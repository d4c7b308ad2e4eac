//! European Central Bank euro foreign exchange reference rates.
//!
//! The daily feed quotes every currency against 1 EUR, so rates are passed
//! through unchanged.

use chrono_tz::Europe::Berlin;
use roxmltree::Node;

use crate::parse::{
    body_text, elements, is_element, parse_date, parse_positive, parse_xml,
    publication_time, skip_row, structural_error,
};
use crate::{
    CurrencyCode, ExchangeRateError, ExchangeRatesDataSource, LatestExchangeRate,
    LatestExchangeRateResponse, RemoteRequest,
};

const DATA_SOURCE: &str = "European Central Bank";
const REFERENCE_URL: &str = "https://www.ecb.europa.eu/stats/policy_and_exchange_rates/euro_reference_exchange_rates/html/index.en.html";
const LATEST_URL: &str = "https://www.ecb.europa.eu/stats/eurofxref/eurofxref-daily.xml";

#[derive(Debug, Default, Clone, Copy)]
pub struct EuroCentralBankDataSource;

impl ExchangeRatesDataSource for EuroCentralBankDataSource {
    fn name(&self) -> &'static str {
        DATA_SOURCE
    }

    fn build_requests(&self) -> Result<Vec<RemoteRequest>, ExchangeRateError> {
        Ok(vec![RemoteRequest::get(LATEST_URL)])
    }

    fn parse(&self, body: &[u8]) -> Result<LatestExchangeRateResponse, ExchangeRateError> {
        let text = body_text(body);
        let doc = parse_xml(&text, DATA_SOURCE)?;

        let daily = elements(doc.root_element(), "Cube")
            .find(|n| n.attribute("time").is_some())
            .ok_or_else(|| structural_error(DATA_SOURCE, "no dated Cube element"))?;

        let update_time = daily
            .attribute("time")
            .and_then(|t| parse_date(t, "%Y-%m-%d"))
            .and_then(|d| publication_time(d, 16, 0, Berlin))
            .ok_or_else(|| structural_error(DATA_SOURCE, "invalid Cube time"))?;

        let exchange_rates = daily
            .children()
            .filter(|n| is_element(n, "Cube"))
            .filter_map(parse_rate)
            .collect();

        Ok(LatestExchangeRateResponse::new(
            DATA_SOURCE,
            REFERENCE_URL,
            update_time,
            CurrencyCode::EUR,
            exchange_rates,
        ))
    }
}

fn parse_rate(node: Node<'_, '_>) -> Option<LatestExchangeRate> {
    let code = node.attribute("currency").unwrap_or_default();
    let Some(currency) = CurrencyCode::parse_code(code) else {
        return skip_row(DATA_SOURCE, code, "unknown currency");
    };

    let raw = node.attribute("rate").unwrap_or_default().trim();
    if parse_positive(raw).is_none() {
        return skip_row(DATA_SOURCE, code, "invalid rate");
    }

    Some(LatestExchangeRate::new(currency, raw))
}
