//! Reserve Bank of Australia 4pm exchange rates RSS feed.
//!
//! Items quote foreign units per 1 AUD, so values pass through unchanged.

use roxmltree::Node;

use crate::parse::{
    body_text, child, child_text, elements, parse_positive, parse_rfc3339,
    parse_xml, skip_row, structural_error,
};
use crate::{
    CurrencyCode, ExchangeRateError, ExchangeRatesDataSource, LatestExchangeRate,
    LatestExchangeRateResponse, RemoteRequest,
};

const DATA_SOURCE: &str = "Reserve Bank of Australia";
const REFERENCE_URL: &str = "https://www.rba.gov.au/statistics/frequency/exchange-rates.html";
const LATEST_URL: &str = "https://www.rba.gov.au/rss/rss-cb-exchange-rates.xml";

#[derive(Debug, Default, Clone, Copy)]
pub struct ReserveBankOfAustraliaDataSource;

impl ExchangeRatesDataSource for ReserveBankOfAustraliaDataSource {
    fn name(&self) -> &'static str {
        DATA_SOURCE
    }

    fn build_requests(&self) -> Result<Vec<RemoteRequest>, ExchangeRateError> {
        Ok(vec![RemoteRequest::get(LATEST_URL)])
    }

    fn parse(&self, body: &[u8]) -> Result<LatestExchangeRateResponse, ExchangeRateError> {
        let text = body_text(body);
        let doc = parse_xml(&text, DATA_SOURCE)?;

        let items: Vec<_> = elements(doc.root_element(), "item").collect();
        if items.is_empty() {
            return Err(structural_error(DATA_SOURCE, "no item elements"));
        }

        let update_time = items
            .iter()
            .filter_map(|item| child_text(*item, "date").and_then(parse_rfc3339))
            .max()
            .ok_or_else(|| structural_error(DATA_SOURCE, "no valid dc:date"))?;

        let exchange_rates = items
            .iter()
            .filter_map(|item| elements(*item, "exchangeRate").next())
            .filter_map(parse_rate)
            .collect();

        Ok(LatestExchangeRateResponse::new(
            DATA_SOURCE,
            REFERENCE_URL,
            update_time,
            CurrencyCode::AUD,
            exchange_rates,
        ))
    }
}

fn parse_rate(node: Node<'_, '_>) -> Option<LatestExchangeRate> {
    let base = child_text(node, "baseCurrency").unwrap_or_default();
    let code = child_text(node, "targetCurrency").unwrap_or_default();

    if base != CurrencyCode::AUD.code() {
        return skip_row(DATA_SOURCE, code, "base currency is not AUD");
    }
    let Some(currency) = CurrencyCode::parse_code(code) else {
        return skip_row(DATA_SOURCE, code, "unknown currency");
    };

    let rate = child(node, "observation")
        .and_then(|o| child_text(o, "value"))
        .unwrap_or_default()
        .trim();
    if parse_positive(rate).is_none() {
        return skip_row(DATA_SOURCE, code, "invalid rate");
    }

    Some(LatestExchangeRate::new(currency, rate))
}
