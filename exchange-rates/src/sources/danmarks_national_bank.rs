//! Danmarks Nationalbank reference rates, quoted as DKK per 100 foreign units.

use chrono_tz::Europe::Copenhagen;
use roxmltree::Node;

use crate::parse::{
    body_text, elements, is_element, parse_date, parse_positive, parse_xml, publication_time,
    skip_row, structural_error, unit_over_rate,
};
use crate::{
    CurrencyCode, ExchangeRateError, ExchangeRatesDataSource, LatestExchangeRate,
    LatestExchangeRateResponse, RemoteRequest,
};

const DATA_SOURCE: &str = "Danmarks Nationalbank";
const REFERENCE_URL: &str = "https://www.nationalbanken.dk/en/what-we-do/stable-prices-monetary-policy-and-the-danish-economy/exchange-rates";
const LATEST_URL: &str = "https://www.nationalbanken.dk/api/currencyratesxml?lang=en";

const QUOTED_UNITS: f64 = 100.0;

#[derive(Debug, Default, Clone, Copy)]
pub struct DanmarksNationalBankDataSource;

impl ExchangeRatesDataSource for DanmarksNationalBankDataSource {
    fn name(&self) -> &'static str {
        DATA_SOURCE
    }

    fn build_requests(&self) -> Result<Vec<RemoteRequest>, ExchangeRateError> {
        Ok(vec![RemoteRequest::get(LATEST_URL)])
    }

    fn parse(&self, body: &[u8]) -> Result<LatestExchangeRateResponse, ExchangeRateError> {
        let text = body_text(body);
        let doc = parse_xml(&text, DATA_SOURCE)?;

        let daily = elements(doc.root_element(), "dailyrates")
            .next()
            .ok_or_else(|| structural_error(DATA_SOURCE, "no dailyrates element"))?;

        let update_time = daily
            .attribute("id")
            .and_then(|id| parse_date(id, "%Y-%m-%d"))
            .and_then(|d| publication_time(d, 16, 0, Copenhagen))
            .ok_or_else(|| structural_error(DATA_SOURCE, "invalid dailyrates id"))?;

        let exchange_rates = daily
            .children()
            .filter(|n| is_element(n, "currency"))
            .filter_map(parse_rate)
            .collect();

        Ok(LatestExchangeRateResponse::new(
            DATA_SOURCE,
            REFERENCE_URL,
            update_time,
            CurrencyCode::DKK,
            exchange_rates,
        ))
    }
}

fn parse_rate(node: Node<'_, '_>) -> Option<LatestExchangeRate> {
    let code = node.attribute("code").unwrap_or_default();
    let Some(currency) = CurrencyCode::parse_code(code) else {
        return skip_row(DATA_SOURCE, code, "unknown currency");
    };

    let Some(rate) = node.attribute("rate").and_then(parse_positive) else {
        return skip_row(DATA_SOURCE, code, "invalid rate");
    };

    match unit_over_rate(QUOTED_UNITS, rate) {
        Some(rate) => Some(LatestExchangeRate::new(currency, rate)),
        None => skip_row(DATA_SOURCE, code, "rate out of range"),
    }
}
