//! Bank of Russia official daily rates (RUB per `Nominal` units).

use chrono_tz::Europe::Moscow;
use roxmltree::Node;

use crate::parse::{
    body_text, child_text, elements, is_element, parse_comma_decimal, parse_date, parse_xml,
    publication_time, skip_row, structural_error, unit_over_rate,
};
use crate::{
    CurrencyCode, ExchangeRateError, ExchangeRatesDataSource, LatestExchangeRate,
    LatestExchangeRateResponse, RemoteRequest,
};

const DATA_SOURCE: &str = "Bank of Russia";
const REFERENCE_URL: &str = "https://www.cbr.ru/eng/currency_base/daily/";
const LATEST_URL: &str = "https://www.cbr.ru/scripts/XML_daily_eng.asp";

#[derive(Debug, Default, Clone, Copy)]
pub struct BankOfRussiaDataSource;

impl ExchangeRatesDataSource for BankOfRussiaDataSource {
    fn name(&self) -> &'static str {
        DATA_SOURCE
    }

    fn build_requests(&self) -> Result<Vec<RemoteRequest>, ExchangeRateError> {
        Ok(vec![RemoteRequest::get(LATEST_URL)])
    }

    fn parse(&self, body: &[u8]) -> Result<LatestExchangeRateResponse, ExchangeRateError> {
        // The feed declares windows-1251; the English edition is plain ASCII.
        let text = body_text(body);
        let doc = parse_xml(&text, DATA_SOURCE)?;

        let root = elements(doc.root_element(), "ValCurs")
            .next()
            .ok_or_else(|| structural_error(DATA_SOURCE, "no ValCurs element"))?;

        let update_time = root
            .attribute("Date")
            .and_then(|d| parse_date(d, "%d.%m.%Y"))
            .and_then(|d| publication_time(d, 0, 0, Moscow))
            .ok_or_else(|| structural_error(DATA_SOURCE, "invalid ValCurs date"))?;

        let exchange_rates = root
            .children()
            .filter(|n| is_element(n, "Valute"))
            .filter_map(parse_rate)
            .collect();

        Ok(LatestExchangeRateResponse::new(
            DATA_SOURCE,
            REFERENCE_URL,
            update_time,
            CurrencyCode::RUB,
            exchange_rates,
        ))
    }
}

fn parse_rate(node: Node<'_, '_>) -> Option<LatestExchangeRate> {
    let code = child_text(node, "CharCode").unwrap_or_default();
    let Some(currency) = CurrencyCode::parse_code(code) else {
        return skip_row(DATA_SOURCE, code, "unknown currency");
    };

    let Some(nominal) = child_text(node, "Nominal").and_then(parse_comma_decimal) else {
        return skip_row(DATA_SOURCE, code, "invalid nominal");
    };
    let Some(value) = child_text(node, "Value").and_then(parse_comma_decimal) else {
        return skip_row(DATA_SOURCE, code, "invalid rate");
    };

    match unit_over_rate(nominal, value) {
        Some(rate) => Some(LatestExchangeRate::new(currency, rate)),
        None => skip_row(DATA_SOURCE, code, "rate out of range"),
    }
}
