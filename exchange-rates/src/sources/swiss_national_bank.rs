//! Swiss National Bank exchange rates RSS (RSS 1.0 with the `cb:` extension).
//!
//! Each item carries one `cb:exchangeRate` where `cb:value` CHF buy
//! `10^unit_mult` units of `cb:baseCurrency`.

use chrono_tz::Europe::Zurich;
use roxmltree::Node;

use crate::parse::{
    body_text, child, child_text, elements, parse_date, parse_positive, parse_rfc3339, parse_xml,
    publication_time, skip_row, structural_error, unit_over_rate,
};
use crate::{
    CurrencyCode, ExchangeRateError, ExchangeRatesDataSource, LatestExchangeRate,
    LatestExchangeRateResponse, RemoteRequest,
};

const DATA_SOURCE: &str = "Swiss National Bank";
const REFERENCE_URL: &str = "https://www.snb.ch/en/the-snb/mandates-goals/statistics/statistics-pub/current_interest_exchange_rates";
const LATEST_URL: &str = "https://www.snb.ch/public/en/rss/exchangeRates";

#[derive(Debug, Default, Clone, Copy)]
pub struct SwissNationalBankDataSource;

impl ExchangeRatesDataSource for SwissNationalBankDataSource {
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
            .filter_map(|item| child_text(*item, "date").and_then(parse_item_date))
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
            CurrencyCode::CHF,
            exchange_rates,
        ))
    }
}

/// `dc:date` is a full timestamp; a bare date is taken as 00:00 Zurich time.
fn parse_item_date(value: &str) -> Option<i64> {
    parse_rfc3339(value).or_else(|| {
        parse_date(value, "%Y-%m-%d").and_then(|d| publication_time(d, 0, 0, Zurich))
    })
}

fn parse_rate(node: Node<'_, '_>) -> Option<LatestExchangeRate> {
    let target = child_text(node, "targetCurrency").unwrap_or_default();
    let Some(base) = child(node, "baseCurrency") else {
        return skip_row(DATA_SOURCE, "", "missing base currency");
    };
    let code = base.text().map(str::trim).unwrap_or_default();

    if target != CurrencyCode::CHF.code() {
        return skip_row(DATA_SOURCE, code, "target currency is not CHF");
    }
    let Some(currency) = CurrencyCode::parse_code(code) else {
        return skip_row(DATA_SOURCE, code, "unknown currency");
    };

    let unit_mult = match base.attribute("unit_mult") {
        None => Some(0),
        Some(m) => m.trim().parse::<i32>().ok(),
    };
    let Some(unit_mult) = unit_mult else {
        return skip_row(DATA_SOURCE, code, "invalid unit_mult");
    };
    let Some(value) = child_text(node, "value").and_then(parse_positive) else {
        return skip_row(DATA_SOURCE, code, "invalid rate");
    };

    match unit_over_rate(10f64.powi(unit_mult), value) {
        Some(rate) => Some(LatestExchangeRate::new(currency, rate)),
        None => skip_row(DATA_SOURCE, code, "rate out of range"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<LatestExchangeRateResponse, ExchangeRateError> {
        SwissNationalBankDataSource.parse(body.as_bytes())
    }

    fn item(date: &str, value: &str, base: &str, unit_mult: &str, target: &str) -> String {
        format!(
            r#"<item rdf:about="https://www.snb.ch/en/iabout/stat/statrep/id/current_interest_exchange_rates#{base}">
  <title>CH: {value} {target} = 1 {base} SNB</title>
  <dc:date>{date}</dc:date>
  <cb:statistics>
    <cb:country>CH</cb:country>
    <cb:exchangeRate>
      <cb:value frequency="daily" decimals="4">{value}</cb:value>
      <cb:baseCurrency unit_mult="{unit_mult}">{base}</cb:baseCurrency>
      <cb:targetCurrency>{target}</cb:targetCurrency>
      <cb:rateType>Reference rate at 11 a.m.</cb:rateType>
    </cb:exchangeRate>
  </cb:statistics>
</item>"#
        )
    }

    fn feed(items: &[String]) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns="http://purl.org/rss/1.0/" xmlns:cb="http://www.cbwiki.net/wiki/index.php/Specification_1.2/" xmlns:dc="http://purl.org/dc/elements/1.1/">
  <channel rdf:about="https://www.snb.ch/public/en/rss/exchangeRates"><title>SNB</title></channel>
  {}
</rdf:RDF>"#,
            items.concat()
        )
    }

    #[test]
    fn test_parse_latest_rates() {
        let body = feed(&[
            item("2021-04-01T11:00:00+02:00", "0.8", "USD", "0", "CHF"),
            item("2021-03-31T11:00:00+02:00", "0.8", "JPY", "2", "CHF"),
        ]);

        let response = parse(&body).unwrap();

        assert_eq!(response.base_currency, CurrencyCode::CHF);
        assert_eq!(response.update_time, 1617267600);
        assert_eq!(response.rate_of(CurrencyCode::USD), Some("1.25"));
        assert_eq!(response.rate_of(CurrencyCode::JPY), Some("125"));
    }

    #[test]
    fn test_missing_items_fails() {
        assert_eq!(parse(""), Err(ExchangeRateError::FailedToRequestRemoteApi));
        assert_eq!(
            parse(&feed(&[])),
            Err(ExchangeRateError::FailedToRequestRemoteApi)
        );
    }

    #[test]
    fn test_invalid_rows_are_dropped() {
        let date = "2021-04-01T11:00:00+02:00";
        let body = feed(&[
            item(date, "0.8", "XXX", "0", "CHF"),
            item(date, "", "USD", "0", "CHF"),
            item(date, "abc", "EUR", "0", "CHF"),
            item(date, "0", "GBP", "0", "CHF"),
            item(date, "0.8", "JPY", "x", "CHF"),
            item(date, "0.8", "SEK", "0", "EUR"),
        ]);

        let response = parse(&body).unwrap();
        assert!(response.exchange_rates.is_empty());
        assert_eq!(response.update_time, 1617267600);
    }
}
