//! Magyar Nemzeti Bank (Central Bank of Hungary) SOAP web service.
//!
//! `GetCurrentExchangeRates` answers with a SOAP envelope whose result
//! element carries a second, escaped XML document:
//!
//! ```text
//! <MNBCurrentExchangeRates>
//!   <Day date="2021-04-01"><Rate unit="1" curr="USD">305,12</Rate></Day>
//! </MNBCurrentExchangeRates>
//! ```
//!
//! Rates are HUF per `unit` foreign units with `,` as decimal separator.

use chrono_tz::Europe::Budapest;
use roxmltree::Node;

use crate::parse::{
    body_text, elements, is_element, parse_comma_decimal, parse_date, parse_xml,
    publication_time, skip_row, structural_error, unit_over_rate,
};
use crate::{
    CurrencyCode, ExchangeRateError, ExchangeRatesDataSource, LatestExchangeRate,
    LatestExchangeRateResponse, RemoteRequest,
};

const DATA_SOURCE: &str = "Central Bank of Hungary";
const REFERENCE_URL: &str = "https://www.mnb.hu/en/arfolyamok";
const SERVICE_URL: &str = "http://www.mnb.hu/arfolyamok.asmx";
const SOAP_ACTION: &str = "http://www.mnb.hu/webservices/MNBArfolyamServiceSoap/GetCurrentExchangeRates";

const REQUEST_ENVELOPE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:xsd="http://www.w3.org/2001/XMLSchema" xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <GetCurrentExchangeRates xmlns="http://www.mnb.hu/webservices/" />
  </soap:Body>
</soap:Envelope>"#;

#[derive(Debug, Default, Clone, Copy)]
pub struct CentralBankOfHungaryDataSource;

impl ExchangeRatesDataSource for CentralBankOfHungaryDataSource {
    fn name(&self) -> &'static str {
        DATA_SOURCE
    }

    fn build_requests(&self) -> Result<Vec<RemoteRequest>, ExchangeRateError> {
        Ok(vec![
            RemoteRequest::post(SERVICE_URL, REQUEST_ENVELOPE)
                .header("Content-Type", "text/xml; charset=utf-8")
                .header("SOAPAction", SOAP_ACTION),
        ])
    }

    fn parse(&self, body: &[u8]) -> Result<LatestExchangeRateResponse, ExchangeRateError> {
        let text = body_text(body);
        let envelope = parse_xml(&text, DATA_SOURCE)?;

        let result = elements(envelope.root_element(), "GetCurrentExchangeRatesResult")
            .next()
            .and_then(|n| n.text())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| structural_error(DATA_SOURCE, "missing GetCurrentExchangeRatesResult"))?;

        let doc = parse_xml(result, DATA_SOURCE)?;
        let day = elements(doc.root_element(), "Day")
            .next()
            .ok_or_else(|| structural_error(DATA_SOURCE, "no Day element"))?;

        let update_time = day
            .attribute("date")
            .and_then(|d| parse_date(d, "%Y-%m-%d"))
            .and_then(|d| publication_time(d, 11, 0, Budapest))
            .ok_or_else(|| structural_error(DATA_SOURCE, "invalid Day date"))?;

        let exchange_rates = day
            .children()
            .filter(|n| is_element(n, "Rate"))
            .filter_map(parse_rate)
            .collect();

        Ok(LatestExchangeRateResponse::new(
            DATA_SOURCE,
            REFERENCE_URL,
            update_time,
            CurrencyCode::HUF,
            exchange_rates,
        ))
    }
}

fn parse_rate(node: Node<'_, '_>) -> Option<LatestExchangeRate> {
    let code = node.attribute("curr").unwrap_or_default();
    let Some(currency) = CurrencyCode::parse_code(code) else {
        return skip_row(DATA_SOURCE, code, "unknown currency");
    };

    let Some(unit) = node.attribute("unit").and_then(parse_comma_decimal) else {
        return skip_row(DATA_SOURCE, code, "invalid unit");
    };
    let Some(rate) = node.text().and_then(parse_comma_decimal) else {
        return skip_row(DATA_SOURCE, code, "invalid rate");
    };

    match unit_over_rate(unit, rate) {
        Some(rate) => Some(LatestExchangeRate::new(currency, rate)),
        None => skip_row(DATA_SOURCE, code, "rate out of range"),
    }
}
