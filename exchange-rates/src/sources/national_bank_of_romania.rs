//! National Bank of Romania reference rates (RON per `multiplier` units).

use chrono_tz::Europe::Bucharest;
use roxmltree::Node;

use crate::parse::{
    body_text, child, elements, is_element, parse_date, parse_positive, parse_xml,
    publication_time, skip_row, structural_error, unit_over_rate,
};
use crate::{
    CurrencyCode, ExchangeRateError, ExchangeRatesDataSource, LatestExchangeRate,
    LatestExchangeRateResponse, RemoteRequest,
};

const DATA_SOURCE: &str = "National Bank of Romania";
const REFERENCE_URL: &str = "https://www.bnr.ro/Exchange-rates-1224.aspx";
const LATEST_URL: &str = "https://www.bnr.ro/nbrfxrates.xml";

#[derive(Debug, Default, Clone, Copy)]
pub struct NationalBankOfRomaniaDataSource;

impl ExchangeRatesDataSource for NationalBankOfRomaniaDataSource {
    fn name(&self) -> &'static str {
        DATA_SOURCE
    }

    fn build_requests(&self) -> Result<Vec<RemoteRequest>, ExchangeRateError> {
        Ok(vec![RemoteRequest::get(LATEST_URL)])
    }

    fn parse(&self, body: &[u8]) -> Result<LatestExchangeRateResponse, ExchangeRateError> {
        let text = body_text(body);
        let doc = parse_xml(&text, DATA_SOURCE)?;

        let body = child(doc.root_element(), "Body")
            .ok_or_else(|| structural_error(DATA_SOURCE, "no Body element"))?;
        let cube = elements(body, "Cube")
            .max_by_key(|c| c.attribute("date").unwrap_or_default())
            .ok_or_else(|| structural_error(DATA_SOURCE, "no Cube element"))?;

        let update_time = cube
            .attribute("date")
            .and_then(|d| parse_date(d, "%Y-%m-%d"))
            .and_then(|d| publication_time(d, 13, 0, Bucharest))
            .ok_or_else(|| structural_error(DATA_SOURCE, "invalid Cube date"))?;

        let exchange_rates = cube
            .children()
            .filter(|n| is_element(n, "Rate"))
            .filter_map(parse_rate)
            .collect();

        Ok(LatestExchangeRateResponse::new(
            DATA_SOURCE,
            REFERENCE_URL,
            update_time,
            CurrencyCode::RON,
            exchange_rates,
        ))
    }
}

fn parse_rate(node: Node<'_, '_>) -> Option<LatestExchangeRate> {
    let code = node.attribute("currency").unwrap_or_default();
    let Some(currency) = CurrencyCode::parse_code(code) else {
        return skip_row(DATA_SOURCE, code, "unknown currency");
    };

    let multiplier = match node.attribute("multiplier") {
        None => Some(1.0),
        Some(m) => parse_positive(m),
    };
    let Some(multiplier) = multiplier else {
        return skip_row(DATA_SOURCE, code, "invalid multiplier");
    };
    let Some(rate) = node.text().and_then(parse_positive) else {
        return skip_row(DATA_SOURCE, code, "invalid rate");
    };

    match unit_over_rate(multiplier, rate) {
        Some(rate) => Some(LatestExchangeRate::new(currency, rate)),
        None => skip_row(DATA_SOURCE, code, "rate out of range"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<LatestExchangeRateResponse, ExchangeRateError> {
        NationalBankOfRomaniaDataSource.parse(body.as_bytes())
    }

    fn feed(cubes: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<DataSet xmlns="http://www.bnr.ro/xsd" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <Header>
    <Publisher>National Bank of Romania</Publisher>
    <PublishingDate>2021-04-01</PublishingDate>
    <MessageType>DR</MessageType>
  </Header>
  <Body>
    <Subject>Reference rates</Subject>
    <OrigCurrency>RON</OrigCurrency>
    {cubes}
  </Body>
</DataSet>"#
        )
    }

    #[test]
    fn test_parse_latest_cube() {
        let body = feed(
            r#"<Cube date="2021-03-31"><Rate currency="USD">2</Rate></Cube>
               <Cube date="2021-04-01">
                 <Rate currency="USD">4</Rate>
                 <Rate currency="HUF" multiplier="100">1.25</Rate>
               </Cube>"#,
        );

        let response = parse(&body).unwrap();

        assert_eq!(response.base_currency, CurrencyCode::RON);
        assert_eq!(response.update_time, 1617271200);
        assert_eq!(response.exchange_rates.len(), 2);
        assert_eq!(response.rate_of(CurrencyCode::USD), Some("0.25"));
        assert_eq!(response.rate_of(CurrencyCode::HUF), Some("80"));
    }

    #[test]
    fn test_missing_body_or_cube_fails() {
        assert_eq!(parse(""), Err(ExchangeRateError::FailedToRequestRemoteApi));
        assert_eq!(
            parse("<DataSet><Header/></DataSet>"),
            Err(ExchangeRateError::FailedToRequestRemoteApi)
        );
        assert_eq!(
            parse(&feed("")),
            Err(ExchangeRateError::FailedToRequestRemoteApi)
        );
    }

    #[test]
    fn test_invalid_rows_are_dropped() {
        let body = feed(
            r#"<Cube date="2021-04-01">
                 <Rate currency="XXX">4</Rate>
                 <Rate currency="USD"></Rate>
                 <Rate currency="EUR">abc</Rate>
                 <Rate currency="GBP">0</Rate>
                 <Rate currency="HUF" multiplier="">1.25</Rate>
                 <Rate currency="JPY" multiplier="0">1.25</Rate>
               </Cube>"#,
        );

        let response = parse(&body).unwrap();
        assert!(response.exchange_rates.is_empty());
    }
}
