//! Czech National Bank exchange rate fixing.
//!
//! Two plain-text tables are fetched: the daily fixing and the monthly
//! rates of other currencies. Both share the layout
//!
//! ```text
//! 01 Apr 2021 #64
//! Country|Currency|Amount|Code|Rate
//! USA|dollar|1|USD|22.222
//! ```
//!
//! where `Rate` is CZK per `Amount` foreign units.

use chrono_tz::Europe::Prague;

use crate::parse::{
    body_text, parse_comma_decimal, parse_date, publication_time, skip_row, structural_error,
    unit_over_rate,
};
use crate::{
    CurrencyCode, ExchangeRateError, ExchangeRatesDataSource, LatestExchangeRate,
    LatestExchangeRateResponse, RemoteRequest,
};

const DATA_SOURCE: &str = "Czech National Bank";
const REFERENCE_URL: &str = "https://www.cnb.cz/en/financial_markets/foreign_exchange_market/exchange_rate_fixing/";
const DAILY_URL: &str = "https://www.cnb.cz/en/financial_markets/foreign_exchange_market/central_bank_exchange_rate_fixing/central_bank_exchange_rate_fixing/daily.txt";
const OTHER_CURRENCIES_URL: &str = "https://www.cnb.cz/en/financial_markets/foreign_exchange_market/fx_rates_of_other_currencies/fx_rates_of_other_currencies/fx_rates.txt";

const COLUMN_HEADER: &str = "Country|Currency|Amount|Code|Rate";

#[derive(Debug, Default, Clone, Copy)]
pub struct CzechNationalBankDataSource;

impl ExchangeRatesDataSource for CzechNationalBankDataSource {
    fn name(&self) -> &'static str {
        DATA_SOURCE
    }

    fn build_requests(&self) -> Result<Vec<RemoteRequest>, ExchangeRateError> {
        Ok(vec![
            RemoteRequest::get(DAILY_URL),
            RemoteRequest::get(OTHER_CURRENCIES_URL),
        ])
    }

    fn parse(&self, body: &[u8]) -> Result<LatestExchangeRateResponse, ExchangeRateError> {
        let text = body_text(body);
        let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

        let header = lines
            .next()
            .ok_or_else(|| structural_error(DATA_SOURCE, "empty body"))?;
        let update_time = parse_header_date(header)
            .ok_or_else(|| structural_error(DATA_SOURCE, "invalid header line"))?;

        if lines.next() != Some(COLUMN_HEADER) {
            return Err(structural_error(DATA_SOURCE, "missing column header"));
        }

        let exchange_rates = lines.filter_map(parse_rate).collect();

        Ok(LatestExchangeRateResponse::new(
            DATA_SOURCE,
            REFERENCE_URL,
            update_time,
            CurrencyCode::CZK,
            exchange_rates,
        ))
    }
}

/// Reads `01 Apr 2021 #64`. The monthly table has been seen with a numeric
/// `31.03.2021` date as well.
fn parse_header_date(line: &str) -> Option<i64> {
    let date = line.split('#').next()?.trim();
    let date = parse_date(date, "%d %b %Y").or_else(|| parse_date(date, "%d.%m.%Y"))?;
    publication_time(date, 14, 30, Prague)
}

fn parse_rate(line: &str) -> Option<LatestExchangeRate> {
    let fields: Vec<&str> = line.split('|').map(str::trim).collect();
    let [_country, _name, amount, code, rate] = fields[..] else {
        return skip_row(DATA_SOURCE, line, "unexpected column count");
    };

    let Some(currency) = CurrencyCode::parse_code(code) else {
        return skip_row(DATA_SOURCE, code, "unknown currency");
    };
    let Some(amount) = parse_comma_decimal(amount) else {
        return skip_row(DATA_SOURCE, code, "invalid amount");
    };
    let Some(rate) = parse_comma_decimal(rate) else {
        return skip_row(DATA_SOURCE, code, "invalid rate");
    };

    match unit_over_rate(amount, rate) {
        Some(rate) => Some(LatestExchangeRate::new(currency, rate)),
        None => skip_row(DATA_SOURCE, code, "rate out of range"),
    }
}
