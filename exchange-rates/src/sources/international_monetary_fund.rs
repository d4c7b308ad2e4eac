//! International Monetary Fund SDR valuation table ("rms_five", TSV flavour).
//!
//! The document holds several tab-separated sections. Only "Currency units
//! per SDR" is used: one row per currency name, one column per day, newest
//! first. Every rate is re-based on the U.S. dollar column value so the
//! response reads "1 USD = x currency".

use chrono::NaiveDate;

use crate::parse::{body_text, parse_grouped, skip_row, structural_error, unit_over_rate};
use crate::{
    CurrencyCode, ExchangeRateError, ExchangeRatesDataSource, LatestExchangeRate,
    LatestExchangeRateResponse, RemoteRequest,
};

const DATA_SOURCE: &str = "International Monetary Fund";
const REFERENCE_URL: &str = "https://www.imf.org/external/np/fin/data/rms_five.aspx";
const LATEST_URL: &str = "https://www.imf.org/external/np/fin/data/rms_five.aspx?tsvflag=Y";

const SECTION_TITLE: &str = "Currency units per SDR";
const HEADER_PREFIX: &str = "Currency\t";

/// Currency names as printed by the IMF.
const CURRENCY_NAMES: &[(&str, CurrencyCode)] = &[
    ("Algerian dinar", CurrencyCode::DZD),
    ("Australian dollar", CurrencyCode::AUD),
    ("Bahrain dinar", CurrencyCode::BHD),
    ("Botswana pula", CurrencyCode::BWP),
    ("Brazilian real", CurrencyCode::BRL),
    ("Brunei dollar", CurrencyCode::BND),
    ("Canadian dollar", CurrencyCode::CAD),
    ("Chilean peso", CurrencyCode::CLP),
    ("Chinese yuan", CurrencyCode::CNY),
    ("Colombian peso", CurrencyCode::COP),
    ("Czech koruna", CurrencyCode::CZK),
    ("Danish krone", CurrencyCode::DKK),
    ("Euro", CurrencyCode::EUR),
    ("Hungarian forint", CurrencyCode::HUF),
    ("Icelandic krona", CurrencyCode::ISK),
    ("Indian rupee", CurrencyCode::INR),
    ("Indonesian rupiah", CurrencyCode::IDR),
    ("Iranian rial", CurrencyCode::IRR),
    ("Israeli New Shekel", CurrencyCode::ILS),
    ("Japanese yen", CurrencyCode::JPY),
    ("Kazakhstani tenge", CurrencyCode::KZT),
    ("Korean won", CurrencyCode::KRW),
    ("Kuwaiti dinar", CurrencyCode::KWD),
    ("Libyan dinar", CurrencyCode::LYD),
    ("Malaysian ringgit", CurrencyCode::MYR),
    ("Mauritian rupee", CurrencyCode::MUR),
    ("Mexican peso", CurrencyCode::MXN),
    ("Nepalese rupee", CurrencyCode::NPR),
    ("New Zealand dollar", CurrencyCode::NZD),
    ("Norwegian krone", CurrencyCode::NOK),
    ("Omani rial", CurrencyCode::OMR),
    ("Pakistani rupee", CurrencyCode::PKR),
    ("Peruvian sol", CurrencyCode::PEN),
    ("Philippine peso", CurrencyCode::PHP),
    ("Polish zloty", CurrencyCode::PLN),
    ("Qatari riyal", CurrencyCode::QAR),
    ("Russian ruble", CurrencyCode::RUB),
    ("Saudi Arabian riyal", CurrencyCode::SAR),
    ("Singapore dollar", CurrencyCode::SGD),
    ("South African rand", CurrencyCode::ZAR),
    ("Sri Lankan rupee", CurrencyCode::LKR),
    ("Swedish krona", CurrencyCode::SEK),
    ("Swiss franc", CurrencyCode::CHF),
    ("Thai baht", CurrencyCode::THB),
    ("Trinidadian dollar", CurrencyCode::TTD),
    ("Tunisian dinar", CurrencyCode::TND),
    ("U.A.E. dirham", CurrencyCode::AED),
    ("U.K. pound", CurrencyCode::GBP),
    ("U.S. dollar", CurrencyCode::USD),
    ("Uruguayan peso", CurrencyCode::UYU),
];

fn currency_by_name(name: &str) -> Option<CurrencyCode> {
    CURRENCY_NAMES
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, c)| *c)
}

/// One row of the section: the currency name and its raw column values.
struct Row<'a> {
    name: &'a str,
    values: Vec<&'a str>,
}

impl Row<'_> {
    fn value(&self, column: usize) -> Option<f64> {
        let value = self.values.get(column)?.trim();
        if value.eq_ignore_ascii_case("NA") {
            return None;
        }
        parse_grouped(value)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct InternationalMonetaryFundDataSource;

impl ExchangeRatesDataSource for InternationalMonetaryFundDataSource {
    fn name(&self) -> &'static str {
        DATA_SOURCE
    }

    fn build_requests(&self) -> Result<Vec<RemoteRequest>, ExchangeRateError> {
        Ok(vec![RemoteRequest::get(LATEST_URL)])
    }

    fn parse(&self, body: &[u8]) -> Result<LatestExchangeRateResponse, ExchangeRateError> {
        let text = body_text(body);
        let mut lines = text
            .lines()
            .skip_while(|l| !l.trim_start().starts_with(SECTION_TITLE))
            .skip(1);

        let header = lines
            .find(|l| l.starts_with(HEADER_PREFIX))
            .ok_or_else(|| structural_error(DATA_SOURCE, "missing units per SDR section"))?;
        let dates: Vec<Option<NaiveDate>> = header
            .split('\t')
            .skip(1)
            .map(|d| NaiveDate::parse_from_str(d.trim(), "%B %d, %Y").ok())
            .collect();

        let rows: Vec<Row<'_>> = lines
            .take_while(|l| !l.trim().is_empty() && !l.starts_with('('))
            .filter_map(|l| {
                let mut fields = l.split('\t');
                let name = fields.next()?.trim();
                Some(Row {
                    name,
                    values: fields.collect(),
                })
            })
            .collect();

        let usd_row = rows
            .iter()
            .find(|r| currency_by_name(r.name) == Some(CurrencyCode::USD))
            .ok_or_else(|| structural_error(DATA_SOURCE, "missing U.S. dollar row"))?;

        // Newest dated column that has a U.S. dollar value.
        let (column, date, usd_units) = dates
            .iter()
            .enumerate()
            .filter_map(|(i, d)| Some((i, (*d)?, usd_row.value(i)?)))
            .max_by_key(|(_, d, _)| *d)
            .ok_or_else(|| structural_error(DATA_SOURCE, "no U.S. dollar value"))?;

        let update_time = date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp())
            .ok_or_else(|| structural_error(DATA_SOURCE, "invalid column date"))?;

        let exchange_rates = rows
            .iter()
            .filter_map(|row| parse_rate(row, column, usd_units))
            .collect();

        Ok(LatestExchangeRateResponse::new(
            DATA_SOURCE,
            REFERENCE_URL,
            update_time,
            CurrencyCode::USD,
            exchange_rates,
        ))
    }
}

fn parse_rate(row: &Row<'_>, column: usize, usd_units: f64) -> Option<LatestExchangeRate> {
    let Some(currency) = currency_by_name(row.name) else {
        return skip_row(DATA_SOURCE, row.name, "unknown currency name");
    };
    let Some(units) = row.value(column) else {
        return skip_row(DATA_SOURCE, currency.code(), "invalid rate");
    };

    match unit_over_rate(units, usd_units) {
        Some(rate) => Some(LatestExchangeRate::new(currency, rate)),
        None => skip_row(DATA_SOURCE, currency.code(), "rate out of range"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<LatestExchangeRateResponse, ExchangeRateError> {
        InternationalMonetaryFundDataSource.parse(body.as_bytes())
    }

    fn document(section: &str) -> String {
        format!(
            "Representative Exchange Rates for Selected Currencies for April 2021\n\
             \n\
             Currency\tApril 01, 2021\tMarch 31, 2021\n\
             Euro\t0.5\t0.5\n\
             \n\
             SDRs per Currency unit and Currency units per SDR (1)\n\
             last five days\n\
             \n\
             SDRs per Currency unit (2)\n\
             \n\
             Currency\tApril 01, 2021\tMarch 31, 2021\n\
             U.S. dollar\t0.8\t0.8\n\
             \n\
             {section}\n\
             (1) Exchange rates are published daily except on IMF holidays.\n"
        )
    }

    #[test]
    fn test_parse_latest_column() {
        let body = document(
            "Currency units per SDR(3)\n\
             \n\
             Currency\tApril 01, 2021\tMarch 31, 2021\n\
             Euro\t1.000000\t2.000000\n\
             Japanese yen\t125.000000\tNA\n\
             U.S. dollar\t1.250000\t1.000000\n\
             Korean won\t1,250.000000\t1,000.000000\n",
        );

        let response = parse(&body).unwrap();

        assert_eq!(response.base_currency, CurrencyCode::USD);
        assert_eq!(response.update_time, 1617235200);
        assert_eq!(response.rate_of(CurrencyCode::EUR), Some("0.8"));
        assert_eq!(response.rate_of(CurrencyCode::JPY), Some("100"));
        assert_eq!(response.rate_of(CurrencyCode::KRW), Some("1000"));
        assert_eq!(response.rate_of(CurrencyCode::USD), Some("1"));
    }

    #[test]
    fn test_falls_back_to_newest_column_with_dollar_value() {
        let body = document(
            "Currency units per SDR(3)\n\
             \n\
             Currency\tApril 01, 2021\tMarch 31, 2021\n\
             Euro\t1.000000\t0.500000\n\
             U.S. dollar\tNA\t1.000000\n",
        );

        let response = parse(&body).unwrap();

        assert_eq!(response.update_time, 1617148800);
        assert_eq!(response.rate_of(CurrencyCode::EUR), Some("0.5"));
    }

    #[test]
    fn test_missing_section_or_dollar_fails() {
        assert_eq!(parse(""), Err(ExchangeRateError::FailedToRequestRemoteApi));
        assert_eq!(
            parse(&document("")),
            Err(ExchangeRateError::FailedToRequestRemoteApi)
        );
        assert_eq!(
            parse(&document(
                "Currency units per SDR(3)\n\nCurrency\tApril 01, 2021\nEuro\t1.000000\n"
            )),
            Err(ExchangeRateError::FailedToRequestRemoteApi)
        );
        assert_eq!(
            parse(&document(
                "Currency units per SDR(3)\n\nCurrency\tApril 01, 2021\nU.S. dollar\tNA\n"
            )),
            Err(ExchangeRateError::FailedToRequestRemoteApi)
        );
    }

    #[test]
    fn test_invalid_rows_are_dropped() {
        let body = document(
            "Currency units per SDR(3)\n\
             \n\
             Currency\tApril 01, 2021\n\
             Atlantean drachma\t1.000000\n\
             Euro\t\n\
             Japanese yen\tabc\n\
             Swiss franc\t0\n\
             Swedish krona\tNA\n\
             U.S. dollar\t1.250000\n",
        );

        let response = parse(&body).unwrap();
        assert_eq!(response.exchange_rates.len(), 1);
        assert_eq!(response.rate_of(CurrencyCode::USD), Some("1"));
    }
}
