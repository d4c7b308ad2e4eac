//! Latest exchange rates built from a user's own stored rates.

use exchange_rates::parse::format_rate;
use exchange_rates::{CurrencyCode, LatestExchangeRate, LatestExchangeRateResponse};

use bookkeeping_types::UserCustomExchangeRate;

pub const USER_CUSTOM_DATA_SOURCE: &str = "User Custom";

/// Converts stored rows into a response based on `default_currency`.
///
/// Every other currency is divided by the default currency's stored rate.
/// Without a row for the default currency nothing can be converted, so only
/// the default currency itself (always `"1"`) is returned. The update time
/// is the newest row's `updated_unix_time`, or `now` when there are no rows.
pub fn user_custom_exchange_rates(
    default_currency: CurrencyCode,
    rows: &[UserCustomExchangeRate],
    now: i64,
) -> LatestExchangeRateResponse {
    let rows: Vec<&UserCustomExchangeRate> = rows.iter().filter(|row| !row.deleted).collect();

    let default_rate = rows
        .iter()
        .find(|row| row.currency == default_currency)
        .map(|row| row.rate);

    let mut exchange_rates: Vec<LatestExchangeRate> = match default_rate {
        Some(default_rate) => rows
            .iter()
            .filter(|row| row.currency != default_currency)
            .filter_map(|row| {
                let rate = format_rate(row.rate as f64 / default_rate as f64);
                if rate.is_none() {
                    tracing::warn!(
                        currency = %row.currency,
                        rate = row.rate,
                        default_rate,
                        "Skipping custom exchange rate"
                    );
                }
                rate.map(|rate| LatestExchangeRate::new(row.currency, rate))
            })
            .collect(),
        None => {
            if !rows.is_empty() {
                tracing::warn!(
                    currency = %default_currency,
                    "No custom exchange rate for the default currency"
                );
            }
            Vec::new()
        }
    };

    exchange_rates.push(LatestExchangeRate::new(default_currency, "1"));

    let update_time = rows
        .iter()
        .map(|row| row.updated_unix_time)
        .max()
        .unwrap_or(now);

    let mut response = LatestExchangeRateResponse::new(
        USER_CUSTOM_DATA_SOURCE,
        "",
        update_time,
        default_currency,
        exchange_rates,
    );
    response.sort();
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(currency: CurrencyCode, rate: i64, updated_unix_time: i64) -> UserCustomExchangeRate {
        UserCustomExchangeRate {
            uid: 1,
            currency,
            rate,
            created_unix_time: 0,
            updated_unix_time,
            deleted: false,
            deleted_unix_time: 0,
        }
    }

    fn pairs(response: &LatestExchangeRateResponse) -> Vec<(&'static str, &str)> {
        response
            .exchange_rates
            .iter()
            .map(|r| (r.currency.code(), r.rate.as_str()))
            .collect()
    }

    #[test]
    fn test_rates_relative_to_default_currency() {
        let response = user_custom_exchange_rates(
            CurrencyCode::USD,
            &[
                row(CurrencyCode::JPY, 15_000_000_000, 30),
                row(CurrencyCode::USD, 200_000_000, 10),
                row(CurrencyCode::EUR, 100_000_000, 20),
            ],
            99,
        );

        assert_eq!(response.data_source, "User Custom");
        assert_eq!(response.reference_url, "");
        assert_eq!(response.base_currency, CurrencyCode::USD);
        assert_eq!(response.update_time, 30);
        assert_eq!(
            pairs(&response),
            vec![("EUR", "0.5"), ("JPY", "75"), ("USD", "1")]
        );
    }

    #[test]
    fn test_default_rate_is_one_regardless_of_stored_value() {
        let response = user_custom_exchange_rates(
            CurrencyCode::EUR,
            &[row(CurrencyCode::EUR, 725_000_000, 5)],
            99,
        );

        assert_eq!(pairs(&response), vec![("EUR", "1")]);
    }

    #[test]
    fn test_missing_default_row_skips_all_conversions() {
        let response = user_custom_exchange_rates(
            CurrencyCode::EUR,
            &[
                row(CurrencyCode::USD, 110_000_000, 40),
                row(CurrencyCode::GBP, 90_000_000, 50),
            ],
            99,
        );

        assert_eq!(pairs(&response), vec![("EUR", "1")]);
        assert_eq!(response.update_time, 50);
    }

    #[test]
    fn test_no_rows_uses_now() {
        let response = user_custom_exchange_rates(CurrencyCode::CNY, &[], 1_700_000_000);

        assert_eq!(pairs(&response), vec![("CNY", "1")]);
        assert_eq!(response.update_time, 1_700_000_000);
    }

    #[test]
    fn test_deleted_rows_are_ignored() {
        let mut deleted = row(CurrencyCode::USD, 100_000_000, 500);
        deleted.deleted = true;

        let response = user_custom_exchange_rates(
            CurrencyCode::USD,
            &[deleted, row(CurrencyCode::EUR, 100_000_000, 7)],
            99,
        );

        assert_eq!(pairs(&response), vec![("USD", "1")]);
        assert_eq!(response.update_time, 7);
    }
}
