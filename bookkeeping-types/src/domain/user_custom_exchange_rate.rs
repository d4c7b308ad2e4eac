//! User-entered exchange rates stored as fixed-point integers.

use serde::{Deserialize, Serialize};

use exchange_rates::CurrencyCode;

use crate::dto::UserCustomExchangeRateInfoResponse;
use crate::error::DomainError;

/// Stored rates are scaled by this factor.
pub const FIXED_POINT_SCALE: i64 = 100_000_000;

const FRACTION_DIGITS: usize = 8;

/// One custom rate row. Deleted rows keep their data and are only flagged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCustomExchangeRate {
    pub uid: i64,
    pub currency: CurrencyCode,
    /// Fixed-point rate, see [`FIXED_POINT_SCALE`].
    pub rate: i64,
    pub created_unix_time: i64,
    pub updated_unix_time: i64,
    pub deleted: bool,
    pub deleted_unix_time: i64,
}

impl UserCustomExchangeRate {
    pub fn to_info_response(&self) -> UserCustomExchangeRateInfoResponse {
        UserCustomExchangeRateInfoResponse {
            currency: self.currency,
            rate: format_fixed_point_rate(self.rate),
            update_time: self.updated_unix_time,
        }
    }
}

/// Parses a decimal such as `"7.25"` into its fixed-point value
/// (`725_000_000`) without going through a float.
///
/// # Validation
/// - Plain digits with an optional `.` and at most 8 fractional digits
/// - Result must be greater than zero and fit in an `i64`
pub fn parse_fixed_point_rate(value: &str) -> Result<i64, DomainError> {
    let invalid = || DomainError::InvalidExchangeRate(value.to_string());

    let trimmed = value.trim();
    let (integer, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));

    if integer.is_empty()
        || fraction.len() > FRACTION_DIGITS
        || !integer.bytes().all(|b| b.is_ascii_digit())
        || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    let integer: i64 = integer.parse().map_err(|_| invalid())?;
    let fraction: i64 = format!("{:0<width$}", fraction, width = FRACTION_DIGITS)
        .parse()
        .map_err(|_| invalid())?;

    let rate = integer
        .checked_mul(FIXED_POINT_SCALE)
        .and_then(|v| v.checked_add(fraction))
        .ok_or_else(invalid)?;

    if rate <= 0 {
        return Err(invalid());
    }

    Ok(rate)
}

/// Formats a fixed-point rate with trailing fractional zeros removed.
pub fn format_fixed_point_rate(rate: i64) -> String {
    let sign = if rate < 0 { "-" } else { "" };
    let abs = rate.unsigned_abs();
    let scale = FIXED_POINT_SCALE.unsigned_abs();
    let (integer, fraction) = (abs / scale, abs % scale);

    if fraction == 0 {
        return format!("{sign}{integer}");
    }

    let fraction = format!("{:0width$}", fraction, width = FRACTION_DIGITS);
    format!("{sign}{integer}.{}", fraction.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fixed_point_rate() {
        assert_eq!(parse_fixed_point_rate("7.25").unwrap(), 725_000_000);
        assert_eq!(parse_fixed_point_rate(" 1 ").unwrap(), 100_000_000);
        assert_eq!(parse_fixed_point_rate("0.00000001").unwrap(), 1);
        assert_eq!(parse_fixed_point_rate("150.").unwrap(), 15_000_000_000);
    }

    #[test]
    fn test_parse_fixed_point_rate_rejects_invalid() {
        for value in [
            "", "0", "0.0", "-1", "+1", ".5", "1.123456789", "1,5", "1e3", "abc",
            "99999999999999999999",
        ] {
            assert!(
                matches!(
                    parse_fixed_point_rate(value),
                    Err(DomainError::InvalidExchangeRate(_))
                ),
                "{value:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_format_fixed_point_rate() {
        assert_eq!(format_fixed_point_rate(725_000_000), "7.25");
        assert_eq!(format_fixed_point_rate(100_000_000), "1");
        assert_eq!(format_fixed_point_rate(1), "0.00000001");
        assert_eq!(format_fixed_point_rate(12_345_678_912), "123.45678912");
        assert_eq!(format_fixed_point_rate(0), "0");
    }

    #[test]
    fn test_format_then_parse_is_stable() {
        for rate in [1, 50_000_000, 725_000_000, 15_000_000_000] {
            assert_eq!(
                parse_fixed_point_rate(&format_fixed_point_rate(rate)).unwrap(),
                rate
            );
        }
    }

    #[test]
    fn test_info_response() {
        let row = UserCustomExchangeRate {
            uid: 1,
            currency: CurrencyCode::JPY,
            rate: 15_000_000_000,
            created_unix_time: 10,
            updated_unix_time: 20,
            deleted: false,
            deleted_unix_time: 0,
        };

        let info = row.to_info_response();

        assert_eq!(info.currency, CurrencyCode::JPY);
        assert_eq!(info.rate, "150");
        assert_eq!(info.update_time, 20);
    }
}
