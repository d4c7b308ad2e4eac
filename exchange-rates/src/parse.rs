//! Number, time and document helpers shared by the data sources.

use std::borrow::Cow;

use chrono::{NaiveDate, TimeZone};
use chrono_tz::Tz;
use roxmltree::{Document, Node};

use crate::ExchangeRateError;

// ─────────────────────────────────────────────────────────────────────────────
// Numbers
// ─────────────────────────────────────────────────────────────────────────────

/// Parses a plain decimal, accepting only finite values greater than zero.
pub fn parse_positive(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let parsed: f64 = value.parse().ok()?;
    (parsed.is_finite() && parsed > 0.0).then_some(parsed)
}

/// Parses a decimal written with `,` as the decimal separator (`"57,6574"`).
pub fn parse_comma_decimal(value: &str) -> Option<f64> {
    parse_positive(&value.trim().replace(',', "."))
}

/// Parses a decimal written with `,` as thousands separator (`"1,410.5"`).
pub fn parse_grouped(value: &str) -> Option<f64> {
    parse_positive(&value.trim().replace(',', ""))
}

/// Formats a rate using the shortest decimal that round-trips.
pub fn format_rate(rate: f64) -> Option<String> {
    (rate.is_finite() && rate > 0.0).then(|| rate.to_string())
}

/// `unit / rate`, or `None` when the result is not a finite positive number.
pub fn unit_over_rate(unit: f64, rate: f64) -> Option<String> {
    format_rate(unit / rate)
}

pub fn reciprocal(rate: f64) -> Option<String> {
    unit_over_rate(1.0, rate)
}

// ─────────────────────────────────────────────────────────────────────────────
// Time
// ─────────────────────────────────────────────────────────────────────────────

pub fn parse_date(value: &str, format: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), format).ok()
}

/// Combines a publication date with a fixed local time in `tz`.
pub fn publication_time(date: NaiveDate, hour: u32, minute: u32, tz: Tz) -> Option<i64> {
    let naive = date.and_hms_opt(hour, minute, 0)?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp())
}

/// Parses an RFC 3339 timestamp (`2021-04-01T16:00:00+02:00`) into Unix seconds.
pub fn parse_rfc3339(value: &str) -> Option<i64> {
    chrono::DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|dt| dt.timestamp())
}

// ─────────────────────────────────────────────────────────────────────────────
// Documents
// ─────────────────────────────────────────────────────────────────────────────

/// Decodes a response body, dropping a UTF-8 byte order mark.
pub(crate) fn body_text(body: &[u8]) -> Cow<'_, str> {
    let body = body.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(body);
    String::from_utf8_lossy(body)
}

/// Logs a structural failure and returns the generic upstream error.
pub(crate) fn structural_error(data_source: &str, reason: &str) -> ExchangeRateError {
    tracing::error!(data_source, reason, "Failed to parse exchange rates response");
    ExchangeRateError::FailedToRequestRemoteApi
}

/// Logs a dropped row. Always returns `None` so callers can use it in `filter_map`.
pub(crate) fn skip_row<T>(data_source: &str, currency: &str, reason: &str) -> Option<T> {
    tracing::warn!(data_source, currency, reason, "Skipping exchange rate row");
    None
}

pub(crate) fn parse_xml<'i>(
    text: &'i str,
    data_source: &str,
) -> Result<Document<'i>, ExchangeRateError> {
    Document::parse(text.trim()).map_err(|e| structural_error(data_source, &e.to_string()))
}

pub(crate) fn parse_json<T: serde::de::DeserializeOwned>(
    body: &[u8],
    data_source: &str,
) -> Result<T, ExchangeRateError> {
    let body = body.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(body);
    serde_json::from_slice(body).map_err(|e| structural_error(data_source, &e.to_string()))
}

/// Reads a JSON value that may be a number or a numeric string.
pub(crate) fn json_number(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64().filter(|v| v.is_finite() && *v > 0.0),
        serde_json::Value::String(s) => parse_positive(s),
        _ => None,
    }
}

pub(crate) fn is_element(node: &Node<'_, '_>, local_name: &str) -> bool {
    node.is_element() && node.tag_name().name() == local_name
}

/// First direct child element with the given local name.
pub(crate) fn child<'a, 'i>(node: Node<'a, 'i>, local_name: &str) -> Option<Node<'a, 'i>> {
    node.children().find(|n| is_element(n, local_name))
}

/// Trimmed text of the first direct child element with the given local name.
pub(crate) fn child_text<'a>(node: Node<'a, '_>, local_name: &str) -> Option<&'a str> {
    child(node, local_name)
        .and_then(|n| n.text())
        .map(str::trim)
}

/// All descendant elements (including `node`) with the given local name.
pub(crate) fn elements<'a, 'i>(
    node: Node<'a, 'i>,
    local_name: &'a str,
) -> impl Iterator<Item = Node<'a, 'i>> + 'a {
    node.descendants().filter(move |n| is_element(n, local_name))
}
