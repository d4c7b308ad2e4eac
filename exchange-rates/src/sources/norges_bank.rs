//! Norges Bank exchange rates via the SDMX-JSON data API.
//!
//! Series keys are colon-separated indexes into the series dimensions
//! (`"0:12:0:0"`); the `BASE_CUR` dimension names the currency and the
//! `UNIT_MULT` series attribute gives the quoted amount as a power of ten.
//! Observation keys index into the `TIME_PERIOD` dimension.

use std::collections::BTreeMap;

use chrono_tz::Europe::Oslo;
use serde::Deserialize;
use serde_json::Value;

use crate::parse::{
    json_number, parse_date, parse_json, publication_time, skip_row, structural_error,
    unit_over_rate,
};
use crate::{
    CurrencyCode, ExchangeRateError, ExchangeRatesDataSource, LatestExchangeRate,
    LatestExchangeRateResponse, RemoteRequest,
};

const DATA_SOURCE: &str = "Norges Bank";
const REFERENCE_URL: &str = "https://www.norges-bank.no/en/topics/Statistics/exchange_rates/";
const LATEST_URL: &str = "https://data.norges-bank.no/api/data/EXR/B..NOK.SP?format=sdmx-json&lastNObservations=1&locale=en";

const BASE_CURRENCY_DIMENSION: &str = "BASE_CUR";
const TIME_PERIOD_DIMENSION: &str = "TIME_PERIOD";
const UNIT_MULTIPLIER_ATTRIBUTE: &str = "UNIT_MULT";

#[derive(Debug, Deserialize)]
struct SdmxMessage {
    #[serde(default)]
    data: Option<SdmxData>,
}

#[derive(Debug, Deserialize)]
struct SdmxData {
    #[serde(rename = "dataSets", default)]
    data_sets: Vec<DataSet>,
    structure: Structure,
}

#[derive(Debug, Deserialize)]
struct DataSet {
    #[serde(default)]
    series: BTreeMap<String, Series>,
}

#[derive(Debug, Deserialize)]
struct Series {
    #[serde(default)]
    attributes: Vec<Value>,
    #[serde(default)]
    observations: BTreeMap<String, Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct Structure {
    dimensions: Dimensions,
    #[serde(default)]
    attributes: Attributes,
}

#[derive(Debug, Deserialize)]
struct Dimensions {
    #[serde(default)]
    series: Vec<Component>,
    #[serde(default)]
    observation: Vec<Component>,
}

#[derive(Debug, Default, Deserialize)]
struct Attributes {
    #[serde(default)]
    series: Vec<Component>,
}

#[derive(Debug, Deserialize)]
struct Component {
    id: String,
    #[serde(default)]
    values: Vec<ComponentValue>,
}

#[derive(Debug, Deserialize)]
struct ComponentValue {
    #[serde(default)]
    id: String,
}

impl Component {
    fn value_id(&self, index: &str) -> Option<&str> {
        let index: usize = index.parse().ok()?;
        self.values.get(index).map(|v| v.id.as_str())
    }
}

/// Latest observation of one series, before validation.
struct LatestObservation<'a> {
    code: &'a str,
    date: &'a str,
    value: Option<&'a Value>,
    unit_multiplier: i32,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NorgesBankDataSource;

impl ExchangeRatesDataSource for NorgesBankDataSource {
    fn name(&self) -> &'static str {
        DATA_SOURCE
    }

    fn build_requests(&self) -> Result<Vec<RemoteRequest>, ExchangeRateError> {
        Ok(vec![RemoteRequest::get(LATEST_URL)])
    }

    fn parse(&self, body: &[u8]) -> Result<LatestExchangeRateResponse, ExchangeRateError> {
        let message: SdmxMessage = parse_json(body, DATA_SOURCE)?;
        let data = message
            .data
            .ok_or_else(|| structural_error(DATA_SOURCE, "missing data"))?;
        let data_set = data
            .data_sets
            .first()
            .ok_or_else(|| structural_error(DATA_SOURCE, "no data sets"))?;

        let structure = &data.structure;
        let base_position = structure
            .dimensions
            .series
            .iter()
            .position(|d| d.id == BASE_CURRENCY_DIMENSION)
            .ok_or_else(|| structural_error(DATA_SOURCE, "no BASE_CUR dimension"))?;
        let base_dimension = &structure.dimensions.series[base_position];
        let time_dimension = structure
            .dimensions
            .observation
            .iter()
            .find(|d| d.id == TIME_PERIOD_DIMENSION)
            .ok_or_else(|| structural_error(DATA_SOURCE, "no TIME_PERIOD dimension"))?;
        let unit_multiplier = structure
            .attributes
            .series
            .iter()
            .position(|a| a.id == UNIT_MULTIPLIER_ATTRIBUTE)
            .map(|p| (p, &structure.attributes.series[p]));

        let observations: Vec<LatestObservation<'_>> = data_set
            .series
            .iter()
            .filter_map(|(key, series)| {
                let code = key
                    .split(':')
                    .nth(base_position)
                    .and_then(|i| base_dimension.value_id(i))
                    .unwrap_or_default();

                let (date, value) = series
                    .observations
                    .iter()
                    .filter_map(|(i, v)| Some((time_dimension.value_id(i)?, v.first())))
                    .max_by(|a, b| a.0.cmp(b.0))?;

                let unit_multiplier = unit_multiplier
                    .and_then(|(position, attribute)| {
                        let index = series.attributes.get(position)?.as_u64()?;
                        attribute.value_id(&index.to_string())?.parse().ok()
                    })
                    .unwrap_or(0);

                Some(LatestObservation {
                    code,
                    date,
                    value,
                    unit_multiplier,
                })
            })
            .collect();

        let update_time = observations
            .iter()
            .map(|o| o.date)
            .max()
            .and_then(|d| parse_date(d, "%Y-%m-%d"))
            .and_then(|d| publication_time(d, 16, 0, Oslo))
            .ok_or_else(|| structural_error(DATA_SOURCE, "no dated observations"))?;

        let exchange_rates = observations.iter().filter_map(parse_rate).collect();

        Ok(LatestExchangeRateResponse::new(
            DATA_SOURCE,
            REFERENCE_URL,
            update_time,
            CurrencyCode::NOK,
            exchange_rates,
        ))
    }
}

fn parse_rate(observation: &LatestObservation<'_>) -> Option<LatestExchangeRate> {
    let code = observation.code;
    let Some(currency) = CurrencyCode::parse_code(code) else {
        return skip_row(DATA_SOURCE, code, "unknown currency");
    };

    let Some(value) = observation.value.and_then(json_number) else {
        return skip_row(DATA_SOURCE, code, "invalid rate");
    };

    let unit = 10f64.powi(observation.unit_multiplier);
    match unit_over_rate(unit, value) {
        Some(rate) => Some(LatestExchangeRate::new(currency, rate)),
        None => skip_row(DATA_SOURCE, code, "rate out of range"),
    }
}
