//! # Exchange Rates
//!
//! Latest exchange rates from central banks and other public providers,
//! normalized into one response shape.
//!
//! ## Architecture
//!
//! - `currency` - ISO 4217 allow-list (`CurrencyCode`)
//! - `source` - the `ExchangeRatesDataSource` adapter contract
//! - `sources` - one adapter per provider
//! - `fetch` - HTTP execution of adapter requests and merging of results
//! - `config` - provider selection and HTTP client settings
//!
//! # Example
//! ```no_run
//! use exchange_rates::{DataSourceKind, HttpClientConfig, RemoteExchangeRates};
//!
//! # async fn run() -> Result<(), exchange_rates::ExchangeRateError> {
//! let source = DataSourceKind::EuroCentralBank.data_source().unwrap();
//! let remote = RemoteExchangeRates::new(source, &HttpClientConfig::default())?;
//! let latest = remote.latest_exchange_rates(0).await?;
//! println!("1 {} = {:?} USD", latest.base_currency, latest.rate_of(exchange_rates::CurrencyCode::USD));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod currency;
pub mod error;
pub mod fetch;
pub mod parse;
pub mod response;
pub mod source;
pub mod sources;


pub use config::{
    DEFAULT_REQUEST_TIMEOUT, DEFAULT_USER_AGENT, DataSourceKind, ExchangeRatesConfig,
    HttpClientConfig, ProxySetting,
};
pub use currency::CurrencyCode;
pub use error::ExchangeRateError;
pub use fetch::{RemoteExchangeRates, merge_responses};
pub use response::{LatestExchangeRate, LatestExchangeRateResponse, sort_exchange_rates};
pub use source::{ExchangeRatesDataSource, RemoteRequest, UserAgent};
