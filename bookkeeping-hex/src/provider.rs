//! Exchange rates provider container.

use exchange_rates::{ExchangeRateError, ExchangeRatesConfig, RemoteExchangeRates};

use crate::user_custom::USER_CUSTOM_DATA_SOURCE;

/// The provider selected by configuration.
///
/// Built once by [`ExchangeRatesProvider::initialize`] and owned by the
/// service; there is no process-wide instance.
pub enum ExchangeRatesProvider {
    /// A central bank or other remote feed.
    Remote(RemoteExchangeRates),
    /// Each user's own stored rates.
    UserCustom,
}

impl ExchangeRatesProvider {
    pub fn initialize(config: &ExchangeRatesConfig) -> Result<Self, ExchangeRateError> {
        let provider = match config.data_source.data_source() {
            Some(source) => Self::Remote(RemoteExchangeRates::new(source, &config.http)?),
            None => Self::UserCustom,
        };

        tracing::info!(
            data_source = provider.data_source_name(),
            "Exchange rates provider initialized"
        );
        Ok(provider)
    }

    pub fn data_source_name(&self) -> &'static str {
        match self {
            Self::Remote(remote) => remote.data_source_name(),
            Self::UserCustom => USER_CUSTOM_DATA_SOURCE,
        }
    }
}
