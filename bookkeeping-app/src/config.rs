//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use exchange_rates::{DataSourceKind, ExchangeRatesConfig, ProxySetting};

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub exchange_rates: ExchangeRatesConfig,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let exchange_rates = exchange_rates_config(|key| env::var(key).ok())?;

        Ok(Self {
            port,
            database_url,
            exchange_rates,
        })
    }
}

/// Reads the `EXCHANGE_RATES_*` settings through `lookup`.
fn exchange_rates_config(
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<ExchangeRatesConfig> {
    let data_source: DataSourceKind = lookup("EXCHANGE_RATES_DATA_SOURCE")
        .ok_or_else(|| {
            anyhow::anyhow!("EXCHANGE_RATES_DATA_SOURCE environment variable is required")
        })?
        .parse()?;

    let mut config = ExchangeRatesConfig::new(data_source);
    let http = &mut config.http;

    if let Some(timeout) = lookup("EXCHANGE_RATES_REQUEST_TIMEOUT_MS") {
        let millis: u64 = timeout.trim().parse().map_err(|_| {
            anyhow::anyhow!("EXCHANGE_RATES_REQUEST_TIMEOUT_MS must be a number of milliseconds")
        })?;
        http.request_timeout = Duration::from_millis(millis);
    }

    if let Some(proxy) = lookup("EXCHANGE_RATES_PROXY") {
        http.proxy = proxy.parse::<ProxySetting>()?;
    }

    if let Some(skip) = lookup("EXCHANGE_RATES_SKIP_TLS_VERIFICATION") {
        http.skip_tls_verification = match skip.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => true,
            "0" | "false" | "no" | "" => false,
            other => anyhow::bail!("Invalid EXCHANGE_RATES_SKIP_TLS_VERIFICATION: {}", other),
        };
    }

    Ok(config)
}
