//! Data source selection and outbound HTTP settings.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::sources::*;
use crate::{ExchangeRateError, ExchangeRatesDataSource};

/// Default `User-Agent` sent to providers that accept one.
pub const DEFAULT_USER_AGENT: &str = concat!("bookkeeping/", env!("CARGO_PKG_VERSION"));

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(10_000);

macro_rules! data_source_kinds {
    ($( $variant:ident => $value:literal => $source:ident ),* $(,)?) => {
        /// Provider selected by configuration.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum DataSourceKind {
            $( $variant, )*
            /// Rates maintained by each user instead of a remote provider.
            UserCustom,
        }

        impl DataSourceKind {
            /// Every remote provider, in configuration order.
            pub const REMOTE: &'static [DataSourceKind] = &[$( DataSourceKind::$variant, )*];

            /// Configuration value (`euro_central_bank`, `user_custom`, ...).
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( DataSourceKind::$variant => $value, )*
                    DataSourceKind::UserCustom => "user_custom",
                }
            }

            /// Builds the adapter for a remote provider. `None` for `UserCustom`.
            pub fn data_source(&self) -> Option<Box<dyn ExchangeRatesDataSource>> {
                match self {
                    $( DataSourceKind::$variant => Some(Box::new($source)), )*
                    DataSourceKind::UserCustom => None,
                }
            }
        }

        impl FromStr for DataSourceKind {
            type Err = ExchangeRateError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $( $value => Ok(DataSourceKind::$variant), )*
                    "user_custom" => Ok(DataSourceKind::UserCustom),
                    other => Err(ExchangeRateError::InvalidExchangeRatesDataSource(
                        other.to_string(),
                    )),
                }
            }
        }
    };
}

data_source_kinds! {
    EuroCentralBank => "euro_central_bank" => EuroCentralBankDataSource,
    BankOfCanada => "bank_of_canada" => BankOfCanadaDataSource,
    BankOfIsrael => "bank_of_israel" => BankOfIsraelDataSource,
    CzechNationalBank => "czech_national_bank" => CzechNationalBankDataSource,
    DanmarksNationalBank => "danmarks_national_bank" => DanmarksNationalBankDataSource,
    NationalBankOfGeorgia => "national_bank_of_georgia" => NationalBankOfGeorgiaDataSource,
    CentralBankOfHungary => "central_bank_of_hungary" => CentralBankOfHungaryDataSource,
    CentralBankOfMyanmar => "central_bank_of_myanmar" => CentralBankOfMyanmarDataSource,
    NorgesBank => "norges_bank" => NorgesBankDataSource,
    NationalBankOfPoland => "national_bank_of_poland" => NationalBankOfPolandDataSource,
    NationalBankOfRomania => "national_bank_of_romania" => NationalBankOfRomaniaDataSource,
    BankOfRussia => "bank_of_russia" => BankOfRussiaDataSource,
    SwissNationalBank => "swiss_national_bank" => SwissNationalBankDataSource,
    NationalBankOfUkraine => "national_bank_of_ukraine" => NationalBankOfUkraineDataSource,
    CentralBankOfUzbekistan => "central_bank_of_uzbekistan" => CentralBankOfUzbekistanDataSource,
    MonetaryAuthorityOfSingapore => "monetary_authority_of_singapore" => MonetaryAuthorityOfSingaporeDataSource,
    InternationalMonetaryFund => "international_monetary_fund" => InternationalMonetaryFundDataSource,
    ReserveBankOfAustralia => "reserve_bank_of_australia" => ReserveBankOfAustraliaDataSource,
    Techcombank => "techcombank" => TechcombankDataSource,
}

impl fmt::Display for DataSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// HTTP client settings
// ─────────────────────────────────────────────────────────────────────────────

/// Proxy used for outbound provider requests.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProxySetting {
    /// Honour `HTTP_PROXY` / `HTTPS_PROXY` from the environment.
    #[default]
    System,
    /// Connect directly.
    None,
    /// Route everything through this proxy URL.
    Url(String),
}

impl FromStr for ProxySetting {
    type Err = ExchangeRateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "system" => Ok(ProxySetting::System),
            "none" => Ok(ProxySetting::None),
            url if url.contains("://") => Ok(ProxySetting::Url(url.to_string())),
            other => Err(ExchangeRateError::InvalidHttpClientConfig(format!(
                "invalid proxy setting: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpClientConfig {
    pub request_timeout: Duration,
    pub proxy: ProxySetting,
    pub skip_tls_verification: bool,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            proxy: ProxySetting::System,
            skip_tls_verification: false,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Everything needed to resolve the exchange rates provider at startup.
///
/// There is no default provider; the data source must always be chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRatesConfig {
    pub data_source: DataSourceKind,
    pub http: HttpClientConfig,
}

impl ExchangeRatesConfig {
    /// `data_source` with the default HTTP client settings.
    pub fn new(data_source: DataSourceKind) -> Self {
        Self {
            data_source,
            http: HttpClientConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_remote_kind() {
        for kind in DataSourceKind::REMOTE {
            let parsed: DataSourceKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, *kind);
            assert!(kind.data_source().is_some());
        }
        assert_eq!(DataSourceKind::REMOTE.len(), 19);
    }

    #[test]
    fn test_user_custom_has_no_remote_source() {
        let kind: DataSourceKind = "user_custom".parse().unwrap();
        assert_eq!(kind, DataSourceKind::UserCustom);
        assert!(kind.data_source().is_none());
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        assert_eq!(
            "".parse::<DataSourceKind>(),
            Err(ExchangeRateError::InvalidExchangeRatesDataSource(String::new()))
        );
        assert_eq!(
            "federal_reserve".parse::<DataSourceKind>(),
            Err(ExchangeRateError::InvalidExchangeRatesDataSource(
                "federal_reserve".to_string()
            ))
        );
    }

    #[test]
    fn test_data_source_names() {
        let source = DataSourceKind::CentralBankOfUzbekistan.data_source().unwrap();
        assert_eq!(source.name(), "Central Bank of the Republic of Uzbekistan");
        let source = DataSourceKind::EuroCentralBank.data_source().unwrap();
        assert_eq!(source.name(), "European Central Bank");
    }

    #[test]
    fn test_proxy_setting() {
        assert_eq!("system".parse::<ProxySetting>().unwrap(), ProxySetting::System);
        assert_eq!("none".parse::<ProxySetting>().unwrap(), ProxySetting::None);
        assert_eq!(
            "http://127.0.0.1:8080".parse::<ProxySetting>().unwrap(),
            ProxySetting::Url("http://127.0.0.1:8080".to_string())
        );
        assert!("proxy.local".parse::<ProxySetting>().is_err());
    }

    #[test]
    fn test_default_http_config() {
        let config = HttpClientConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert!(!config.skip_tls_verification);
        assert!(config.user_agent.starts_with("bookkeeping/"));
    }
}
