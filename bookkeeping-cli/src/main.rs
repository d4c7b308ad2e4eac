//! Bookkeeping CLI
//!
//! Command-line interface for the Bookkeeping API, plus direct access to
//! the remote exchange rate providers.

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

use bookkeeping_client::BookkeepingClient;
use exchange_rates::{
    CurrencyCode, DataSourceKind, HttpClientConfig, ProxySetting, RemoteExchangeRates,
};

#[derive(Parser)]
#[command(name = "bookkeeping")]
#[command(author, version, about = "Bookkeeping API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Bookkeeping API
    #[arg(
        long,
        env = "BOOKKEEPING_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// User operations
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Exchange rate operations
    Rates {
        #[command(subcommand)]
        action: RatesCommands,
    },
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum UserCommands {
    /// Create a new user
    Create {
        /// Username
        username: String,
        /// Default currency (ISO 4217)
        #[arg(long, default_value = "USD")]
        currency: String,
    },
    /// Get user details
    Get {
        /// User ID
        uid: i64,
    },
}

#[derive(Subcommand)]
enum RatesCommands {
    /// Latest rates from the server's configured data source
    Latest {
        #[arg(long)]
        uid: i64,
    },
    /// Custom exchange rate operations
    Custom {
        #[command(subcommand)]
        action: CustomCommands,
    },
    /// Fetch the latest rates straight from a provider, bypassing the server
    Fetch {
        /// Data source (euro_central_bank, bank_of_canada, ...)
        #[arg(long, env = "EXCHANGE_RATES_DATA_SOURCE")]
        source: String,
        /// Per-request timeout in milliseconds
        #[arg(long, env = "EXCHANGE_RATES_REQUEST_TIMEOUT_MS", default_value = "10000")]
        timeout_ms: u64,
        /// Proxy: "system", "none" or a proxy URL
        #[arg(long, env = "EXCHANGE_RATES_PROXY", default_value = "system")]
        proxy: String,
        /// Accept invalid TLS certificates
        #[arg(long)]
        skip_tls_verification: bool,
    },
    /// List the remote data sources accepted by `fetch`
    Sources,
}

#[derive(Subcommand)]
enum CustomCommands {
    /// List a user's custom rates
    List {
        #[arg(long)]
        uid: i64,
    },
    /// Add or replace a custom rate
    Set {
        #[arg(long)]
        uid: i64,
        #[arg(long)]
        currency: String,
        /// Positive decimal with at most 8 fractional digits
        #[arg(long)]
        rate: String,
    },
    /// Delete a custom rate
    Delete {
        #[arg(long)]
        uid: i64,
        #[arg(long)]
        currency: String,
    },
}

fn parse_currency(s: &str) -> Result<CurrencyCode> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Unknown currency: {}", s))
}

async fn fetch_from_source(
    source: &str,
    timeout_ms: u64,
    proxy: &str,
    skip_tls_verification: bool,
) -> Result<()> {
    let kind: DataSourceKind = source.parse()?;
    let Some(data_source) = kind.data_source() else {
        anyhow::bail!("{} is not a remote data source", kind);
    };

    let config = HttpClientConfig {
        request_timeout: Duration::from_millis(timeout_ms),
        proxy: proxy.parse::<ProxySetting>()?,
        skip_tls_verification,
        ..HttpClientConfig::default()
    };

    let remote = RemoteExchangeRates::new(data_source, &config)?;
    let latest = remote.latest_exchange_rates(0).await?;
    println!("{}", serde_json::to_string_pretty(&latest)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = BookkeepingClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::User { action } => match action {
            UserCommands::Create { username, currency } => {
                let currency = parse_currency(&currency)?;
                let user = client.create_user(&username, currency).await?;
                println!("{}", serde_json::to_string_pretty(&user)?);
            }
            UserCommands::Get { uid } => {
                let user = client.get_user(uid).await?;
                println!("{}", serde_json::to_string_pretty(&user)?);
            }
        },

        Commands::Rates { action } => match action {
            RatesCommands::Latest { uid } => {
                let latest = client.latest_exchange_rates(uid).await?;
                println!("{}", serde_json::to_string_pretty(&latest)?);
            }
            RatesCommands::Custom { action } => match action {
                CustomCommands::List { uid } => {
                    let rates = client.list_custom_exchange_rates(uid).await?;
                    println!("{}", serde_json::to_string_pretty(&rates)?);
                }
                CustomCommands::Set {
                    uid,
                    currency,
                    rate,
                } => {
                    let currency = parse_currency(&currency)?;
                    let saved = client
                        .update_custom_exchange_rate(uid, currency, &rate)
                        .await?;
                    println!("{}", serde_json::to_string_pretty(&saved)?);
                }
                CustomCommands::Delete { uid, currency } => {
                    let currency = parse_currency(&currency)?;
                    client.delete_custom_exchange_rate(uid, currency).await?;
                    println!("✓ Custom exchange rate deleted");
                }
            },
            RatesCommands::Fetch {
                source,
                timeout_ms,
                proxy,
                skip_tls_verification,
            } => {
                fetch_from_source(&source, timeout_ms, &proxy, skip_tls_verification).await?;
            }
            RatesCommands::Sources => {
                for kind in DataSourceKind::REMOTE {
                    println!("{}", kind);
                }
            }
        },
    }

    Ok(())
}
