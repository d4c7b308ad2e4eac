//! # Bookkeeping Repository
//!
//! Concrete repository implementations (adapters) for the bookkeeping service.
//! This crate provides the database adapter that implements the
//! `UserRepository` and `UserCustomExchangeRateRepository` ports.

#[cfg(not(feature = "sqlite"))]
compile_error!("Enable a repo feature: `sqlite`.");

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "sqlite")]
mod types;


#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepo;

/// The repository selected by the enabled feature.
#[cfg(feature = "sqlite")]
pub type Repo = SqliteRepo;

/// Build and initialize a repository from a database URL.
///
/// This function:
/// 1. Connects to the database
/// 2. Runs migrations to create tables
/// 3. Returns a ready-to-use `Repo`
///
/// # Examples
///
/// ```ignore
/// let repo = build_repo("sqlite://data/bookkeeping.db?mode=rwc").await?;
/// ```
#[cfg(feature = "sqlite")]
pub async fn build_repo(database_url: &str) -> anyhow::Result<Repo> {
    SqliteRepo::new(database_url).await
}
