//! Repository port traits.
//!
//! Adapters (SQLite, in-memory) implement these traits; the service layer is
//! generic over [`BookkeepingRepository`].

use exchange_rates::CurrencyCode;

use crate::domain::{User, UserCustomExchangeRate};
use crate::error::RepoError;

#[async_trait::async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Stores a new user and returns it with its assigned `uid`.
    ///
    /// Fails with [`RepoError::Conflict`] when the username is taken.
    async fn create_user(
        &self,
        username: &str,
        default_currency: CurrencyCode,
        now: i64,
    ) -> Result<User, RepoError>;

    async fn get_user(&self, uid: i64) -> Result<Option<User>, RepoError>;
}

#[async_trait::async_trait]
pub trait UserCustomExchangeRateRepository: Send + Sync + 'static {
    /// All rows of a user that are not soft-deleted.
    async fn get_all_custom_exchange_rates(
        &self,
        uid: i64,
    ) -> Result<Vec<UserCustomExchangeRate>, RepoError>;

    /// Inserts the row, or overwrites the rate of an existing one.
    ///
    /// A soft-deleted row is revived: `deleted` is cleared and its
    /// `created_unix_time` restarts at `now`.
    async fn upsert_custom_exchange_rate(
        &self,
        uid: i64,
        currency: CurrencyCode,
        rate: i64,
        now: i64,
    ) -> Result<UserCustomExchangeRate, RepoError>;

    /// Soft-deletes a row. Returns `false` when no live row matched.
    async fn delete_custom_exchange_rate(
        &self,
        uid: i64,
        currency: CurrencyCode,
        now: i64,
    ) -> Result<bool, RepoError>;
}

/// Everything the bookkeeping service needs from storage.
pub trait BookkeepingRepository: UserRepository + UserCustomExchangeRateRepository {}

impl<T: UserRepository + UserCustomExchangeRateRepository> BookkeepingRepository for T {}
