//! Exchange Rate Application Service
//!
//! Orchestrates users, custom exchange rates and the configured exchange
//! rates provider through the repository port.

use exchange_rates::{CurrencyCode, LatestExchangeRateResponse};

use bookkeeping_types::{
    AppError, BookkeepingRepository, CreateUserRequest, DomainError, RepoError,
    UpdateCustomExchangeRateRequest, User, UserBasicInfo, UserCustomExchangeRateInfoResponse,
    parse_fixed_point_rate,
};

use crate::ExchangeRatesProvider;
use crate::user_custom::user_custom_exchange_rates;

fn now_unix_time() -> i64 {
    chrono::Utc::now().timestamp()
}

fn parse_currency(value: &str) -> Result<CurrencyCode, DomainError> {
    value
        .parse()
        .map_err(|_| DomainError::InvalidCurrency(value.trim().to_string()))
}

/// Logs a storage failure before it is turned into its generic API form.
fn storage_error(operation: &'static str) -> impl FnOnce(RepoError) -> AppError {
    move |err| {
        if let RepoError::Database(detail) = &err {
            tracing::error!(operation, error = %detail, "Storage operation failed");
        }
        err.into()
    }
}

/// Application service for users and exchange rates.
///
/// Generic over `R: BookkeepingRepository` - the adapter is injected at
/// compile time; the provider is resolved once at startup and injected.
pub struct ExchangeRateService<R: BookkeepingRepository> {
    repo: R,
    provider: ExchangeRatesProvider,
}

impl<R: BookkeepingRepository> ExchangeRateService<R> {
    pub fn new(repo: R, provider: ExchangeRatesProvider) -> Self {
        Self { repo, provider }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn provider(&self) -> &ExchangeRatesProvider {
        &self.provider
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Users
    // ─────────────────────────────────────────────────────────────────────────────

    /// Creates a new user.
    pub async fn create_user(&self, req: CreateUserRequest) -> Result<UserBasicInfo, AppError> {
        let username = User::validate_username(&req.username)?;
        let default_currency = parse_currency(&req.default_currency)?;

        let user = self
            .repo
            .create_user(&username, default_currency, now_unix_time())
            .await
            .map_err(storage_error("create_user"))?;

        tracing::info!(uid = user.uid, "User created");
        Ok(user.to_basic_info())
    }

    /// Gets a user by uid.
    pub async fn get_user(&self, uid: i64) -> Result<UserBasicInfo, AppError> {
        self.find_user(uid).await.map(|user| user.to_basic_info())
    }

    async fn find_user(&self, uid: i64) -> Result<User, AppError> {
        self.repo
            .get_user(uid)
            .await
            .map_err(storage_error("get_user"))?
            .ok_or_else(|| DomainError::UserNotFound(uid).into())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Latest exchange rates
    // ─────────────────────────────────────────────────────────────────────────────

    /// Latest rates from the configured provider.
    ///
    /// Remote providers ignore `uid` beyond logging; the user-custom provider
    /// reads that user's stored rates.
    #[tracing::instrument(skip(self), fields(data_source = self.provider.data_source_name()))]
    pub async fn latest_exchange_rates(
        &self,
        uid: i64,
    ) -> Result<LatestExchangeRateResponse, AppError> {
        match &self.provider {
            ExchangeRatesProvider::Remote(remote) => remote
                .latest_exchange_rates(uid)
                .await
                .map_err(Into::into),
            ExchangeRatesProvider::UserCustom => {
                let user = self.find_user(uid).await?;
                let rows = self
                    .repo
                    .get_all_custom_exchange_rates(uid)
                    .await
                    .map_err(storage_error("get_all_custom_exchange_rates"))?;

                Ok(user_custom_exchange_rates(
                    user.default_currency,
                    &rows,
                    now_unix_time(),
                ))
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Custom exchange rates
    // ─────────────────────────────────────────────────────────────────────────────

    /// Lists a user's stored custom rates, ordered by currency code.
    pub async fn list_custom_exchange_rates(
        &self,
        uid: i64,
    ) -> Result<Vec<UserCustomExchangeRateInfoResponse>, AppError> {
        self.find_user(uid).await?;

        let mut rates: Vec<_> = self
            .repo
            .get_all_custom_exchange_rates(uid)
            .await
            .map_err(storage_error("get_all_custom_exchange_rates"))?
            .iter()
            .map(|row| row.to_info_response())
            .collect();

        rates.sort_by(|a, b| a.currency.code().cmp(b.currency.code()));
        Ok(rates)
    }

    /// Adds or replaces one custom rate.
    #[tracing::instrument(skip(self, req), fields(currency = %req.currency))]
    pub async fn update_custom_exchange_rate(
        &self,
        uid: i64,
        req: UpdateCustomExchangeRateRequest,
    ) -> Result<UserCustomExchangeRateInfoResponse, AppError> {
        let currency = parse_currency(&req.currency)?;
        let rate = parse_fixed_point_rate(&req.rate)?;
        self.find_user(uid).await?;

        let row = self
            .repo
            .upsert_custom_exchange_rate(uid, currency, rate, now_unix_time())
            .await
            .map_err(storage_error("upsert_custom_exchange_rate"))?;

        tracing::info!(rate = row.rate, "Custom exchange rate saved");
        Ok(row.to_info_response())
    }

    /// Soft-deletes one custom rate.
    #[tracing::instrument(skip(self))]
    pub async fn delete_custom_exchange_rate(
        &self,
        uid: i64,
        currency: &str,
    ) -> Result<(), AppError> {
        let currency = parse_currency(currency)?;
        self.find_user(uid).await?;

        let deleted = self
            .repo
            .delete_custom_exchange_rate(uid, currency, now_unix_time())
            .await
            .map_err(storage_error("delete_custom_exchange_rate"))?;

        if !deleted {
            return Err(DomainError::CustomExchangeRateNotFound(currency).into());
        }

        tracing::info!("Custom exchange rate deleted");
        Ok(())
    }
}
