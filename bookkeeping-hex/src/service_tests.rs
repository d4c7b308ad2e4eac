//! ExchangeRateService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use axum::{Router, http::StatusCode, routing::get};

    use bookkeeping_types::{
        AppError, CreateUserRequest, CurrencyCode, RepoError, UpdateCustomExchangeRateRequest,
        User, UserCustomExchangeRate, UserCustomExchangeRateRepository, UserRepository,
    };
    use exchange_rates::{
        ExchangeRateError, ExchangeRatesDataSource, HttpClientConfig, LatestExchangeRateResponse,
        ProxySetting, RemoteExchangeRates, RemoteRequest,
    };

    use crate::{ExchangeRateService, ExchangeRatesProvider};

    /// Simple in-memory repository for testing the service layer.
    pub struct MockRepo {
        users: Mutex<Vec<User>>,
        rates: Mutex<HashMap<(i64, CurrencyCode), UserCustomExchangeRate>>,
        fail_storage: bool,
    }

    impl MockRepo {
        pub fn new() -> Self {
            Self {
                users: Mutex::new(Vec::new()),
                rates: Mutex::new(HashMap::new()),
                fail_storage: false,
            }
        }

        pub fn failing() -> Self {
            Self {
                fail_storage: true,
                ..Self::new()
            }
        }

        fn check(&self) -> Result<(), RepoError> {
            if self.fail_storage {
                return Err(RepoError::Database("disk I/O error".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl UserRepository for MockRepo {
        async fn create_user(
            &self,
            username: &str,
            default_currency: CurrencyCode,
            now: i64,
        ) -> Result<User, RepoError> {
            self.check()?;
            let mut users = self.users.lock().unwrap();
            if users.iter().any(|u| u.username == username) {
                return Err(RepoError::Conflict(format!(
                    "Username already exists: {}",
                    username
                )));
            }
            let user = User {
                uid: users.len() as i64 + 1,
                username: username.to_string(),
                default_currency,
                created_unix_time: now,
                updated_unix_time: now,
            };
            users.push(user.clone());
            Ok(user)
        }

        async fn get_user(&self, uid: i64) -> Result<Option<User>, RepoError> {
            self.check()?;
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.uid == uid)
                .cloned())
        }
    }

    #[async_trait]
    impl UserCustomExchangeRateRepository for MockRepo {
        async fn get_all_custom_exchange_rates(
            &self,
            uid: i64,
        ) -> Result<Vec<UserCustomExchangeRate>, RepoError> {
            self.check()?;
            Ok(self
                .rates
                .lock()
                .unwrap()
                .values()
                .filter(|r| r.uid == uid && !r.deleted)
                .cloned()
                .collect())
        }

        async fn upsert_custom_exchange_rate(
            &self,
            uid: i64,
            currency: CurrencyCode,
            rate: i64,
            now: i64,
        ) -> Result<UserCustomExchangeRate, RepoError> {
            self.check()?;
            let mut rates = self.rates.lock().unwrap();
            let row = rates
                .entry((uid, currency))
                .or_insert_with(|| UserCustomExchangeRate {
                    uid,
                    currency,
                    rate,
                    created_unix_time: now,
                    updated_unix_time: now,
                    deleted: false,
                    deleted_unix_time: 0,
                });
            if row.deleted {
                row.created_unix_time = now;
            }
            row.rate = rate;
            row.updated_unix_time = now;
            row.deleted = false;
            row.deleted_unix_time = 0;
            Ok(row.clone())
        }

        async fn delete_custom_exchange_rate(
            &self,
            uid: i64,
            currency: CurrencyCode,
            now: i64,
        ) -> Result<bool, RepoError> {
            self.check()?;
            match self.rates.lock().unwrap().get_mut(&(uid, currency)) {
                Some(row) if !row.deleted => {
                    row.deleted = true;
                    row.deleted_unix_time = now;
                    Ok(true)
                }
                _ => Ok(false),
            }
        }
    }

    fn user_custom_service(repo: MockRepo) -> ExchangeRateService<MockRepo> {
        ExchangeRateService::new(repo, ExchangeRatesProvider::UserCustom)
    }

    async fn create_alice(service: &ExchangeRateService<MockRepo>, currency: &str) -> i64 {
        service
            .create_user(CreateUserRequest {
                username: "alice".into(),
                default_currency: currency.into(),
            })
            .await
            .unwrap()
            .uid
    }

    async fn set_rate(
        service: &ExchangeRateService<MockRepo>,
        uid: i64,
        currency: &str,
        rate: &str,
    ) -> Result<bookkeeping_types::UserCustomExchangeRateInfoResponse, AppError> {
        service
            .update_custom_exchange_rate(
                uid,
                UpdateCustomExchangeRateRequest {
                    currency: currency.into(),
                    rate: rate.into(),
                },
            )
            .await
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Users
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_create_and_get_user() {
        let service = user_custom_service(MockRepo::new());

        let uid = create_alice(&service, "eur").await;
        let user = service.get_user(uid).await.unwrap();

        assert_eq!(user.username, "alice");
        assert_eq!(user.default_currency, CurrencyCode::EUR);
    }

    #[tokio::test]
    async fn test_create_user_rejects_unknown_currency() {
        let service = user_custom_service(MockRepo::new());

        let result = service
            .create_user(CreateUserRequest {
                username: "alice".into(),
                default_currency: "XYZ".into(),
            })
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_duplicate_user_conflicts() {
        let service = user_custom_service(MockRepo::new());
        create_alice(&service, "USD").await;

        let result = service
            .create_user(CreateUserRequest {
                username: "alice".into(),
                default_currency: "USD".into(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let service = user_custom_service(MockRepo::new());

        assert!(matches!(
            service.get_user(9).await,
            Err(AppError::NotFound(_))
        ));
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Custom exchange rates
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_update_and_list_custom_rates() {
        let service = user_custom_service(MockRepo::new());
        let uid = create_alice(&service, "USD").await;

        set_rate(&service, uid, "jpy", "150.25").await.unwrap();
        set_rate(&service, uid, "EUR", "0.9").await.unwrap();
        let updated = set_rate(&service, uid, "EUR", "0.92").await.unwrap();
        assert_eq!(updated.rate, "0.92");

        let rates = service.list_custom_exchange_rates(uid).await.unwrap();
        let listed: Vec<_> = rates
            .iter()
            .map(|r| (r.currency, r.rate.as_str()))
            .collect();
        assert_eq!(
            listed,
            vec![(CurrencyCode::EUR, "0.92"), (CurrencyCode::JPY, "150.25")]
        );
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_input() {
        let service = user_custom_service(MockRepo::new());
        let uid = create_alice(&service, "USD").await;

        for (currency, rate) in [("XYZ", "1"), ("EUR", "0"), ("EUR", "-1"), ("EUR", "abc")] {
            assert!(
                matches!(
                    set_rate(&service, uid, currency, rate).await,
                    Err(AppError::BadRequest(_))
                ),
                "{currency} {rate} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_update_for_missing_user() {
        let service = user_custom_service(MockRepo::new());

        assert!(matches!(
            set_rate(&service, 5, "EUR", "1").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_custom_rate() {
        let service = user_custom_service(MockRepo::new());
        let uid = create_alice(&service, "USD").await;
        set_rate(&service, uid, "EUR", "0.9").await.unwrap();

        service.delete_custom_exchange_rate(uid, "EUR").await.unwrap();

        assert!(service.list_custom_exchange_rates(uid).await.unwrap().is_empty());
        assert!(matches!(
            service.delete_custom_exchange_rate(uid, "EUR").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_then_update_revives() {
        let service = user_custom_service(MockRepo::new());
        let uid = create_alice(&service, "USD").await;
        set_rate(&service, uid, "EUR", "0.9").await.unwrap();
        service.delete_custom_exchange_rate(uid, "EUR").await.unwrap();

        set_rate(&service, uid, "EUR", "0.95").await.unwrap();

        let rates = service.list_custom_exchange_rates(uid).await.unwrap();
        assert_eq!(rates.len(), 1);
        assert_eq!(rates[0].rate, "0.95");
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Latest exchange rates
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_user_custom_latest_rates() {
        let service = user_custom_service(MockRepo::new());
        let uid = create_alice(&service, "USD").await;
        set_rate(&service, uid, "USD", "2").await.unwrap();
        set_rate(&service, uid, "EUR", "1").await.unwrap();

        let response = service.latest_exchange_rates(uid).await.unwrap();

        assert_eq!(response.data_source, "User Custom");
        assert_eq!(response.base_currency, CurrencyCode::USD);
        assert_eq!(response.rate_of(CurrencyCode::EUR), Some("0.5"));
        assert_eq!(response.rate_of(CurrencyCode::USD), Some("1"));
    }

    #[tokio::test]
    async fn test_user_custom_latest_rates_for_missing_user() {
        let service = user_custom_service(MockRepo::new());

        assert!(matches!(
            service.latest_exchange_rates(1).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_storage_failure_is_operation_failed() {
        let service = user_custom_service(MockRepo::failing());

        assert!(matches!(
            service.latest_exchange_rates(1).await,
            Err(AppError::OperationFailed)
        ));
    }

    /// Remote source whose single request goes to a local server.
    struct LocalDataSource {
        url: String,
    }

    impl ExchangeRatesDataSource for LocalDataSource {
        fn name(&self) -> &'static str {
            "Local Bank"
        }

        fn build_requests(&self) -> Result<Vec<RemoteRequest>, ExchangeRateError> {
            Ok(vec![RemoteRequest::get(self.url.clone())])
        }

        fn parse(&self, body: &[u8]) -> Result<LatestExchangeRateResponse, ExchangeRateError> {
            serde_json::from_slice(body).map_err(|_| ExchangeRateError::FailedToRequestRemoteApi)
        }
    }

    async fn remote_service(path: &str) -> ExchangeRateService<MockRepo> {
        let app = Router::new()
            .route(
                "/rates",
                get(|| async {
                    r#"{"dataSource":"Local Bank","referenceUrl":"","updateTime":1617285600,
                        "baseCurrency":"EUR","exchangeRates":[
                        {"currency":"USD","rate":"1.1746"},{"currency":"CNY","rate":"7.7195"}]}"#
                }),
            )
            .route("/down", get(|| async { StatusCode::SERVICE_UNAVAILABLE }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let config = HttpClientConfig {
            proxy: ProxySetting::None,
            ..HttpClientConfig::default()
        };
        let remote = RemoteExchangeRates::new(
            Box::new(LocalDataSource {
                url: format!("http://{addr}{path}"),
            }),
            &config,
        )
        .unwrap();

        ExchangeRateService::new(MockRepo::new(), ExchangeRatesProvider::Remote(remote))
    }

    #[tokio::test]
    async fn test_remote_latest_rates() {
        let service = remote_service("/rates").await;

        let response = service.latest_exchange_rates(1).await.unwrap();

        assert_eq!(response.base_currency, CurrencyCode::EUR);
        let codes: Vec<_> = response
            .exchange_rates
            .iter()
            .map(|r| r.currency.code())
            .collect();
        assert_eq!(codes, vec!["CNY", "USD"]);
    }

    #[tokio::test]
    async fn test_remote_failure_is_upstream_failed() {
        let service = remote_service("/down").await;

        assert!(matches!(
            service.latest_exchange_rates(1).await,
            Err(AppError::UpstreamFailed)
        ));
    }
}
