//! # Bookkeeping Client SDK
//!
//! A typed Rust client for the Bookkeeping API.

use bookkeeping_types::{
    CreateUserRequest, CurrencyCode, LatestExchangeRateResponse, UpdateCustomExchangeRateRequest,
    UserBasicInfo, UserCustomExchangeRateInfoResponse,
};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Bookkeeping API client.
pub struct BookkeepingClient {
    base_url: String,
    http: Client,
}

impl BookkeepingClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Creates a new user.
    pub async fn create_user(
        &self,
        username: &str,
        default_currency: CurrencyCode,
    ) -> Result<UserBasicInfo, ClientError> {
        let req = CreateUserRequest {
            username: username.to_string(),
            default_currency: default_currency.code().to_string(),
        };
        self.post("/api/users", &req).await
    }

    /// Gets a user by uid.
    pub async fn get_user(&self, uid: i64) -> Result<UserBasicInfo, ClientError> {
        self.get(&format!("/api/users/{}", uid)).await
    }

    /// Latest exchange rates from the server's configured data source.
    pub async fn latest_exchange_rates(
        &self,
        uid: i64,
    ) -> Result<LatestExchangeRateResponse, ClientError> {
        self.get(&format!("/api/users/{}/exchange_rates/latest", uid))
            .await
    }

    /// Lists a user's stored custom exchange rates.
    pub async fn list_custom_exchange_rates(
        &self,
        uid: i64,
    ) -> Result<Vec<UserCustomExchangeRateInfoResponse>, ClientError> {
        self.get(&format!("/api/users/{}/exchange_rates/custom", uid))
            .await
    }

    /// Adds or replaces one custom exchange rate.
    ///
    /// `rate` is sent as-is; the server validates it.
    pub async fn update_custom_exchange_rate(
        &self,
        uid: i64,
        currency: CurrencyCode,
        rate: &str,
    ) -> Result<UserCustomExchangeRateInfoResponse, ClientError> {
        let req = UpdateCustomExchangeRateRequest {
            currency: currency.code().to_string(),
            rate: rate.to_string(),
        };
        self.post(&format!("/api/users/{}/exchange_rates/custom", uid), &req)
            .await
    }

    /// Deletes one custom exchange rate.
    pub async fn delete_custom_exchange_rate(
        &self,
        uid: i64,
        currency: CurrencyCode,
    ) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(format!(
                "{}/api/users/{}/exchange_rates/custom/{}",
                self.base_url,
                uid,
                currency.code()
            ))
            .send()
            .await?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(Self::api_error(resp).await)
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        if resp.status().is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            Err(Self::api_error(resp).await)
        }
    }

    async fn api_error(resp: reqwest::Response) -> ClientError {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        ClientError::Api {
            status: status.as_u16(),
            message: error_message(body),
        }
    }
}

/// Pulls `error` out of the server's `{"error", "code"}` body, else the raw body.
fn error_message(body: String) -> String {
    serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = BookkeepingClient::new("http://localhost:3000");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = BookkeepingClient::new("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_error_message_from_api_body() {
        let body = r#"{"error":"User 7 not found","code":404}"#.to_string();
        assert_eq!(error_message(body), "User 7 not found");
    }

    #[test]
    fn test_error_message_falls_back_to_raw_body() {
        assert_eq!(error_message("Bad Gateway".to_string()), "Bad Gateway");
    }
}
