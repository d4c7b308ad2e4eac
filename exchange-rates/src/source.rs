//! Data source adapter contract.

use reqwest::Method;

use crate::{ExchangeRateError, LatestExchangeRateResponse};

/// Whether the fetch wrapper should send its default `User-Agent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserAgent {
    #[default]
    Default,
    /// Send no `User-Agent` header at all.
    Omit,
}

/// One outbound request built by a data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub user_agent: UserAgent,
}

impl RemoteRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            user_agent: UserAgent::Default,
        }
    }

    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            headers: Vec::new(),
            body: Some(body.into()),
            user_agent: UserAgent::Default,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn without_user_agent(mut self) -> Self {
        self.user_agent = UserAgent::Omit;
        self
    }
}

/// A provider of latest exchange rates.
///
/// Implementations are stateless apart from constants: they describe the
/// requests to issue and turn each raw response body into the normalized
/// shape. Bodies of every request are parsed independently and merged by
/// the fetch wrapper.
pub trait ExchangeRatesDataSource: Send + Sync {
    /// Provider name reported as `dataSource`.
    fn name(&self) -> &'static str;

    fn build_requests(&self) -> Result<Vec<RemoteRequest>, ExchangeRateError>;

    fn parse(&self, body: &[u8]) -> Result<LatestExchangeRateResponse, ExchangeRateError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_request_defaults() {
        let req = RemoteRequest::get("https://example.com/rates.xml");
        assert_eq!(req.method, Method::GET);
        assert!(req.body.is_none());
        assert_eq!(req.user_agent, UserAgent::Default);
    }

    #[test]
    fn test_post_request_with_headers() {
        let req = RemoteRequest::post("https://example.com", "<x/>")
            .header("SOAPAction", "urn:test")
            .without_user_agent();
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.body.as_deref(), Some("<x/>"));
        assert_eq!(
            req.headers,
            vec![("SOAPAction".to_string(), "urn:test".to_string())]
        );
        assert_eq!(req.user_agent, UserAgent::Omit);
    }
}
