//! Common HTTP fetch and merge for remote data sources.

use std::collections::BTreeMap;

use reqwest::{Client, StatusCode, header::USER_AGENT};

use crate::config::{HttpClientConfig, ProxySetting};
use crate::{
    ExchangeRateError, ExchangeRatesDataSource, LatestExchangeRate, LatestExchangeRateResponse,
    RemoteRequest, UserAgent,
};

/// A remote data source bound to a configured HTTP client.
pub struct RemoteExchangeRates {
    source: Box<dyn ExchangeRatesDataSource>,
    http: Client,
    user_agent: String,
}

impl RemoteExchangeRates {
    pub fn new(
        source: Box<dyn ExchangeRatesDataSource>,
        config: &HttpClientConfig,
    ) -> Result<Self, ExchangeRateError> {
        let mut builder = Client::builder()
            .timeout(config.request_timeout)
            .danger_accept_invalid_certs(config.skip_tls_verification);

        builder = match &config.proxy {
            ProxySetting::System => builder,
            ProxySetting::None => builder.no_proxy(),
            ProxySetting::Url(url) => builder.proxy(
                reqwest::Proxy::all(url)
                    .map_err(|e| ExchangeRateError::InvalidHttpClientConfig(e.to_string()))?,
            ),
        };

        let http = builder
            .build()
            .map_err(|e| ExchangeRateError::InvalidHttpClientConfig(e.to_string()))?;

        Ok(Self {
            source,
            http,
            user_agent: config.user_agent.clone(),
        })
    }

    /// Provider name reported as `dataSource`.
    pub fn data_source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Fetches and normalizes the provider's latest rates.
    ///
    /// Requests are issued one after another; the first transport error or
    /// non-200 status aborts the whole fetch.
    #[tracing::instrument(skip(self), fields(data_source = self.source.name()))]
    pub async fn latest_exchange_rates(
        &self,
        uid: i64,
    ) -> Result<LatestExchangeRateResponse, ExchangeRateError> {
        let requests = self.source.build_requests()?;
        let mut responses = Vec::with_capacity(requests.len());

        for request in requests {
            let body = self.execute(&request).await?;
            responses.push(self.source.parse(&body)?);
        }

        let response = if responses.len() == 1 {
            let mut response = responses.remove(0);
            response.sort();
            response
        } else {
            merge_responses(responses)?
        };

        tracing::info!(
            rates = response.exchange_rates.len(),
            update_time = response.update_time,
            "Fetched latest exchange rates"
        );
        Ok(response)
    }

    async fn execute(&self, request: &RemoteRequest) -> Result<Vec<u8>, ExchangeRateError> {
        let mut builder = self.http.request(request.method.clone(), &request.url);
        if request.user_agent == UserAgent::Default {
            builder = builder.header(USER_AGENT, &self.user_agent);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!(url = %request.url, error = %e, "Failed to request exchange rates");
            ExchangeRateError::FailedToRequestRemoteApi
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::error!(url = %request.url, %status, "Exchange rates api returned an error status");
            return Err(ExchangeRateError::FailedToRequestRemoteApi);
        }

        let body = response.bytes().await.map_err(|e| {
            tracing::error!(url = %request.url, error = %e, "Failed to read exchange rates body");
            ExchangeRateError::FailedToRequestRemoteApi
        })?;

        tracing::debug!(url = %request.url, bytes = body.len(), "Received exchange rates body");
        Ok(body.to_vec())
    }
}

/// Merges per-request responses into one.
///
/// Rates are keyed by currency with later responses overwriting earlier
/// ones; the base currency is set to `"1"` and the result is sorted by code.
/// Metadata comes from the last response.
pub fn merge_responses(
    responses: Vec<LatestExchangeRateResponse>,
) -> Result<LatestExchangeRateResponse, ExchangeRateError> {
    let mut merged = BTreeMap::new();
    let mut last = None;

    for response in responses {
        for rate in &response.exchange_rates {
            merged.insert(rate.currency.code(), rate.clone());
        }
        last = Some(response);
    }

    let Some(mut response) = last else {
        tracing::error!("No exchange rate responses to merge");
        return Err(ExchangeRateError::FailedToRequestRemoteApi);
    };

    merged.insert(
        response.base_currency.code(),
        LatestExchangeRate::new(response.base_currency, "1"),
    );
    response.exchange_rates = merged.into_values().collect();
    Ok(response)
}
