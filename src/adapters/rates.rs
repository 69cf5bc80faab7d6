use crate::domain::model::{ExchangeRate, QUOTE_CURRENCY};
use crate::domain::ports::RateSource;
use crate::utils::error::{DashboardError, Result};
use async_trait::async_trait;
use reqwest::Client;

pub const DEFAULT_RATE_API_BASE: &str = "https://api.exchangerate-api.com";

/// Client for the `/v4/latest/{base}` exchange-rate endpoint.
pub struct HttpRateClient {
    client: Client,
    api_base: String,
}

impl HttpRateClient {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into(),
        }
    }

    fn endpoint(&self, base_currency: &str) -> String {
        format!(
            "{}/v4/latest/{}",
            self.api_base.trim_end_matches('/'),
            base_currency
        )
    }
}

#[async_trait]
impl RateSource for HttpRateClient {
    async fn fetch_rate(&self, base_currency: &str) -> Result<ExchangeRate> {
        let url = self.endpoint(base_currency);
        tracing::debug!("Making rate request to: {}", url);

        let response = self.client.get(&url).send().await?;
        tracing::debug!("Rate API response status: {}", response.status());

        let response = response.error_for_status()?;
        let body: serde_json::Value = response.json().await?;

        let value = body
            .get("rates")
            .and_then(|rates| rates.get(QUOTE_CURRENCY))
            .ok_or_else(|| DashboardError::RateError {
                message: format!("response has no rates.{} field", QUOTE_CURRENCY),
            })?;

        let rate = value
            .as_f64()
            .and_then(|v| ExchangeRate::new(base_currency, v))
            .ok_or_else(|| DashboardError::RateError {
                message: format!("rates.{} is not a positive number: {}", QUOTE_CURRENCY, value),
            })?;

        tracing::info!(
            "✅ API Check: Live {} to {} rate is {}",
            base_currency,
            QUOTE_CURRENCY,
            rate.value
        );
        Ok(rate)
    }
}
