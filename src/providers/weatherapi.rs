//! weatherapi.com current-conditions adapter

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::http::{build_client, endpoint};
use super::{ProviderError, Result, WeatherClient};
use crate::LocalcastError;
use crate::config::{ServiceConfig, required_credential};
use crate::models::{Coordinate, WeatherSnapshot};

/// `/v1/current.json` client
pub struct WeatherApiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    current: Option<Current>,
}

#[derive(Debug, Deserialize)]
struct Current {
    temp_c: f64,
    condition: Condition,
}

#[derive(Debug, Deserialize)]
struct Condition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: i64,
    message: String,
}

impl WeatherApiClient {
    pub fn new(config: &ServiceConfig) -> std::result::Result<Self, LocalcastError> {
        Ok(Self {
            client: build_client(&config.http)?,
            api_key: required_credential(&config.weather.api_key, "weather.api_key")?,
            base_url: config.weather.base_url.clone(),
        })
    }
}

#[async_trait]
impl WeatherClient for WeatherApiClient {
    #[instrument(name = "weatherapi_current", skip(self))]
    async fn current_conditions(&self, coordinate: Coordinate) -> Result<WeatherSnapshot> {
        let url = format!(
            "{}?key={}&q={}&aqi=no",
            endpoint(&self.base_url, "v1/current.json"),
            urlencoding::encode(&self.api_key),
            coordinate.lat_lon()
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::Weather(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            // weatherapi.com explains most 4xx responses in an error body
            let detail = match response.json::<ErrorResponse>().await {
                Ok(body) => format!(" ({}: {})", body.error.code, body.error.message),
                Err(_) => String::new(),
            };
            return Err(ProviderError::Weather(format!("provider returned {status}{detail}")));
        }

        let body: CurrentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Weather(format!("malformed response: {e}")))?;

        let current = body
            .current
            .ok_or_else(|| ProviderError::Weather("response has no current conditions".to_string()))?;

        debug!(
            temperature = current.temp_c,
            condition = %current.condition.text,
            "current conditions"
        );
        Ok(WeatherSnapshot::new(current.temp_c, current.condition.text))
    }
}
