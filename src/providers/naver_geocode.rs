//! Naver Cloud reverse geocoding adapter

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::http::{build_client, endpoint};
use super::{GeocodeClient, ProviderError, Result};
use crate::LocalcastError;
use crate::config::{ServiceConfig, required_credential};
use crate::models::{Coordinate, PlaceName};

/// `/map-reversegeocode/v2/gc` client, resolving to "area1, area2"
pub struct NaverGeocoder {
    client: Client,
    client_id: String,
    client_secret: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ReverseGeocodeResponse {
    status: Status,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct Status {
    code: i64,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    region: Region,
}

#[derive(Debug, Deserialize)]
struct Region {
    area1: Area,
    area2: Area,
}

#[derive(Debug, Deserialize)]
struct Area {
    name: String,
}

impl NaverGeocoder {
    pub fn new(config: &ServiceConfig) -> std::result::Result<Self, LocalcastError> {
        Ok(Self {
            client: build_client(&config.http)?,
            client_id: required_credential(&config.geocode.client_id, "geocode.client_id")?,
            client_secret: required_credential(
                &config.geocode.client_secret,
                "geocode.client_secret",
            )?,
            base_url: config.geocode.base_url.clone(),
        })
    }
}

#[async_trait]
impl GeocodeClient for NaverGeocoder {
    #[instrument(name = "naver_reverse_geocode", skip(self))]
    async fn resolve(&self, coordinate: Coordinate) -> Result<PlaceName> {
        let url = format!(
            "{}?coords={}&output=json&orders=legalcode",
            endpoint(&self.base_url, "map-reversegeocode/v2/gc"),
            coordinate.lon_lat()
        );

        let response = self
            .client
            .get(&url)
            .header("X-NCP-APIGW-API-KEY-ID", &self.client_id)
            .header("X-NCP-APIGW-API-KEY", &self.client_secret)
            .send()
            .await
            .map_err(|e| ProviderError::Geocode(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Geocode(format!("provider returned {status}")));
        }

        let body: ReverseGeocodeResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Geocode(format!("malformed response: {e}")))?;

        if body.status.code != 0 {
            return Err(ProviderError::Geocode(format!(
                "status code {}: {}",
                body.status.code, body.status.message
            )));
        }

        let region = body
            .results
            .into_iter()
            .next()
            .map(|r| r.region)
            .ok_or_else(|| ProviderError::Geocode("empty result set".to_string()))?;

        let place = PlaceName::new(&region.area1.name, &region.area2.name);
        debug!(place = %place, "reverse geocoded");
        Ok(place)
    }
}
