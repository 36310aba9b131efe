//! Naver local search adapter

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::http::{build_client, endpoint};
use super::{PlacesClient, ProviderError, Result};
use crate::LocalcastError;
use crate::config::{ServiceConfig, required_credential};
use crate::models::RawListing;

/// `/v1/search/local.json` client
pub struct NaverLocalSearch {
    client: Client,
    client_id: String,
    client_secret: String,
    base_url: String,
    sort: String,
}

#[derive(Debug, Deserialize)]
struct LocalSearchResponse {
    #[serde(default)]
    items: Vec<LocalItem>,
}

#[derive(Debug, Deserialize)]
struct LocalItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    link: String,
}

impl NaverLocalSearch {
    pub fn new(config: &ServiceConfig) -> std::result::Result<Self, LocalcastError> {
        Ok(Self {
            client: build_client(&config.http)?,
            client_id: required_credential(&config.search.client_id, "search.client_id")?,
            client_secret: required_credential(
                &config.search.client_secret,
                "search.client_secret",
            )?,
            base_url: config.search.base_url.clone(),
            sort: config.search.sort.clone(),
        })
    }
}

#[async_trait]
impl PlacesClient for NaverLocalSearch {
    #[instrument(name = "naver_local_search", skip(self))]
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<RawListing>> {
        let url = format!(
            "{}?query={}&sort={}&display={}",
            endpoint(&self.base_url, "v1/search/local.json"),
            urlencoding::encode(query),
            urlencoding::encode(&self.sort),
            limit
        );

        let response = self
            .client
            .get(&url)
            .header("X-Naver-Client-Id", &self.client_id)
            .header("X-Naver-Client-Secret", &self.client_secret)
            .send()
            .await
            .map_err(|e| ProviderError::Search(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Search(format!("provider returned {status}")));
        }

        let body: LocalSearchResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Search(format!("malformed response: {e}")))?;

        let listings: Vec<RawListing> = body
            .items
            .into_iter()
            .take(limit)
            .map(|item| RawListing {
                name: strip_markup(&item.title),
                address: item.address,
                link: item.link,
            })
            .collect();

        debug!(count = listings.len(), "local search results");
        Ok(listings)
    }
}

/// Character references the provider escapes in titles. `&amp;` is last so
/// that an escaped reference such as `&amp;lt;` decodes only once.
const ENTITIES: &[(&str, &str)] = &[
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&amp;", "&"),
];

/// Remove the `<b>` highlighting the provider puts around matched terms,
/// then decode the escaped characters left in the text
fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    ENTITIES
        .iter()
        .fold(out, |text, &(entity, plain)| text.replace(entity, plain))
}
