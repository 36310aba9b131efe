//! Client contracts for the four upstream providers
//!
//! Each trait has one operation and returns either a value or a typed
//! [`ProviderError`]. The concrete adapters live in the submodules; the
//! composer only sees the traits.

use async_trait::async_trait;

use crate::models::{Coordinate, PlaceName, RawListing, WeatherSnapshot};

pub mod deepl;
pub mod error;
pub mod http;
pub mod naver_geocode;
pub mod naver_search;
pub mod weatherapi;

pub use deepl::DeeplTranslator;
pub use error::{ProviderError, Result};
pub use naver_geocode::NaverGeocoder;
pub use naver_search::NaverLocalSearch;
pub use weatherapi::WeatherApiClient;

/// Remote text translation
#[async_trait]
pub trait TranslationClient: Send + Sync {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String>;
}

/// Coordinate to coarse place name
#[async_trait]
pub trait GeocodeClient: Send + Sync {
    async fn resolve(&self, coordinate: Coordinate) -> Result<PlaceName>;
}

/// Current conditions at a coordinate
#[async_trait]
pub trait WeatherClient: Send + Sync {
    async fn current_conditions(&self, coordinate: Coordinate) -> Result<WeatherSnapshot>;
}

/// Local search. An empty result set is `Ok(vec![])`, not an error.
#[async_trait]
pub trait PlacesClient: Send + Sync {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<RawListing>>;
}
