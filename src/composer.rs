//! Request orchestration and localization
//!
//! `ResponseComposer` runs one request through the providers:
//!
//! 1. parse the coordinate (missing or unparseable aborts before any call)
//! 2. reverse geocode and fetch current weather concurrently; weather is
//!    mandatory, the place name degrades to empty
//! 3. localize the condition text, translate the place name and search for
//!    nearby venues concurrently
//! 4. translate each listing's name and address, keeping provider order
//! 5. render the sentence with the language's template
//!
//! Only [`ComposeError`] leaves this module as a failure. Every
//! [`ProviderError`](crate::providers::ProviderError) is logged and replaced
//! by its fallback where it happens.

use std::sync::Arc;

use futures::future::join_all;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::LocalcastError;
use crate::config::ServiceConfig;
use crate::error::ComposeError;
use crate::i18n::{LocalizationDictionary, MessageTemplates, TargetLanguage};
use crate::models::{Coordinate, LocalizedResponse, PlaceListing, PlaceName, RawListing};
use crate::providers::{
    DeeplTranslator, GeocodeClient, NaverGeocoder, NaverLocalSearch, PlacesClient,
    TranslationClient, WeatherApiClient, WeatherClient,
};

/// Raw inbound parameters. Kept as strings so that an unparseable
/// coordinate is reported as a missing location instead of a rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComposeRequest {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub target_lang: Option<String>,
}

impl ComposeRequest {
    /// Build from raw query pairs. The first occurrence of a key wins and
    /// unknown keys are ignored.
    #[must_use]
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut request = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "lat" => &mut request.lat,
                "lon" => &mut request.lon,
                "target_lang" => &mut request.target_lang,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        request
    }

    #[must_use]
    pub fn language(&self) -> TargetLanguage {
        TargetLanguage::parse(self.target_lang.as_deref())
    }
}

/// The four provider capabilities the composer depends on
#[derive(Clone)]
pub struct Providers {
    pub translator: Arc<dyn TranslationClient>,
    pub geocoder: Arc<dyn GeocodeClient>,
    pub weather: Arc<dyn WeatherClient>,
    pub places: Arc<dyn PlacesClient>,
}

impl Providers {
    /// Build the production adapters from a validated configuration
    pub fn from_config(config: &ServiceConfig) -> Result<Self, LocalcastError> {
        Ok(Self {
            translator: Arc::new(DeeplTranslator::new(config)?),
            geocoder: Arc::new(NaverGeocoder::new(config)?),
            weather: Arc::new(WeatherApiClient::new(config)?),
            places: Arc::new(NaverLocalSearch::new(config)?),
        })
    }
}

/// How the nearby-venue search is shaped
#[derive(Debug, Clone)]
pub struct SearchSettings {
    /// Appended to the place name, e.g. `맛집`
    pub qualifier: String,
    pub limit: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            qualifier: "맛집".to_string(),
            limit: 5,
        }
    }
}

impl From<&ServiceConfig> for SearchSettings {
    fn from(config: &ServiceConfig) -> Self {
        Self {
            qualifier: config.search.qualifier.clone(),
            limit: config.search.display as usize,
        }
    }
}

pub struct ResponseComposer {
    providers: Providers,
    dictionary: LocalizationDictionary,
    templates: MessageTemplates,
    search: SearchSettings,
}

impl ResponseComposer {
    #[must_use]
    pub fn new(providers: Providers, search: SearchSettings) -> Self {
        Self {
            providers,
            dictionary: LocalizationDictionary::native(),
            templates: MessageTemplates::builtin(),
            search,
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self, LocalcastError> {
        Ok(Self::new(
            Providers::from_config(config)?,
            SearchSettings::from(config),
        ))
    }

    /// Validate the raw parameters and compose the localized response
    pub async fn handle(
        &self,
        request: &ComposeRequest,
    ) -> Result<LocalizedResponse, ComposeError> {
        let coordinate = Coordinate::parse(request.lat.as_deref(), request.lon.as_deref())
            .ok_or(ComposeError::MissingLocation)?;
        self.compose(coordinate, &request.language()).await
    }

    /// Localized user-visible text for a terminal failure
    #[must_use]
    pub fn failure_message(&self, language: &TargetLanguage, error: ComposeError) -> &'static str {
        self.templates.for_language(language).failure(error)
    }

    #[instrument(skip(self, language), fields(lang = %language))]
    pub async fn compose(
        &self,
        coordinate: Coordinate,
        language: &TargetLanguage,
    ) -> Result<LocalizedResponse, ComposeError> {
        let (place, weather) = tokio::join!(
            self.resolve_place(coordinate),
            self.providers.weather.current_conditions(coordinate),
        );

        let weather = weather.map_err(|e| {
            warn!(provider = e.provider(), error = %e, "weather unavailable");
            ComposeError::WeatherUnavailable
        })?;

        let query = self.search_query(&place);
        let (condition, place_label, listings) = tokio::join!(
            self.localize_condition(&weather.condition_text, language),
            self.translate_or_original(place.as_str(), language, "place_name"),
            self.find_places(&query),
        );

        let places = self.localize_listings(listings, language).await;

        let message = self.templates.for_language(language).message(
            &place_label,
            &weather.format_temperature(),
            &condition,
        );

        info!(place = %place, places = places.len(), "composed response");
        Ok(LocalizedResponse { message, places })
    }

    async fn resolve_place(&self, coordinate: Coordinate) -> PlaceName {
        match self.providers.geocoder.resolve(coordinate).await {
            Ok(place) if !place.is_empty() => place,
            Ok(_) => {
                warn!(provider = "geocode", field = "place_name", "empty place name");
                PlaceName::default()
            }
            Err(e) => {
                warn!(provider = e.provider(), field = "place_name", error = %e, "reverse geocoding failed, continuing without a place name");
                PlaceName::default()
            }
        }
    }

    /// Dictionary for the native language (no network fallback), the
    /// translation provider for everything else.
    async fn localize_condition(&self, condition: &str, language: &TargetLanguage) -> String {
        if language.is_native() {
            match self.dictionary.lookup(condition) {
                Some(localized) => localized.to_string(),
                None => {
                    debug!(condition, "condition not in dictionary, using provider text");
                    condition.to_string()
                }
            }
        } else {
            self.translate_or_original(condition, language, "condition")
                .await
        }
    }

    async fn translate_or_original(
        &self,
        text: &str,
        language: &TargetLanguage,
        field: &'static str,
    ) -> String {
        match self
            .providers
            .translator
            .translate(text, language.code())
            .await
        {
            Ok(translated) => translated,
            Err(e) => {
                warn!(provider = e.provider(), field, error = %e, "translation failed, keeping original text");
                text.to_string()
            }
        }
    }

    fn search_query(&self, place: &PlaceName) -> String {
        format!("{} {}", place, self.search.qualifier)
            .trim()
            .to_string()
    }

    async fn find_places(&self, query: &str) -> Vec<RawListing> {
        match self.providers.places.search(query, self.search.limit).await {
            Ok(mut listings) => {
                listings.truncate(self.search.limit);
                listings
            }
            Err(e) => {
                warn!(provider = e.provider(), field = "places", error = %e, "place search failed, returning no places");
                Vec::new()
            }
        }
    }

    async fn localize_listings(
        &self,
        listings: Vec<RawListing>,
        language: &TargetLanguage,
    ) -> Vec<PlaceListing> {
        join_all(listings.into_iter().map(|listing| async move {
            let (name, address) = tokio::join!(
                self.translate_or_original(&listing.name, language, "place.name"),
                self.translate_or_original(&listing.address, language, "place.address"),
            );
            PlaceListing {
                name,
                address,
                link: listing.link,
            }
        }))
        .await
    }
}
