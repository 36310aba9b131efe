//! Configuration management for the `localcast` service
//!
//! Handles loading configuration from a TOML file and environment variables,
//! and validates provider credentials at startup so that a missing key is a
//! startup error instead of a failure on every request.

use crate::LocalcastError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Inbound HTTP server settings
    pub server: ServerConfig,
    /// Outbound HTTP client settings shared by every provider
    pub http: HttpConfig,
    /// weatherapi.com credentials
    pub weather: WeatherConfig,
    /// Naver Cloud reverse geocoding credentials
    pub geocode: GeocodeConfig,
    /// Naver local search credentials and query shaping
    pub search: SearchConfig,
    /// DeepL credentials
    pub translation: TranslationConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Inbound HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served for `/` and other static paths
    pub static_dir: String,
    /// Upper bound for a whole inbound request, in seconds
    pub request_timeout_seconds: u64,
}

/// Outbound HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-call timeout in seconds
    pub timeout_seconds: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodeConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub base_url: String,
    /// Number of listings requested from the provider
    pub display: u32,
    /// Provider sort order (`random` or `comment`)
    pub sort: String,
    /// Appended to the place name to form the search query
    pub qualifier: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    pub auth_key: Option<String>,
    pub base_url: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_http_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("localcast/{}", env!("CARGO_PKG_VERSION"))
}

fn default_weather_base_url() -> String {
    "https://api.weatherapi.com".to_string()
}

fn default_geocode_base_url() -> String {
    "https://naveropenapi.apigw.ntruss.com".to_string()
}

fn default_search_base_url() -> String {
    "https://openapi.naver.com".to_string()
}

fn default_search_display() -> u32 {
    5
}

fn default_search_sort() -> String {
    "random".to_string()
}

fn default_search_qualifier() -> String {
    "맛집".to_string()
}

fn default_translation_base_url() -> String {
    "https://api-free.deepl.com".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_http_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
        }
    }
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            base_url: default_geocode_base_url(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            base_url: default_search_base_url(),
            display: default_search_display(),
            sort: default_search_sort(),
            qualifier: default_search_qualifier(),
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            auth_key: None,
            base_url: default_translation_base_url(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from the given path, or the default location when
    /// `None`, layered under `LOCALCAST_*` environment variables
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // LOCALCAST_WEATHER__API_KEY -> weather.api_key
        builder = builder.add_source(
            Environment::with_prefix("LOCALCAST")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: ServiceConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("localcast").join("config.toml"))
    }

    /// Apply default values to fields left empty or zero by the sources
    pub fn apply_defaults(&mut self) {
        if self.server.host.is_empty() {
            self.server.host = default_host();
        }
        if self.server.static_dir.is_empty() {
            self.server.static_dir = default_static_dir();
        }
        if self.server.request_timeout_seconds == 0 {
            self.server.request_timeout_seconds = default_request_timeout();
        }
        if self.http.timeout_seconds == 0 {
            self.http.timeout_seconds = default_http_timeout();
        }
        if self.http.user_agent.is_empty() {
            self.http.user_agent = default_user_agent();
        }
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.geocode.base_url.is_empty() {
            self.geocode.base_url = default_geocode_base_url();
        }
        if self.search.base_url.is_empty() {
            self.search.base_url = default_search_base_url();
        }
        if self.search.display == 0 {
            self.search.display = default_search_display();
        }
        if self.search.sort.is_empty() {
            self.search.sort = default_search_sort();
        }
        if self.search.qualifier.is_empty() {
            self.search.qualifier = default_search_qualifier();
        }
        if self.translation.base_url.is_empty() {
            self.translation.base_url = default_translation_base_url();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_credentials()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Every provider credential is required
    pub fn validate_credentials(&self) -> Result<()> {
        let required = [
            ("weather.api_key", &self.weather.api_key),
            ("geocode.client_id", &self.geocode.client_id),
            ("geocode.client_secret", &self.geocode.client_secret),
            ("search.client_id", &self.search.client_id),
            ("search.client_secret", &self.search.client_secret),
            ("translation.auth_key", &self.translation.auth_key),
        ];

        for (name, value) in required {
            match value.as_deref().map(str::trim) {
                Some(v) if !v.is_empty() => {}
                _ => {
                    return Err(missing_credential(name).into());
                }
            }
        }

        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if !(1..=60).contains(&self.http.timeout_seconds) {
            return Err(LocalcastError::config(
                "Provider call timeout must be between 1 and 60 seconds",
            )
            .into());
        }

        if !(1..=300).contains(&self.server.request_timeout_seconds) {
            return Err(LocalcastError::config(
                "Request timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        // The local search API caps display at 5
        if !(1..=5).contains(&self.search.display) {
            return Err(LocalcastError::config("Search display must be between 1 and 5").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(LocalcastError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(LocalcastError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let valid_sorts = ["random", "comment"];
        if !valid_sorts.contains(&self.search.sort.as_str()) {
            return Err(LocalcastError::config(format!(
                "Invalid search sort '{}'. Must be one of: {}",
                self.search.sort,
                valid_sorts.join(", ")
            ))
            .into());
        }

        let urls = [
            ("weather.base_url", &self.weather.base_url),
            ("geocode.base_url", &self.geocode.base_url),
            ("search.base_url", &self.search.base_url),
            ("translation.base_url", &self.translation.base_url),
        ];
        for (name, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(LocalcastError::config(format!(
                    "{name} must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}

/// Borrow a credential that `validate` has already checked, or fail with
/// the same configuration error when a client is built from an unvalidated
/// config.
pub fn required_credential(value: &Option<String>, name: &str) -> Result<String, LocalcastError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| missing_credential(name))
}

fn missing_credential(name: &str) -> LocalcastError {
    let env = format!("LOCALCAST_{}", name.to_uppercase().replace('.', "__"));
    LocalcastError::config(format!("{name} is required (set it in config.toml or {env})"))
}
