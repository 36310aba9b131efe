//! `localcast` - current weather and nearby places for a coordinate,
//! localized into the caller's language
//!
//! The library exposes the compose pipeline, the provider contracts and
//! their HTTP adapters, and the axum router that fronts them.

pub mod composer;
pub mod config;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod models;
pub mod providers;
pub mod web;

// Re-export core types for public API
pub use composer::{ComposeRequest, Providers, ResponseComposer, SearchSettings};
pub use config::ServiceConfig;
pub use error::{ComposeError, LocalcastError};
pub use models::{Coordinate, LocalizedResponse, PlaceListing, PlaceName, RawListing, WeatherSnapshot};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, LocalcastError>;
