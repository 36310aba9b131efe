use thiserror::Error;

/// Recoverable provider failures. The composer degrades every one of these
/// to a fallback value; none reaches the caller.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Translation failure: {0}")]
    Translation(String),

    #[error("Geocode failure: {0}")]
    Geocode(String),

    #[error("Weather failure: {0}")]
    Weather(String),

    #[error("Search failure: {0}")]
    Search(String),
}

impl ProviderError {
    /// Short provider name for log fields
    #[must_use]
    pub fn provider(&self) -> &'static str {
        match self {
            ProviderError::Translation(_) => "translation",
            ProviderError::Geocode(_) => "geocode",
            ProviderError::Weather(_) => "weather",
            ProviderError::Search(_) => "search",
        }
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;
