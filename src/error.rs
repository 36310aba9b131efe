//! Error types and handling for the `localcast` service

use thiserror::Error;

/// Startup and ambient errors: anything that stops the service from coming up
#[derive(Error, Debug)]
pub enum LocalcastError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// HTTP client construction errors
    #[error("HTTP client error: {message}")]
    Http { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl LocalcastError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new HTTP client error
    pub fn http<S: Into<String>>(message: S) -> Self {
        Self::Http {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            LocalcastError::Config { message } => {
                format!("Configuration error: {message}. Please check your config file and provider credentials.")
            }
            LocalcastError::Http { .. } => {
                "Unable to set up outbound HTTP clients. Please check TLS and proxy settings."
                    .to_string()
            }
            LocalcastError::Io { .. } => {
                "I/O operation failed. Please check the bind address and file permissions."
                    .to_string()
            }
        }
    }
}

impl From<reqwest::Error> for LocalcastError {
    fn from(err: reqwest::Error) -> Self {
        LocalcastError::http(err.to_string())
    }
}

/// Terminal failures of a compose request. These are the only errors that
/// cross the core boundary; every provider failure is degraded before this.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeError {
    /// `lat` or `lon` absent or unparseable
    #[error("missing location")]
    MissingLocation,

    /// The weather provider failed or returned no current conditions
    #[error("weather unavailable")]
    WeatherUnavailable,
}
