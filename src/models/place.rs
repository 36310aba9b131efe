//! Place listings and the composed response

use serde::{Deserialize, Serialize};

/// A listing exactly as the search provider returned it
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RawListing {
    pub name: String,
    pub address: String,
    pub link: String,
}

/// A listing after localization. `link` is always the provider's value.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PlaceListing {
    pub name: String,
    pub address: String,
    pub link: String,
}

/// The terminal artifact returned to the caller
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LocalizedResponse {
    pub message: String,
    pub places: Vec<PlaceListing>,
}
