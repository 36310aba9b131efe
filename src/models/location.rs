//! Coordinate and place-name models

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in decimal degrees. No range validation: the providers enforce
/// their own bounds.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Parse raw query parameters. Returns `None` when either side is absent,
    /// blank, or not a finite number.
    #[must_use]
    pub fn parse(lat: Option<&str>, lon: Option<&str>) -> Option<Self> {
        let latitude = parse_degrees(lat?)?;
        let longitude = parse_degrees(lon?)?;
        Some(Self::new(latitude, longitude))
    }

    /// `lat,lon` form used by the weather provider's `q` parameter
    #[must_use]
    pub fn lat_lon(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }

    /// `lon,lat` form used by the reverse geocoder's `coords` parameter
    #[must_use]
    pub fn lon_lat(&self) -> String {
        format!("{},{}", self.longitude, self.latitude)
    }
}

fn parse_degrees(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Coarse "region, sub-region" name produced by reverse geocoding.
/// Empty when geocoding failed.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct PlaceName(String);

impl PlaceName {
    #[must_use]
    pub fn new(region: &str, sub_region: &str) -> Self {
        Self(format!("{region}, {sub_region}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for PlaceName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for PlaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
