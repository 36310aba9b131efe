//! Current-conditions snapshot

use serde::{Deserialize, Serialize};

/// One reading of current conditions, as the provider reported it
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherSnapshot {
    /// Temperature in Celsius
    pub temperature_celsius: f64,
    /// Provider's raw condition description, also the dictionary key
    pub condition_text: String,
}

impl WeatherSnapshot {
    #[must_use]
    pub fn new(temperature_celsius: f64, condition_text: impl Into<String>) -> Self {
        Self {
            temperature_celsius,
            condition_text: condition_text.into(),
        }
    }

    /// Temperature as the provider's JSON number reads: integral values keep
    /// one decimal place, everything else uses the shortest exact form.
    #[must_use]
    pub fn format_temperature(&self) -> String {
        let t = self.temperature_celsius;
        if t.is_finite() && t.fract() == 0.0 {
            format!("{t:.1}")
        } else {
            format!("{t}")
        }
    }
}
