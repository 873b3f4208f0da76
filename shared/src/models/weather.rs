//! Soil and weather data returned alongside location-based recommendations

use serde::{Deserialize, Serialize};

/// Soil classification detected for a location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DetectedSoil {
    #[serde(default)]
    pub soil_type: String,
    #[serde(default)]
    pub technical_name: String,
}

/// Weather snapshot attached to a location recommendation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CurrentConditions {
    #[serde(default)]
    pub temperature: f64,
    #[serde(default)]
    pub humidity: f64,
    #[serde(default)]
    pub rainfall: f64,
    #[serde(default)]
    pub description: String,
}

/// Location as echoed back by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportedLocation {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl ReportedLocation {
    /// Some backends echo (0, 0) when they failed to geocode
    pub fn is_sentinel(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }
}

/// Coordinates echoed by the soil detection endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoilCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Response of the standalone soil detection endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoilDetection {
    pub soil_type: String,
    #[serde(default)]
    pub technical_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<SoilCoordinates>,
}

/// Response of the standalone weather endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherReport {
    pub temperature: f64,
    pub humidity: f64,
    #[serde(default)]
    pub rainfall: f64,
    #[serde(default)]
    pub weather_description: String,
    #[serde(default)]
    pub location: String,
}
