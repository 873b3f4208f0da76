//! Search history models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::location::GeolocationReading;
use crate::models::{Recommendation, RecommendationSet, ReportedLocation, RequestMethod, SoilInputs};

/// Number of recommendations retained per history entry
pub const HISTORY_ENTRY_CROPS: usize = 3;

/// What a completed request was based on
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HistorySource {
    Location {
        latitude: f64,
        longitude: f64,
        label: String,
    },
    Manual {
        /// Absent for entries pulled from the remote history endpoint
        #[serde(default, skip_serializing_if = "Option::is_none")]
        inputs: Option<SoilInputs>,
    },
}

/// One completed recommendation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub method: RequestMethod,
    pub timestamp: DateTime<Utc>,
    pub source: HistorySource,
    pub crops: Vec<Recommendation>,
}

impl HistoryEntry {
    pub fn from_location(
        reading: &GeolocationReading,
        results: &RecommendationSet,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            method: RequestMethod::Auto,
            timestamp,
            source: HistorySource::Location {
                latitude: reading.latitude,
                longitude: reading.longitude,
                label: format_coordinates(reading.latitude, reading.longitude),
            },
            crops: results.top(HISTORY_ENTRY_CROPS).to_vec(),
        }
    }

    pub fn from_manual(
        inputs: &SoilInputs,
        results: &RecommendationSet,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            method: RequestMethod::Manual,
            timestamp,
            source: HistorySource::Manual {
                inputs: Some(inputs.clone()),
            },
            crops: results.top(HISTORY_ENTRY_CROPS).to_vec(),
        }
    }
}

/// Render coordinates as `17.3850°N, 78.4867°E`
pub fn format_coordinates(latitude: f64, longitude: f64) -> String {
    let ns = if latitude < 0.0 { 'S' } else { 'N' };
    let ew = if longitude < 0.0 { 'W' } else { 'E' };
    format!(
        "{:.4}°{}, {:.4}°{}",
        latitude.abs(),
        ns,
        longitude.abs(),
        ew
    )
}

/// History view filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryFilter {
    #[default]
    All,
    Auto,
    Manual,
}

impl HistoryFilter {
    pub fn matches(&self, entry: &HistoryEntry) -> bool {
        match self {
            HistoryFilter::All => true,
            HistoryFilter::Auto => entry.method == RequestMethod::Auto,
            HistoryFilter::Manual => entry.method == RequestMethod::Manual,
        }
    }
}

impl FromStr for HistoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(HistoryFilter::All),
            "auto" => Ok(HistoryFilter::Auto),
            "manual" => Ok(HistoryFilter::Manual),
            other => Err(format!("unknown filter '{}' (expected all, auto or manual)", other)),
        }
    }
}

/// Summary figures for the history page
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistoryStats {
    pub total: usize,
    pub auto: usize,
    pub manual: usize,
    /// Canonical name of the crop that appears most often across entries
    pub most_recommended: Option<String>,
}

/// Recommendation as stored by the remote history endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemoteHistoryCrop {
    pub crop_name: String,
    pub suitability_score: u8,
    pub market_price: String,
    pub reason: String,
}

/// Wire shape of the remote history endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemoteHistoryItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<ReportedLocation>,
    /// Kept loose so the normalizer can tolerate whatever the server stored
    #[serde(default)]
    pub recommendations: Vec<serde_json::Value>,
    pub timestamp: String,
}

impl RemoteHistoryItem {
    pub fn from_entry(entry: &HistoryEntry, user_id: &str) -> Self {
        let location = match &entry.source {
            HistorySource::Location {
                latitude,
                longitude,
                label,
            } => Some(ReportedLocation {
                latitude: *latitude,
                longitude: *longitude,
                address: Some(label.clone()),
            }),
            HistorySource::Manual { .. } => None,
        };

        let recommendations = entry
            .crops
            .iter()
            .map(|crop| {
                serde_json::to_value(RemoteHistoryCrop {
                    crop_name: crop.original_name.clone(),
                    suitability_score: crop.suitability,
                    market_price: crop.price.clone(),
                    reason: crop.reason.clone(),
                })
                .unwrap_or(serde_json::Value::Null)
            })
            .collect();

        Self {
            id: None,
            user_id: user_id.to_string(),
            method: entry.method.as_str().to_string(),
            location,
            recommendations,
            timestamp: entry.timestamp.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_coordinates_hemispheres() {
        assert_eq!(format_coordinates(17.385, 78.4867), "17.3850°N, 78.4867°E");
        assert_eq!(format_coordinates(-33.8688, -151.2093), "33.8688°S, 151.2093°W");
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("AUTO".parse::<HistoryFilter>(), Ok(HistoryFilter::Auto));
        assert!("saved".parse::<HistoryFilter>().is_err());
    }

    #[test]
    fn test_history_source_tagging() {
        let source = HistorySource::Manual { inputs: None };
        let json = serde_json::to_value(&source).unwrap();
        assert_eq!(json["kind"], "manual");
    }
}
