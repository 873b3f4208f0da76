//! Crop recommendation models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::i18n::resolve_crop_name;
use crate::types::Language;

/// How a recommendation request was made
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RequestMethod {
    /// GPS auto-detect
    Auto,
    /// Manual NPK/weather entry
    Manual,
}

impl RequestMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Auto => "auto",
            RequestMethod::Manual => "manual",
        }
    }
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single normalized crop recommendation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    /// Display name in the active language
    pub name: String,
    /// Canonical (English) crop name, the only input to re-localization
    pub original_name: String,
    pub emoji: String,
    /// Suitability percentage, always within 0..=100
    pub suitability: u8,
    pub price: String,
    pub reason: String,
}

impl Recommendation {
    /// Re-derive the display name from the canonical name
    pub fn localize(&mut self, language: Language) {
        self.name = resolve_crop_name(&self.original_name, language).to_string();
    }
}

/// The recommendation batch currently on display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationSet {
    pub method: RequestMethod,
    pub language: Language,
    pub items: Vec<Recommendation>,
}

impl RecommendationSet {
    /// Wrap a freshly normalized batch and localize it for display
    pub fn new(method: RequestMethod, items: Vec<Recommendation>, language: Language) -> Self {
        let mut set = Self {
            method,
            language,
            items,
        };
        set.relocalize(language);
        set
    }

    /// Re-localize every display name from its canonical name. Scores,
    /// prices and reasons are untouched.
    pub fn relocalize(&mut self, language: Language) {
        for item in &mut self.items {
            item.localize(language);
        }
        self.language = language;
    }

    pub fn top(&self, n: usize) -> &[Recommendation] {
        &self.items[..self.items.len().min(n)]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Manual soil and weather readings sent to the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[validate(schema(function = "crate::validation::validate_soil_inputs"))]
pub struct SoilInputs {
    /// Nitrogen (kg/ha)
    #[serde(rename = "N")]
    #[validate(range(min = 0.0, max = 200.0))]
    pub nitrogen: f64,
    /// Phosphorus (kg/ha)
    #[serde(rename = "P")]
    #[validate(range(min = 0.0, max = 200.0))]
    pub phosphorus: f64,
    /// Potassium (kg/ha)
    #[serde(rename = "K")]
    #[validate(range(min = 0.0, max = 200.0))]
    pub potassium: f64,
    /// Air temperature (°C), range-checked in the schema hook
    pub temperature: f64,
    /// Relative humidity (%)
    #[validate(range(min = 0.0, max = 100.0))]
    pub humidity: f64,
    #[validate(range(min = 0.0, max = 14.0))]
    pub ph: f64,
    /// Rainfall (mm)
    #[validate(range(min = 0.0, max = 5000.0))]
    pub rainfall: f64,
}

/// Known-good test conditions for the manual form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoilPreset {
    Rice,
    Wheat,
    Cotton,
}

impl SoilPreset {
    pub const ALL: [SoilPreset; 3] = [SoilPreset::Rice, SoilPreset::Wheat, SoilPreset::Cotton];

    pub fn inputs(&self) -> SoilInputs {
        let (nitrogen, phosphorus, potassium, temperature, humidity, ph, rainfall) = match self {
            SoilPreset::Rice => (90.0, 42.0, 43.0, 21.0, 82.0, 6.5, 202.0),
            SoilPreset::Wheat => (80.0, 40.0, 50.0, 18.0, 65.0, 7.0, 100.0),
            SoilPreset::Cotton => (120.0, 60.0, 40.0, 25.0, 70.0, 6.8, 80.0),
        };
        SoilInputs {
            nitrogen,
            phosphorus,
            potassium,
            temperature,
            humidity,
            ph,
            rainfall,
        }
    }

    /// Canonical name of the crop these conditions are expected to favour
    pub fn crop_name(&self) -> &'static str {
        match self {
            SoilPreset::Rice => "Rice",
            SoilPreset::Wheat => "Wheat",
            SoilPreset::Cotton => "Cotton",
        }
    }
}

impl FromStr for SoilPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rice" => Ok(SoilPreset::Rice),
            "wheat" => Ok(SoilPreset::Wheat),
            "cotton" => Ok(SoilPreset::Cotton),
            other => Err(format!("unknown preset '{}' (expected rice, wheat or cotton)", other)),
        }
    }
}
