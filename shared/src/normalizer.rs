//! Recommendation payload normalizer
//!
//! The backend is inconsistent about field names and types. Every entry is
//! decoded through [`FieldValue`] with an ordered alias list per target
//! field, and anything missing or wrong-typed degrades to a default. A batch
//! never fails as a whole.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::models::{
    HistoryEntry, HistorySource, Recommendation, RemoteHistoryItem, RequestMethod,
    HISTORY_ENTRY_CROPS,
};

pub const NAME_FIELDS: &[&str] = &["crop_name", "name"];
pub const SCORE_FIELDS: &[&str] = &["suitability_score", "score"];
pub const PRICE_FIELDS: &[&str] = &["market_price", "price"];
pub const REASON_FIELDS: &[&str] = &["reason"];

pub const UNKNOWN_CROP: &str = "Unknown Crop";
pub const PRICE_PLACEHOLDER: &str = "N/A";
pub const BASELINE_SCORE: u8 = 0;

/// Decoded shape of a single JSON field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Missing,
    Number(f64),
    Text(&'a str),
    Other(&'a Value),
}

impl<'a> FieldValue<'a> {
    pub fn decode(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => FieldValue::Missing,
            Some(Value::Number(n)) => n.as_f64().map_or(FieldValue::Missing, FieldValue::Number),
            Some(Value::String(s)) => FieldValue::Text(s),
            Some(other) => FieldValue::Other(other),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }
}

/// First alias that is present and not null
fn first_present<'a>(object: &'a Map<String, Value>, aliases: &[&str]) -> FieldValue<'a> {
    aliases
        .iter()
        .map(|alias| FieldValue::decode(object.get(*alias)))
        .find(|field| !field.is_missing())
        .unwrap_or(FieldValue::Missing)
}

/// First alias holding a non-empty string
fn first_text<'a>(object: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a str> {
    aliases
        .iter()
        .filter_map(|alias| match FieldValue::decode(object.get(*alias)) {
            FieldValue::Text(s) if !s.trim().is_empty() => Some(s),
            _ => None,
        })
        .next()
}

/// Clamp into [0, 100] and round to the nearest integer
pub fn clamp_score(raw: f64) -> u8 {
    if raw.is_nan() {
        return BASELINE_SCORE;
    }
    raw.clamp(0.0, 100.0).round() as u8
}

pub fn format_price(field: &FieldValue<'_>) -> String {
    match field {
        FieldValue::Number(n) => format!("₹{}/quintal", n),
        FieldValue::Text(s) => s.to_string(),
        FieldValue::Missing | FieldValue::Other(_) => PRICE_PLACEHOLDER.to_string(),
    }
}

pub fn default_reason(method: RequestMethod) -> &'static str {
    match method {
        RequestMethod::Auto => "Recommended based on your location's soil and weather conditions.",
        RequestMethod::Manual => "Recommended based on your provided soil and weather parameters.",
    }
}

/// Emoji for a canonical crop name
pub fn crop_emoji(name: &str) -> &'static str {
    match name.trim().to_lowercase().as_str() {
        "rice" | "wheat" => "🌾",
        "cotton" => "🌱",
        "sugarcane" | "jute" => "🌿",
        "corn" | "maize" => "🌽",
        "coffee" => "☕",
        "coconut" => "🥥",
        "papaya" | "muskmelon" => "🍈",
        "orange" => "🍊",
        "apple" | "pomegranate" => "🍎",
        "watermelon" => "🍉",
        "grapes" => "🍇",
        "mango" => "🥭",
        "banana" => "🍌",
        "lentil" | "blackgram" | "mungbean" | "mothbeans" | "pigeonpeas" | "kidneybeans"
        | "chickpea" => "🫘",
        _ => "🌱",
    }
}

/// Normalize one recommendation entry. The display name is left equal to
/// the canonical name; localization happens afterwards.
pub fn normalize_recommendation(value: &Value, method: RequestMethod) -> Recommendation {
    let empty = Map::new();
    let object = value.as_object().unwrap_or(&empty);

    let name = first_text(object, NAME_FIELDS).unwrap_or(UNKNOWN_CROP).to_string();

    let suitability = match first_present(object, SCORE_FIELDS) {
        FieldValue::Number(n) => clamp_score(n),
        _ => BASELINE_SCORE,
    };

    let price = format_price(&first_present(object, PRICE_FIELDS));

    let reason = first_text(object, REASON_FIELDS)
        .unwrap_or_else(|| default_reason(method))
        .to_string();

    Recommendation {
        emoji: crop_emoji(&name).to_string(),
        original_name: name.clone(),
        name,
        suitability,
        price,
        reason,
    }
}

/// Normalize the `recommendations` array of a backend response
pub fn normalize_batch(response: &Value, method: RequestMethod) -> Vec<Recommendation> {
    match response.get("recommendations") {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| normalize_recommendation(item, method))
            .collect(),
        _ => Vec::new(),
    }
}

/// Convert a remote history item into a local entry. Items with an unknown
/// method or an unparseable timestamp are dropped.
pub fn normalize_remote_history(item: &RemoteHistoryItem) -> Option<HistoryEntry> {
    let method = match item.method.as_str() {
        "auto" => RequestMethod::Auto,
        "manual" => RequestMethod::Manual,
        _ => return None,
    };

    let timestamp = DateTime::parse_from_rfc3339(&item.timestamp)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            chrono::NaiveDateTime::parse_from_str(&item.timestamp, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|naive| naive.and_utc())
        })
        .ok()?;

    let source = match (&item.location, method) {
        (Some(location), RequestMethod::Auto) => HistorySource::Location {
            latitude: location.latitude,
            longitude: location.longitude,
            label: location.address.clone().unwrap_or_else(|| {
                crate::models::format_coordinates(location.latitude, location.longitude)
            }),
        },
        _ => HistorySource::Manual { inputs: None },
    };

    let crops = item
        .recommendations
        .iter()
        .take(HISTORY_ENTRY_CROPS)
        .map(|value| normalize_recommendation(value, method))
        .collect();

    Some(HistoryEntry {
        method,
        timestamp,
        source,
        crops,
    })
}
