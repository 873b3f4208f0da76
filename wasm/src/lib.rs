//! WebAssembly module for the AgriSmart browser front end
//!
//! Provides client-side logic for:
//! - Dictionary lookup and crop name localization
//! - Recommendation normalization
//! - Coordinate and soil input validation
//! - `localStorage`-backed preferences and search history

use chrono::Utc;
use serde_json::json;
use wasm_bindgen::prelude::*;

pub mod store;

pub use store::BrowserStore;

use shared::{
    normalize_batch, resolve_crop_name, validate_reading, AppContext, Credentials, HistoryCache,
    HistoryEntry, HistoryFilter, Language, LocationError, Localizer, PositionError, RawPosition,
    RecommendationSet, RequestMethod, SoilInputs,
};
use validator::Validate;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn js_error(message: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&message.to_string())
}

fn warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

fn parse_method(method: &str) -> Result<RequestMethod, String> {
    match method {
        "auto" => Ok(RequestMethod::Auto),
        "manual" => Ok(RequestMethod::Manual),
        other => Err(format!("Unknown request method: {}", other)),
    }
}

// ============================================================================
// Localization
// ============================================================================

/// Dictionary lookup with base-language and key fallback
#[wasm_bindgen]
pub fn translate(language: &str, key: &str) -> String {
    Localizer::new(Language::from_code_or_base(language))
        .t(key)
        .to_string()
}

/// Localize a canonical crop name
#[wasm_bindgen]
pub fn crop_name(name: &str, language: &str) -> String {
    resolve_crop_name(name, Language::from_code_or_base(language)).to_string()
}

// ============================================================================
// Recommendations
// ============================================================================

pub fn normalize_response(
    response_json: &str,
    method: &str,
    language: &str,
) -> Result<RecommendationSet, String> {
    let method = parse_method(method)?;
    let response: serde_json::Value =
        serde_json::from_str(response_json).map_err(|e| format!("Invalid response JSON: {}", e))?;
    let items = normalize_batch(&response, method);
    Ok(RecommendationSet::new(
        method,
        items,
        Language::from_code_or_base(language),
    ))
}

/// Normalize a raw backend response into a localized recommendation set
#[wasm_bindgen]
pub fn normalize_recommendations(
    response_json: &str,
    method: &str,
    language: &str,
) -> Result<String, JsValue> {
    let set = normalize_response(response_json, method, language).map_err(js_error)?;
    serde_json::to_string(&set).map_err(js_error)
}

/// Re-localize a set produced by `normalize_recommendations`
#[wasm_bindgen]
pub fn relocalize_recommendations(set_json: &str, language: &str) -> Result<String, JsValue> {
    let mut set: RecommendationSet = serde_json::from_str(set_json).map_err(js_error)?;
    set.relocalize(Language::from_code_or_base(language));
    serde_json::to_string(&set).map_err(js_error)
}

// ============================================================================
// Validation
// ============================================================================

/// Localized guidance when a position is unusable, `undefined` when it is fine
#[wasm_bindgen]
pub fn validate_position(latitude: f64, longitude: f64, language: &str) -> Option<String> {
    validate_reading(&RawPosition::new(latitude, longitude))
        .err()
        .map(|err| err.guidance(&Localizer::new(Language::from_code_or_base(language))))
}

/// Guidance for a `GeolocationPositionError` code (1 denied, 2 unavailable,
/// 3 timeout)
#[wasm_bindgen]
pub fn position_error_guidance(code: u16, message: &str, language: &str) -> String {
    let platform = match code {
        1 => PositionError::PermissionDenied,
        2 => PositionError::PositionUnavailable,
        3 => PositionError::Timeout,
        _ => PositionError::Other(message.to_string()),
    };
    LocationError::from(platform).guidance(&Localizer::new(Language::from_code_or_base(language)))
}

/// Guidance when the permission query reports `denied`
#[wasm_bindgen]
pub fn permission_blocked_guidance(language: &str) -> String {
    LocationError::PermissionBlocked.guidance(&Localizer::new(Language::from_code_or_base(language)))
}

/// Why manual inputs are rejected, `undefined` when they are valid
#[wasm_bindgen]
pub fn soil_inputs_error(inputs_json: &str) -> Option<String> {
    let inputs: SoilInputs = match serde_json::from_str(inputs_json) {
        Ok(inputs) => inputs,
        Err(e) => return Some(format!("Invalid inputs: {}", e)),
    };
    inputs.validate().err().map(|e| e.to_string())
}

// ============================================================================
// Session preferences
// ============================================================================

#[wasm_bindgen]
pub struct Session {
    context: AppContext<BrowserStore>,
}

#[wasm_bindgen]
impl Session {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<Session, JsValue> {
        let store = BrowserStore::local().map_err(js_error)?;
        let context = AppContext::load(store);
        if let Some(e) = context.startup_error() {
            warn(&format!("Could not persist user id: {}", e));
        }
        Ok(Session { context })
    }

    pub fn language(&self) -> String {
        self.context.language().code().to_string()
    }

    /// Returns false for an unsupported code
    pub fn set_language(&mut self, code: &str) -> bool {
        let Some(language) = Language::from_code(code) else {
            return false;
        };
        if let Err(e) = self.context.set_language(language, None) {
            warn(&format!("Could not persist language: {}", e));
        }
        true
    }

    pub fn t(&self, key: &str) -> String {
        self.context.localizer().t(key).to_string()
    }

    pub fn theme(&self) -> String {
        self.context.theme().code().to_string()
    }

    pub fn toggle_theme(&mut self) -> String {
        let theme = self.context.theme().toggled();
        if let Err(e) = self.context.set_theme(theme) {
            warn(&format!("Could not persist theme: {}", e));
        }
        theme.code().to_string()
    }

    pub fn user_id(&self) -> String {
        self.context.user_id().to_string()
    }

    pub fn is_logged_in(&self) -> bool {
        self.context.is_logged_in()
    }

    /// Demo sign-in; sign-up when `confirm` is given. Errors are localized.
    pub fn login(
        &mut self,
        email: &str,
        password: &str,
        confirm: Option<String>,
    ) -> Result<String, JsValue> {
        let credentials = match confirm {
            Some(confirm) => Credentials::sign_up(email, password, &confirm),
            None => Credentials::sign_in(email, password),
        };
        let localizer = self.context.localizer();
        let user = self
            .context
            .login(&credentials)
            .map_err(|err| js_error(localizer.t(err.message_key())))?;
        serde_json::to_string(user).map_err(js_error)
    }

    pub fn logout(&mut self) {
        if let Err(e) = self.context.logout() {
            warn(&format!("Could not clear session: {}", e));
        }
    }
}

// ============================================================================
// Search history
// ============================================================================

#[wasm_bindgen]
pub struct HistoryStore {
    cache: HistoryCache<BrowserStore>,
}

#[wasm_bindgen]
impl HistoryStore {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<HistoryStore, JsValue> {
        let store = BrowserStore::local().map_err(js_error)?;
        Ok(HistoryStore {
            cache: HistoryCache::load(store),
        })
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Record a location request. `results_json` is a normalized set.
    pub fn record_location(
        &mut self,
        latitude: f64,
        longitude: f64,
        results_json: &str,
    ) -> Result<(), JsValue> {
        let reading = validate_reading(&RawPosition::new(latitude, longitude)).map_err(js_error)?;
        let results: RecommendationSet = serde_json::from_str(results_json).map_err(js_error)?;
        self.append(HistoryEntry::from_location(&reading, &results, Utc::now()));
        Ok(())
    }

    /// Record a manual request
    pub fn record_manual(&mut self, inputs_json: &str, results_json: &str) -> Result<(), JsValue> {
        let inputs: SoilInputs = serde_json::from_str(inputs_json).map_err(js_error)?;
        let results: RecommendationSet = serde_json::from_str(results_json).map_err(js_error)?;
        self.append(HistoryEntry::from_manual(&inputs, &results, Utc::now()));
        Ok(())
    }

    /// `[{index, entry}]` for `all`, `auto` or `manual`; indices refer to
    /// the full list
    pub fn list(&self, filter: &str) -> Result<String, JsValue> {
        let filter: HistoryFilter = filter.parse().map_err(js_error)?;
        let items: Vec<serde_json::Value> = self
            .cache
            .list(filter)
            .into_iter()
            .map(|(index, entry)| json!({ "index": index, "entry": entry }))
            .collect();
        serde_json::to_string(&items).map_err(js_error)
    }

    /// Returns false for an unknown index
    pub fn remove(&mut self, index: usize) -> bool {
        match self.cache.remove(index) {
            Ok(removed) => removed.is_some(),
            Err(e) => {
                warn(&format!("Could not persist history removal: {}", e));
                true
            }
        }
    }

    pub fn stats(&self) -> String {
        let stats = self.cache.stats();
        json!({
            "total": stats.total,
            "auto": stats.auto,
            "manual": stats.manual,
            "mostRecommended": stats.most_recommended,
        })
        .to_string()
    }

    fn append(&mut self, entry: HistoryEntry) {
        if let Err(e) = self.cache.append(entry) {
            warn(&format!("Could not persist search history: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_falls_back() {
        assert_eq!(translate("te", "no.such.key"), "no.such.key");
        assert_eq!(translate("xx", "nav.home"), translate("en", "nav.home"));
        assert_ne!(translate("hi", "nav.home"), translate("en", "nav.home"));
    }

    #[test]
    fn test_crop_name() {
        assert_eq!(crop_name("Rice", "te"), "వరి");
        assert_eq!(crop_name("rice", "hi"), "चावल");
        assert_eq!(crop_name("Dragonfruit", "hi"), "Dragonfruit");
    }

    #[test]
    fn test_normalize_response() {
        let set = normalize_response(
            r#"{"recommendations":[{"crop_name":"Wheat","suitability_score":120}]}"#,
            "manual",
            "hi",
        )
        .unwrap();
        assert_eq!(set.items[0].name, "गेहूं");
        assert_eq!(set.items[0].original_name, "Wheat");
        assert_eq!(set.items[0].suitability, 100);

        assert!(normalize_response("{}", "psychic", "en").is_err());
        assert!(normalize_response("not json", "auto", "en").is_err());
    }

    #[test]
    fn test_validate_position() {
        assert_eq!(validate_position(17.385, 78.4867, "en"), None);
        assert!(validate_position(0.0, 0.0, "en").is_some());
        assert!(validate_position(95.0, 10.0, "en").is_some());
    }

    #[test]
    fn test_position_error_guidance() {
        assert_eq!(position_error_guidance(3, "", "en"), translate("en", "location.error.timeout"));
        assert!(position_error_guidance(9, "weird", "en").contains("weird"));
        assert_eq!(permission_blocked_guidance("en"), translate("en", "location.error.blocked"));
    }

    #[test]
    fn test_soil_inputs_error() {
        let valid = r#"{"N":90,"P":42,"K":43,"temperature":21,"humidity":82,"ph":6.5,"rainfall":202}"#;
        assert_eq!(soil_inputs_error(valid), None);

        let bad_ph = r#"{"N":90,"P":42,"K":43,"temperature":21,"humidity":82,"ph":15,"rainfall":202}"#;
        assert!(soil_inputs_error(bad_ph).is_some());
        assert!(soil_inputs_error(r#"{"N":90}"#).is_some());
    }
}
