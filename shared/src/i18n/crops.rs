//! Crop name dictionary
//!
//! Crop names are always localized from this table, never through the
//! remote translation endpoint.

use crate::types::Language;

/// (canonical English name, Telugu, Hindi)
pub const CROP_NAMES: &[(&str, &str, &str)] = &[
    ("Rice", "వరి", "चावल"),
    ("Wheat", "గోధుమ", "गेहूं"),
    ("Cotton", "పత్తి", "कपास"),
    ("Maize", "మొక్కజొన్న", "मक्का"),
    ("Sugarcane", "చెరకు", "गन्ना"),
    ("Jute", "జనపనార", "जूट"),
    ("Coffee", "కాఫీ", "कॉफ़ी"),
    ("Tea", "టీ", "चाय"),
    ("Groundnut", "వేరుశెనగ", "मूंगफली"),
    ("Coconut", "కొబ్బరి", "नारियल"),
    ("Papaya", "బొప్పాయి", "पपीता"),
    ("Orange", "నారింజ", "संतरा"),
    ("Apple", "ఆపిల్", "सेब"),
    ("Mango", "మామిడి", "आम"),
    ("Banana", "అరటి", "केला"),
    ("Grapes", "ద్రాక్ష", "अंगूर"),
    ("Watermelon", "పుచ్చకాయ", "तरबूज"),
    ("Muskmelon", "ఖర్బూజా", "खरबूजा"),
    ("Pomegranate", "దానిమ్మ", "अनार"),
    ("Chickpea", "శనగలు", "चना"),
    ("Kidneybeans", "రాజ్మా", "राजमा"),
    ("Pigeonpeas", "కందిపప్పు", "अरहर दाल"),
    ("Mothbeans", "మోత్ బీన్స్", "मोठ बीन्स"),
    ("Mungbean", "పెసలు", "मूंग दाल"),
    ("Blackgram", "మినుములు", "उड़द दाल"),
    ("Lentil", "కాయధాన్యాలు", "मसूर दाल"),
];

fn localized(entry: &(&'static str, &'static str, &'static str), language: Language) -> &'static str {
    match language {
        Language::English => entry.0,
        Language::Telugu => entry.1,
        Language::Hindi => entry.2,
    }
}

/// Localize a canonical crop name.
///
/// Exact match first, then a case-insensitive match on the canonical
/// name. Anything else, including an already-localized name, comes back
/// unchanged.
pub fn resolve_crop_name(name: &str, language: Language) -> &str {
    if name.is_empty() || language.is_base() {
        return name;
    }

    if let Some(entry) = CROP_NAMES.iter().find(|entry| entry.0 == name) {
        return localized(entry, language);
    }

    let lowered = name.to_lowercase();
    CROP_NAMES
        .iter()
        .find(|entry| entry.0.to_lowercase() == lowered)
        .map(|entry| localized(entry, language))
        .unwrap_or(name)
}
