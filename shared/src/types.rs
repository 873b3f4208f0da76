//! Common types used across the client

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported UI languages. English is the base language every lookup
/// falls back to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "te")]
    Telugu,
    #[serde(rename = "hi")]
    Hindi,
}

impl Language {
    pub const BASE: Language = Language::English;
    pub const ALL: [Language; 3] = [Language::English, Language::Telugu, Language::Hindi];

    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Telugu => "te",
            Language::Hindi => "hi",
        }
    }

    /// Name of the language written in that language
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Telugu => "తెలుగు",
            Language::Hindi => "हिन्दी",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "en" => Some(Language::English),
            "te" => Some(Language::Telugu),
            "hi" => Some(Language::Hindi),
            _ => None,
        }
    }

    /// Parse a persisted code, falling back to the base language for
    /// anything unrecognized
    pub fn from_code_or_base(code: &str) -> Self {
        Self::from_code(code).unwrap_or(Self::BASE)
    }

    pub fn is_base(&self) -> bool {
        *self == Self::BASE
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| format!("unsupported language '{}' (expected en, te or hi)", s))
    }
}

/// Colour theme preference
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn code(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| format!("unsupported theme '{}' (expected light or dark)", s))
    }
}

/// Keys under which client state is persisted
pub mod storage_keys {
    pub const LANGUAGE: &str = "language";
    pub const THEME: &str = "theme";
    pub const USER: &str = "agrismart_user";
    pub const USER_ID: &str = "agrismart_user_id";
    pub const SEARCH_HISTORY: &str = "searchHistory";
}
