//! Localization
//!
//! UI strings resolve active language → English → the key itself. A lookup
//! never fails.

pub mod crops;
pub mod dictionary;

pub use crops::resolve_crop_name;

use crate::types::Language;

/// Key lookup bound to one language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Localizer {
    language: Language,
}

impl Localizer {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Resolve a UI string key
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        dictionary::lookup(self.language, key)
            .or_else(|| dictionary::lookup(Language::BASE, key))
            .unwrap_or(key)
    }

    /// Resolve a key and substitute `{name}` placeholders
    pub fn format(&self, key: &str, args: &[(&str, &str)]) -> String {
        args.iter()
            .fold(self.t(key).to_string(), |text, (name, value)| {
                text.replace(&format!("{{{}}}", name), value)
            })
    }

    /// Localize a canonical crop name for this language
    pub fn crop_name<'a>(&self, name: &'a str) -> &'a str {
        resolve_crop_name(name, self.language)
    }
}
