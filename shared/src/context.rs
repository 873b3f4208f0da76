//! Application context
//!
//! Session-wide preferences and identity, loaded once at startup and
//! written back to the store on every change.

use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::i18n::Localizer;
use crate::models::{Credentials, DemoUser, RecommendationSet};
use crate::storage::{load_json, save_json, KeyValueStore, StorageError};
use crate::types::{storage_keys, Language, Theme};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("invalid email address")]
    InvalidEmail,
    #[error("password must be at least 6 characters")]
    PasswordTooShort,
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl SessionError {
    pub fn message_key(&self) -> &'static str {
        match self {
            SessionError::InvalidEmail => "auth.error.email",
            SessionError::PasswordTooShort => "auth.error.password",
            SessionError::PasswordMismatch => "auth.error.mismatch",
            SessionError::Storage(_) => "error.storage",
        }
    }
}

pub struct AppContext<S: KeyValueStore> {
    store: S,
    language: Language,
    theme: Theme,
    user: Option<DemoUser>,
    user_id: String,
    startup_error: Option<StorageError>,
}

impl<S: KeyValueStore> AppContext<S> {
    /// Load persisted state. Unknown language or theme codes fall back to
    /// the defaults; a missing user id is generated and stored. A failed
    /// write is kept in [`AppContext::startup_error`] for the caller to report.
    pub fn load(store: S) -> Self {
        let language = store
            .get(storage_keys::LANGUAGE)
            .map(|code| Language::from_code_or_base(&code))
            .unwrap_or_default();
        let theme = store
            .get(storage_keys::THEME)
            .and_then(|code| Theme::from_code(&code))
            .unwrap_or_default();
        let user = load_json::<DemoUser>(&store, storage_keys::USER).filter(|u| u.logged_in);

        let mut startup_error = None;
        let user_id = match store.get(storage_keys::USER_ID) {
            Some(id) if !id.trim().is_empty() => id,
            _ => {
                let id = generate_user_id();
                startup_error = store.set(storage_keys::USER_ID, &id).err();
                id
            }
        };

        Self {
            store,
            language,
            theme,
            user,
            user_id,
            startup_error,
        }
    }

    /// Storage error hit while loading, if any. The session still works on
    /// the in-memory values.
    pub fn startup_error(&self) -> Option<&StorageError> {
        self.startup_error.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn localizer(&self) -> Localizer {
        Localizer::new(self.language)
    }

    /// Switch language and re-localize the recommendations on display
    pub fn set_language(
        &mut self,
        language: Language,
        displayed: Option<&mut RecommendationSet>,
    ) -> Result<(), StorageError> {
        self.language = language;
        if let Some(set) = displayed {
            set.relocalize(language);
        }
        self.store.set(storage_keys::LANGUAGE, language.code())
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), StorageError> {
        self.theme = theme;
        self.store.set(storage_keys::THEME, theme.code())
    }

    pub fn user(&self) -> Option<&DemoUser> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// Anonymous id used for profile and remote history
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Demo sign-in (or sign-up when a confirmation is supplied)
    pub fn login(&mut self, credentials: &Credentials) -> Result<&DemoUser, SessionError> {
        if let Err(errors) = credentials.validate() {
            let fields = errors.field_errors();
            if fields.contains_key("email") {
                return Err(SessionError::InvalidEmail);
            }
            return Err(SessionError::PasswordTooShort);
        }
        if !credentials.passwords_match() {
            return Err(SessionError::PasswordMismatch);
        }

        let user = DemoUser::from_email(credentials.email.trim());
        save_json(&self.store, storage_keys::USER, &user)?;
        Ok(self.user.insert(user))
    }

    pub fn logout(&mut self) -> Result<(), StorageError> {
        self.user = None;
        self.store.remove(storage_keys::USER)
    }
}

pub fn generate_user_id() -> String {
    format!("user_{}", Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Recommendation, RequestMethod};
    use crate::storage::MemoryStore;

    #[test]
    fn test_defaults_on_empty_store() {
        let ctx = AppContext::load(MemoryStore::new());
        assert_eq!(ctx.language(), Language::English);
        assert_eq!(ctx.theme(), Theme::Light);
        assert!(!ctx.is_logged_in());
        assert!(ctx.user_id().starts_with("user_"));
    }

    #[test]
    fn test_unwritable_store_reports_startup_error() {
        struct ReadOnly;
        impl KeyValueStore for ReadOnly {
            fn get(&self, _key: &str) -> Option<String> {
                None
            }
            fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
                Err(StorageError::QuotaExceeded)
            }
            fn remove(&self, _key: &str) -> Result<(), StorageError> {
                Err(StorageError::QuotaExceeded)
            }
        }

        let ctx = AppContext::load(ReadOnly);
        assert_eq!(ctx.startup_error(), Some(&StorageError::QuotaExceeded));
        assert!(ctx.user_id().starts_with("user_"));

        assert_eq!(AppContext::load(MemoryStore::new()).startup_error(), None);
    }

    #[test]
    fn test_stored_id_needs_no_write() {
        let store = MemoryStore::new();
        store.set(storage_keys::USER_ID, "user_known").unwrap();
        let ctx = AppContext::load(store);
        assert_eq!(ctx.user_id(), "user_known");
        assert!(ctx.startup_error().is_none());
    }

    #[test]
    fn test_unrecognized_language_falls_back() {
        let store = MemoryStore::new();
        store.set(storage_keys::LANGUAGE, "fr").unwrap();
        assert_eq!(AppContext::load(store).language(), Language::English);
    }

    #[test]
    fn test_preferences_persist() {
        let store = MemoryStore::new();
        let mut ctx = AppContext::load(store.clone());
        let id = ctx.user_id().to_string();
        ctx.set_language(Language::Telugu, None).unwrap();
        ctx.set_theme(Theme::Dark).unwrap();

        let reloaded = AppContext::load(store);
        assert_eq!(reloaded.language(), Language::Telugu);
        assert_eq!(reloaded.theme(), Theme::Dark);
        assert_eq!(reloaded.user_id(), id);
    }

    #[test]
    fn test_set_language_relocalizes_display() {
        let mut ctx = AppContext::load(MemoryStore::new());
        let mut set = RecommendationSet::new(
            RequestMethod::Auto,
            vec![Recommendation {
                name: "Cotton".into(),
                original_name: "Cotton".into(),
                emoji: "🌱".into(),
                suitability: 70,
                price: "₹6000/quintal".into(),
                reason: "black soil".into(),
            }],
            Language::English,
        );
        ctx.set_language(Language::Hindi, Some(&mut set)).unwrap();
        assert_eq!(set.items[0].name, "कपास");
        assert_eq!(set.items[0].price, "₹6000/quintal");
    }

    #[test]
    fn test_login_and_logout() {
        let store = MemoryStore::new();
        let mut ctx = AppContext::load(store.clone());

        assert_eq!(
            ctx.login(&Credentials::sign_in("farmer", "secret1")).unwrap_err(),
            SessionError::InvalidEmail
        );
        assert_eq!(
            ctx.login(&Credentials::sign_in("farmer@example.com", "123")).unwrap_err(),
            SessionError::PasswordTooShort
        );
        assert_eq!(
            ctx.login(&Credentials::sign_up("farmer@example.com", "secret1", "secret2"))
                .unwrap_err(),
            SessionError::PasswordMismatch
        );

        let user = ctx.login(&Credentials::sign_in("farmer@example.com", "secret1")).unwrap();
        assert_eq!(user.name, "farmer");
        assert!(AppContext::load(store.clone()).is_logged_in());

        ctx.logout().unwrap();
        assert!(!AppContext::load(store).is_logged_in());
    }
}
