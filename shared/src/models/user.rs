//! Demo session models
//!
//! The demo sign-in only records who is using the client on this device.
//! It is not an authentication mechanism.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Signed-in demo user, persisted under `agrismart_user`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DemoUser {
    pub email: String,
    pub name: String,
    #[serde(rename = "loggedIn")]
    pub logged_in: bool,
}

impl DemoUser {
    /// Display name is the local part of the email
    pub fn from_email(email: &str) -> Self {
        let name = email.split('@').next().unwrap_or(email).to_string();
        Self {
            email: email.to_string(),
            name,
            logged_in: true,
        }
    }
}

/// Sign-in / sign-up form
#[derive(Debug, Clone, Validate)]
pub struct Credentials {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    /// Present on sign-up only
    pub confirm_password: Option<String>,
}

impl Credentials {
    pub fn sign_in(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: None,
        }
    }

    pub fn sign_up(email: &str, password: &str, confirm_password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: Some(confirm_password.to_string()),
        }
    }

    pub fn passwords_match(&self) -> bool {
        self.confirm_password
            .as_ref()
            .map(|confirm| *confirm == self.password)
            .unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_user_name_from_email() {
        let user = DemoUser::from_email("ravi.kumar@example.com");
        assert_eq!(user.name, "ravi.kumar");
        assert!(user.logged_in);
    }

    #[test]
    fn test_credentials_validation() {
        assert!(Credentials::sign_in("ravi@example.com", "secret1").validate().is_ok());
        assert!(Credentials::sign_in("ravi@example.com", "short").validate().is_err());
        assert!(Credentials::sign_in("ravi", "secret1").validate().is_err());
    }

    #[test]
    fn test_sign_up_passwords_must_match() {
        assert!(Credentials::sign_up("a@b.co", "secret1", "secret1").passwords_match());
        assert!(!Credentials::sign_up("a@b.co", "secret1", "secret2").passwords_match());
        assert!(Credentials::sign_in("a@b.co", "secret1").passwords_match());
    }
}
