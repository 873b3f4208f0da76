//! Free-text translation through the backend
//!
//! Never fails: any problem returns the input unchanged. Crop names do not
//! go through here.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::Language;

#[derive(Clone)]
pub struct TranslationClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    text: &'a str,
    target_language: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(default)]
    translated_text: Option<String>,
}

impl TranslationClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::new(Client::new(), base_url)
    }

    /// Translate `text` into `target`. Base-language targets and blank
    /// text return immediately without a request.
    pub async fn translate(&self, text: &str, target: Language) -> String {
        if target.is_base() || text.trim().is_empty() {
            tracing::debug!("Skipping translation (base language or empty text)");
            return text.to_string();
        }

        let url = format!("{}/api/translate", self.base_url);
        let request = TranslateRequest {
            text,
            target_language: target.code(),
        };

        let response = match self.client.post(&url).json(&request).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Translation request failed, using original text: {}", e);
                return text.to_string();
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                "Translation API returned {}, using original text",
                response.status()
            );
            return text.to_string();
        }

        match response.json::<TranslateResponse>().await {
            Ok(TranslateResponse {
                translated_text: Some(translated),
            }) if !translated.is_empty() => translated,
            Ok(_) => text.to_string(),
            Err(e) => {
                tracing::warn!("Malformed translation response, using original text: {}", e);
                text.to_string()
            }
        }
    }
}
