//! AgriSmart backend API client
//!
//! JSON over HTTP. Recommendation payloads are returned raw so that the
//! normalizer decides what to tolerate; everything else is typed.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use shared::{
    CommunityPostsResponse, CreatePostResponse, CurrentConditions, DetectedSoil,
    FeedbackResponse, FeedbackSubmission, NewCommunityPost, Profile, ProfileResponse,
    RemoteHistoryItem, ReportedLocation, SaveProfileResponse, SoilDetection, SoilInputs,
    WeatherReport,
};

use crate::config::ApiConfig;
use crate::error::{AppError, AppResult};
use crate::external::TranslationClient;

/// Backend API client
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct CoordinatesBody {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
pub struct SaveHistoryResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub history_id: Option<String>,
}

/// Context the backend attaches to a location recommendation. Each part
/// is optional and decoded independently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationInsights {
    pub location: Option<ReportedLocation>,
    pub detected_soil: Option<DetectedSoil>,
    pub current_weather: Option<CurrentConditions>,
}

impl LocationInsights {
    pub fn from_payload(payload: &Value) -> Self {
        fn part<T: DeserializeOwned>(payload: &Value, field: &str) -> Option<T> {
            payload
                .get(field)
                .filter(|v| !v.is_null())
                .and_then(|v| serde_json::from_value(v.clone()).ok())
        }

        Self {
            location: part(payload, "location"),
            detected_soil: part(payload, "detected_soil"),
            current_weather: part(payload, "current_weather"),
        }
    }
}

impl BackendClient {
    /// Create a client from configuration
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
        })
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Translation client sharing this client's connection pool
    pub fn translation_client(&self) -> TranslationClient {
        TranslationClient::new(self.client.clone(), self.base_url.clone())
    }

    // ========================================================================
    // Recommendations
    // ========================================================================

    pub async fn recommend_from_location(&self, latitude: f64, longitude: f64) -> AppResult<Value> {
        self.post_json(
            "/api/recommend-from-location",
            &CoordinatesBody {
                lat: latitude,
                lon: longitude,
            },
        )
        .await
    }

    pub async fn recommend_manual(&self, inputs: &SoilInputs) -> AppResult<Value> {
        self.post_json("/api/recommend-manual", inputs).await
    }

    pub async fn detect_soil(&self, latitude: f64, longitude: f64) -> AppResult<SoilDetection> {
        self.post_json(
            "/api/detect-soil",
            &CoordinatesBody {
                lat: latitude,
                lon: longitude,
            },
        )
        .await
    }

    pub async fn weather(&self, latitude: f64, longitude: f64) -> AppResult<WeatherReport> {
        self.post_json(
            "/api/weather",
            &CoordinatesBody {
                lat: latitude,
                lon: longitude,
            },
        )
        .await
    }

    // ========================================================================
    // Community, feedback, profile
    // ========================================================================

    pub async fn community_posts(&self) -> AppResult<CommunityPostsResponse> {
        self.get_json("/api/community-posts").await
    }

    pub async fn create_post(&self, post: &NewCommunityPost) -> AppResult<CreatePostResponse> {
        self.post_json("/api/community-post", post).await
    }

    pub async fn submit_feedback(&self, feedback: &FeedbackSubmission) -> AppResult<FeedbackResponse> {
        self.post_json("/api/feedback", feedback).await
    }

    pub async fn get_profile(&self, user_id: &str) -> AppResult<ProfileResponse> {
        self.get_json(&format!("/api/profile/{}", user_id)).await
    }

    pub async fn save_profile(&self, profile: &Profile) -> AppResult<SaveProfileResponse> {
        self.post_json("/api/profile/save", profile).await
    }

    // ========================================================================
    // Remote history
    // ========================================================================

    pub async fn save_history(&self, item: &RemoteHistoryItem) -> AppResult<SaveHistoryResponse> {
        self.post_json("/api/history", item).await
    }

    /// Remote history for a user. Items that do not decode are skipped.
    pub async fn get_history(&self, user_id: &str) -> AppResult<Vec<RemoteHistoryItem>> {
        let raw: Value = self.get_json(&format!("/api/history/{}", user_id)).await?;
        let items = match raw {
            Value::Array(items) => items,
            _ => return Err(AppError::InvalidResponse("history is not a list".into())),
        };

        Ok(items
            .into_iter()
            .filter_map(|item| match serde_json::from_value(item) {
                Ok(decoded) => Some(decoded),
                Err(e) => {
                    tracing::debug!("Skipping malformed history item: {}", e);
                    None
                }
            })
            .collect())
    }

    // ========================================================================
    // Transport
    // ========================================================================

    async fn post_json<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Network(format!("{} request failed: {}", path, e)))?;

        Self::read_json(path, response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Network(format!("{} request failed: {}", path, e)))?;

        Self::read_json(path, response).await
    }

    async fn read_json<T: DeserializeOwned>(path: &str, response: Response) -> AppResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = error_detail(&body);
            tracing::warn!("{} returned {}: {}", path, status, body);
            return Err(AppError::from_status(status.as_u16(), detail));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::InvalidResponse(format!("Failed to parse {} response: {}", path, e)))
    }
}

/// `detail` from an error body, if there is a usable one
fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_detail() {
        assert_eq!(error_detail(r#"{"detail":"Invalid coordinates"}"#).as_deref(), Some("Invalid coordinates"));
        assert_eq!(error_detail(r#"{"detail":""}"#), None);
        assert_eq!(error_detail("<html>502</html>"), None);
        assert!(error_detail(r#"{"detail":[{"loc":["body","lat"]}]}"#).is_some());
    }

    #[test]
    fn test_insights_decode_independently() {
        let insights = LocationInsights::from_payload(&json!({
            "location": {"latitude": 17.4, "longitude": 78.5},
            "detected_soil": "clay",
            "current_weather": {"temperature": 31.0, "humidity": 60.0, "description": "haze"}
        }));
        assert!(insights.location.is_some());
        assert!(insights.detected_soil.is_none());
        assert_eq!(insights.current_weather.unwrap().description, "haze");
    }

    #[test]
    fn test_coordinates_body_uses_short_names() {
        let body = serde_json::to_value(CoordinatesBody { lat: 1.5, lon: 2.5 }).unwrap();
        assert_eq!(body, json!({"lat": 1.5, "lon": 2.5}));
    }

    #[test]
    fn test_base_url_trimmed() {
        assert_eq!(BackendClient::with_base_url("http://x/").base_url(), "http://x");
    }
}
