//! Community feed models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::normalizer::FieldValue;

/// Characters shown in a post preview before truncation
pub const PREVIEW_CHARS: usize = 150;

/// A community post as returned by the backend. Every field decodes
/// leniently; a value of the wrong shape reads as absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CommunityPost {
    #[serde(default, deserialize_with = "lenient_opt_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub author: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub content: String,
    #[serde(default, deserialize_with = "lenient_opt_text")]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub likes: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub comments: Option<u32>,
    #[serde(default, rename = "type", deserialize_with = "lenient_opt_text")]
    pub post_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub rating: Option<u8>,
}

/// Envelope of the community list endpoint. Entries that are not objects
/// are dropped.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CommunityPostsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, deserialize_with = "lenient_posts")]
    pub posts: Vec<CommunityPost>,
}

/// Highest star rating a post can carry
pub const MAX_RATING: u8 = 5;

fn lenient_opt_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match FieldValue::decode(Some(&value)) {
        FieldValue::Text(s) => Some(s.to_string()),
        FieldValue::Number(n) => Some(n.to_string()),
        FieldValue::Missing | FieldValue::Other(_) => None,
    })
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    lenient_opt_text(deserializer).map(Option::unwrap_or_default)
}

/// Non-negative numbers, rounded; anything else is absent
fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match FieldValue::decode(Some(&value)) {
        FieldValue::Number(n) if n.is_finite() && n >= 0.0 => Some(n.round().min(u32::MAX as f64) as u32),
        _ => None,
    })
}

fn lenient_rating<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u8>, D::Error> {
    lenient_count(deserializer).map(|count| count.map(|n| n.min(MAX_RATING as u32) as u8))
}

fn lenient_posts<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<CommunityPost>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

/// Body of the community create endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct NewCommunityPost {
    #[validate(length(min = 1, max = 80))]
    pub author: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 5000))]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CreatePostResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub post_id: Option<String>,
}

/// Display-ready post
#[derive(Debug, Clone, PartialEq)]
pub struct PostView {
    pub id: String,
    pub author: String,
    pub date: String,
    pub title: String,
    pub content: String,
    pub preview: String,
    pub likes: u32,
    pub comments: u32,
    pub kind: String,
    pub rating: u8,
}

impl From<CommunityPost> for PostView {
    fn from(post: CommunityPost) -> Self {
        let date = post
            .timestamp
            .as_deref()
            .and_then(format_post_date)
            .unwrap_or_else(|| "Recently".to_string());

        Self {
            id: post.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            preview: preview(&post.content),
            author: post.author,
            date,
            title: post.title,
            content: post.content,
            likes: post.likes.unwrap_or(0),
            comments: post.comments.unwrap_or(0),
            kind: post.post_type.unwrap_or_else(|| "post".to_string()),
            rating: post.rating.unwrap_or(0),
        }
    }
}

/// Format an RFC 3339 (or naive ISO) timestamp as `Mar 5, 2025`
pub fn format_post_date(timestamp: &str) -> Option<String> {
    let parsed = DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            chrono::NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|naive| naive.and_utc())
        })
        .ok()?;
    Some(parsed.format("%b %-d, %Y").to_string())
}

/// First 150 characters of a post, with an ellipsis if truncated
pub fn preview(content: &str) -> String {
    if content.chars().count() > PREVIEW_CHARS {
        let mut short: String = content.chars().take(PREVIEW_CHARS).collect();
        short.push_str("...");
        short
    } else {
        content.to_string()
    }
}
