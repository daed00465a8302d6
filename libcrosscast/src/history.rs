//! Publish history recording
//!
//! Successful publishes are recorded in the backend history store, together
//! with the public URL of the new post where the platform has a stable URL
//! pattern. Recording is strictly best-effort: a history failure is logged
//! and swallowed, never surfaced to the publish result.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::Result;
use crate::types::{GeneratedPost, Platform};

/// Record submitted to the backend history store after a successful publish.
///
/// Wire format is the backend's camelCase. The plural fields mirror the
/// store's schema; one record per platform publish means each carries a
/// single element.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedRecord {
    /// Platform-assigned post identifier.
    pub post_id: String,
    pub post_content: String,
    pub published_urls: Vec<String>,
    pub platforms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<i64>,
}

/// Persists publish records.
///
/// Implemented by the backend API client; tests substitute in-memory stores.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn save_published(&self, record: &PublishedRecord) -> Result<()>;
}

/// Public URL of a published post, for platforms with a stable pattern.
///
/// TikTok, Instagram, and Twitter post URLs require the account handle,
/// which the publish response does not carry, so no URL is recorded there.
pub fn public_url(platform: Platform, post_id: &str) -> Option<String> {
    match platform {
        Platform::Facebook => Some(format!("https://www.facebook.com/{}", post_id)),
        Platform::Linkedin => Some(format!(
            "https://www.linkedin.com/feed/update/{}/",
            post_id
        )),
        Platform::Youtube => Some(format!("https://www.youtube.com/watch?v={}", post_id)),
        Platform::Tiktok | Platform::Instagram | Platform::Twitter => None,
    }
}

pub struct HistoryRecorder {
    store: Arc<dyn HistoryStore>,
}

impl HistoryRecorder {
    pub fn new(store: Arc<dyn HistoryStore>) -> Self {
        Self { store }
    }

    /// Record one successful platform publish. Never fails the caller.
    pub async fn record(&self, post: &GeneratedPost, platform_post_id: &str) {
        let record = PublishedRecord {
            post_id: platform_post_id.to_string(),
            post_content: post.composed_caption(),
            published_urls: public_url(post.platform, platform_post_id)
                .into_iter()
                .collect(),
            platforms: vec![post.platform.to_string()],
            image_url: post.image_url.clone(),
            published_at: Some(chrono::Utc::now().timestamp()),
        };

        match self.store.save_published(&record).await {
            Ok(()) => debug!(platform = %post.platform, post_id = %platform_post_id, "recorded publish history"),
            Err(e) => warn!(platform = %post.platform, post_id = %platform_post_id, "failed to record publish history: {}", e),
        }
    }
}
