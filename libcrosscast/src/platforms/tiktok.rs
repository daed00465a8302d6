//! TikTok video publishing
//!
//! TikTok is video-only: a post without a video URL is rejected before any
//! network call. Publishing goes through the backend's upload-init flow,
//! which handles the chunked transfer to TikTok itself.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::ApiClient;
use crate::error::{PlatformError, Result};
use crate::platforms::{map_api_error, PlatformPublisher};
use crate::types::{GeneratedPost, Platform, PublishContext, PublishOutcome};

pub struct TiktokPublisher {
    api: Arc<ApiClient>,
}

impl TiktokPublisher {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

fn build_upload_payload(post: &GeneratedPost, access_token: &str) -> Value {
    json!({
        "videoUrl": post.media_url,
        "caption": post.composed_caption(),
        "aspectRatio": post.video_aspect_ratio,
        "accessToken": access_token,
    })
}

#[async_trait]
impl PlatformPublisher for TiktokPublisher {
    fn platform(&self) -> Platform {
        Platform::Tiktok
    }

    fn validate(&self, post: &GeneratedPost) -> Result<()> {
        if post.video_url().is_none() {
            return Err(PlatformError::Validation(
                "TikTok publishing requires a video URL; this post has none".to_string(),
            )
            .into());
        }
        Ok(())
    }

    async fn publish(
        &self,
        access_token: &str,
        post: &GeneratedPost,
        _ctx: &PublishContext,
    ) -> Result<PublishOutcome> {
        self.validate(post)?;

        let payload = build_upload_payload(post, access_token);
        let response = self
            .api
            .publish("tiktok/upload-init", &payload)
            .await
            .map_err(|e| map_api_error(e, Platform::Tiktok, "upload-init"))?;

        Ok(response.into_outcome(Platform::Tiktok)?)
    }
}
