//! YouTube video publishing
//!
//! Uploads the post's video through the backend, then sets a custom
//! thumbnail as a secondary step when one is available. A thumbnail failure
//! is noted in the outcome message but does not fail the upload.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::warn;

use crate::api::ApiClient;
use crate::error::{PlatformError, Result};
use crate::platforms::{map_api_error, PlatformPublisher};
use crate::types::{GeneratedPost, Platform, PublishContext, PublishOutcome};

pub struct YoutubePublisher {
    api: Arc<ApiClient>,
}

impl YoutubePublisher {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    async fn set_thumbnail(
        &self,
        access_token: &str,
        video_id: &str,
        thumbnail_url: &str,
    ) -> Result<()> {
        let payload = json!({
            "videoId": video_id,
            "thumbnailUrl": thumbnail_url,
            "accessToken": access_token,
        });

        let response = self
            .api
            .publish("youtube/set-thumbnail", &payload)
            .await
            .map_err(|e| map_api_error(e, Platform::Youtube, "set thumbnail"))?;

        if !response.success {
            let detail = response
                .error
                .or(response.message)
                .unwrap_or_else(|| "backend reported failure".to_string());
            return Err(PlatformError::Publishing(format!(
                "thumbnail upload failed: {}",
                detail
            ))
            .into());
        }
        Ok(())
    }
}

fn build_upload_payload(
    post: &GeneratedPost,
    channel_id: Option<&str>,
    access_token: &str,
) -> Value {
    json!({
        "title": post.caption,
        "description": post.composed_caption(),
        "videoUrl": post.media_url,
        "channelId": channel_id,
        "tags": post.hashtags,
        "accessToken": access_token,
    })
}

#[async_trait]
impl PlatformPublisher for YoutubePublisher {
    fn platform(&self) -> Platform {
        Platform::Youtube
    }

    fn validate(&self, post: &GeneratedPost) -> Result<()> {
        if post.video_url().is_none() {
            return Err(PlatformError::Validation(
                "YouTube publishing requires a video URL; this post has none".to_string(),
            )
            .into());
        }
        Ok(())
    }

    async fn publish(
        &self,
        access_token: &str,
        post: &GeneratedPost,
        ctx: &PublishContext,
    ) -> Result<PublishOutcome> {
        self.validate(post)?;

        let payload = build_upload_payload(post, ctx.youtube_channel_id.as_deref(), access_token);
        let response = self
            .api
            .publish("youtube/post", &payload)
            .await
            .map_err(|e| map_api_error(e, Platform::Youtube, "upload video"))?;

        let outcome = response.into_outcome(Platform::Youtube)?;

        // Thumbnail is best-effort once the video is up: context override
        // first, then the thumbnail generated with the post.
        let thumbnail = ctx
            .thumbnail_url
            .as_deref()
            .or(post.thumbnail_url.as_deref());

        if let Some(url) = thumbnail {
            if let Err(e) = self.set_thumbnail(access_token, &outcome.post_id, url).await {
                warn!(video_id = %outcome.post_id, "YouTube thumbnail upload failed: {}", e);
                return Ok(PublishOutcome {
                    message: format!("{} (thumbnail upload failed: {})", outcome.message, e),
                    ..outcome
                });
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_payload_shape() {
        let mut post = GeneratedPost::new(Platform::Youtube, "Ferris builds a boat");
        post.media_url = Some("https://cdn.example.com/boat.mp4".to_string());
        post.hashtags = vec!["rust".to_string()];

        let payload = build_upload_payload(&post, Some("chan-1"), "tok");
        assert_eq!(payload["title"], "Ferris builds a boat");
        assert_eq!(payload["description"], "Ferris builds a boat\n\n#rust");
        assert_eq!(payload["videoUrl"], "https://cdn.example.com/boat.mp4");
        assert_eq!(payload["channelId"], "chan-1");
        assert_eq!(payload["tags"][0], "rust");
    }

    #[test]
    fn test_upload_payload_without_channel() {
        let mut post = GeneratedPost::new(Platform::Youtube, "t");
        post.media_url = Some("https://cdn.example.com/v.mp4".to_string());

        let payload = build_upload_payload(&post, None, "tok");
        assert_eq!(payload["channelId"], Value::Null);
    }

    #[test]
    fn test_validate_requires_video_url() {
        let publisher = YoutubePublisher::new(crate::platforms::mock::test_api_client());
        let post = GeneratedPost::new(Platform::Youtube, "no video here");

        let err = publisher.validate(&post).unwrap_err();
        assert!(matches!(
            err,
            crate::error::CrosscastError::Platform(PlatformError::Validation(_))
        ));
        assert!(format!("{}", err).contains("requires a video URL"));
    }

    #[tokio::test]
    async fn test_publish_without_video_fails_before_any_request() {
        let publisher = YoutubePublisher::new(crate::platforms::mock::test_api_client());
        let post = GeneratedPost::new(Platform::Youtube, "still no video");

        let err = publisher
            .publish("tok", &post, &PublishContext::default())
            .await
            .unwrap_err();
        assert!(format!("{}", err).contains("requires a video URL"));
    }
}
