//! Facebook page publishing
//!
//! Posts land on a Facebook page. The target page comes from the publish
//! context when set (the user picked a page at publish time), otherwise from
//! the page embedded in the post at generation time.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::ApiClient;
use crate::error::{PlatformError, Result};
use crate::platforms::{map_api_error, PlatformPublisher};
use crate::types::{GeneratedPost, Platform, PublishContext, PublishOutcome};

pub struct FacebookPublisher {
    api: Arc<ApiClient>,
}

impl FacebookPublisher {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

fn build_post_payload(post: &GeneratedPost, page_id: &str, access_token: &str) -> Value {
    json!({
        "pageId": page_id,
        "message": post.composed_caption(),
        "imageUrl": post.image_url,
        "videoUrl": post.media_url,
        "isVideo": post.is_video_content,
        "accessToken": access_token,
    })
}

#[async_trait]
impl PlatformPublisher for FacebookPublisher {
    fn platform(&self) -> Platform {
        Platform::Facebook
    }

    fn validate(&self, post: &GeneratedPost) -> Result<()> {
        if post.caption.trim().is_empty() && post.image_url.is_none() && post.media_url.is_none() {
            return Err(PlatformError::Validation(
                "Facebook post has no caption and no media".to_string(),
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

        let page_id = ctx
            .facebook_page_id
            .as_deref()
            .or(post.page_id.as_deref())
            .ok_or_else(|| {
                PlatformError::Validation(
                    "No Facebook page selected; connect a page or pass a target page id"
                        .to_string(),
                )
            })?;

        let payload = build_post_payload(post, page_id, access_token);
        let response = self
            .api
            .publish("facebook/post", &payload)
            .await
            .map_err(|e| map_api_error(e, Platform::Facebook, "post"))?;

        Ok(response.into_outcome(Platform::Facebook)?)
    }
}
