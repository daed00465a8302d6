//! LinkedIn publishing
//!
//! Publishes the composed caption with an optional image. The backend
//! returns the share URN (e.g. `urn:li:share:...`), which doubles as the
//! post id in history.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::ApiClient;
use crate::error::{PlatformError, Result};
use crate::platforms::{map_api_error, PlatformPublisher};
use crate::types::{GeneratedPost, Platform, PublishContext, PublishOutcome};

pub struct LinkedinPublisher {
    api: Arc<ApiClient>,
}

impl LinkedinPublisher {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

fn build_post_payload(post: &GeneratedPost, access_token: &str) -> Value {
    json!({
        "text": post.composed_caption(),
        "imageUrl": post.image_url,
        "accessToken": access_token,
    })
}

#[async_trait]
impl PlatformPublisher for LinkedinPublisher {
    fn platform(&self) -> Platform {
        Platform::Linkedin
    }

    fn validate(&self, post: &GeneratedPost) -> Result<()> {
        if post.composed_caption().trim().is_empty() {
            return Err(
                PlatformError::Validation("LinkedIn post has no text".to_string()).into(),
            );
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

        let payload = build_post_payload(post, access_token);
        let response = self
            .api
            .publish("linkedin/post", &payload)
            .await
            .map_err(|e| map_api_error(e, Platform::Linkedin, "post"))?;

        Ok(response.into_outcome(Platform::Linkedin)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_uses_composed_caption() {
        let mut post = GeneratedPost::new(Platform::Linkedin, "We are hiring");
        post.hashtags = vec!["hiring".to_string(), "rust".to_string()];

        let payload = build_post_payload(&post, "tok");
        assert_eq!(payload["text"], "We are hiring\n\n#hiring #rust");
        assert_eq!(payload["imageUrl"], Value::Null);
    }

    #[test]
    fn test_validate_rejects_empty_text() {
        let publisher = LinkedinPublisher::new(crate::platforms::mock::test_api_client());
        let post = GeneratedPost::new(Platform::Linkedin, "");
        assert!(publisher.validate(&post).is_err());
    }

    #[test]
    fn test_validate_accepts_hashtags_only() {
        let publisher = LinkedinPublisher::new(crate::platforms::mock::test_api_client());
        let mut post = GeneratedPost::new(Platform::Linkedin, "");
        post.hashtags = vec!["opentowork".to_string()];
        assert!(publisher.validate(&post).is_ok());
    }
}
