//! Mock publisher for testing
//!
//! A configurable adapter that simulates successes, typed failures, flaky
//! transient errors, and latency, so orchestration logic can be tested
//! without credentials or a backend.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::api::ApiClient;
use crate::config::ApiConfig;
use crate::error::{PlatformError, Result};
use crate::platforms::PlatformPublisher;
use crate::session::Session;
use crate::types::{GeneratedPost, Platform, PublishContext, PublishOutcome};

/// An `ApiClient` pointed at an unroutable address, for tests that exercise
/// adapter code paths which must fail before any request is sent.
pub fn test_api_client() -> Arc<ApiClient> {
    let config = ApiConfig {
        base_url: "http://127.0.0.1:9/api/v1/".to_string(),
        timeout_secs: 1,
    };
    Arc::new(ApiClient::new(&config, Session::with_token("test-token")).expect("test client"))
}

/// Behavior configuration for a [`MockPublisher`].
#[derive(Clone)]
pub struct MockConfig {
    /// Platform identity the mock claims.
    pub platform: Platform,

    /// Error returned while failing; `None` means every call succeeds.
    pub error: Option<PlatformError>,

    /// Number of initial publish calls that fail with `error` before the
    /// mock starts succeeding. Use `usize::MAX` for permanent failure.
    pub fail_attempts: usize,

    /// Simulated latency per call.
    pub delay: Duration,

    /// Number of publish calls made.
    pub publish_calls: Arc<Mutex<usize>>,

    /// Access tokens seen by publish calls, in order.
    pub seen_tokens: Arc<Mutex<Vec<String>>>,

    /// Captions of successfully published posts.
    pub published: Arc<Mutex<Vec<String>>>,
}

impl MockConfig {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            error: None,
            fail_attempts: 0,
            delay: Duration::ZERO,
            publish_calls: Arc::new(Mutex::new(0)),
            seen_tokens: Arc::new(Mutex::new(Vec::new())),
            published: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

pub struct MockPublisher {
    config: MockConfig,
}

impl MockPublisher {
    pub fn new(config: MockConfig) -> Self {
        Self { config }
    }

    /// A mock that always succeeds.
    pub fn success(platform: Platform) -> Self {
        Self::new(MockConfig::new(platform))
    }

    /// A mock that always fails with the given error.
    pub fn failing(platform: Platform, error: PlatformError) -> Self {
        let mut config = MockConfig::new(platform);
        config.error = Some(error);
        config.fail_attempts = usize::MAX;
        Self::new(config)
    }

    /// A mock that fails `failures` times with the given error, then
    /// succeeds.
    pub fn flaky(platform: Platform, failures: usize, error: PlatformError) -> Self {
        let mut config = MockConfig::new(platform);
        config.error = Some(error);
        config.fail_attempts = failures;
        Self::new(config)
    }

    /// A mock that succeeds after the given latency.
    pub fn with_delay(platform: Platform, delay: Duration) -> Self {
        let mut config = MockConfig::new(platform);
        config.delay = delay;
        Self::new(config)
    }

    /// Shared behavior handles, for asserting on calls after the mock has
    /// been boxed into a publisher set.
    pub fn config(&self) -> MockConfig {
        self.config.clone()
    }

    pub fn publish_calls(&self) -> usize {
        *self.config.publish_calls.lock().unwrap()
    }

    pub fn published(&self) -> Vec<String> {
        self.config.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlatformPublisher for MockPublisher {
    fn platform(&self) -> Platform {
        self.config.platform
    }

    fn validate(&self, post: &GeneratedPost) -> Result<()> {
        if post.caption.is_empty() && post.media_url.is_none() && post.image_url.is_none() {
            return Err(
                PlatformError::Validation("mock post has no content".to_string()).into(),
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
        let call_index = {
            let mut calls = self.config.publish_calls.lock().unwrap();
            *calls += 1;
            *calls
        };
        self.config
            .seen_tokens
            .lock()
            .unwrap()
            .push(access_token.to_string());

        if !self.config.delay.is_zero() {
            sleep(self.config.delay).await;
        }

        if call_index <= self.config.fail_attempts {
            let error = self
                .config
                .error
                .clone()
                .unwrap_or_else(|| PlatformError::Publishing("mock publish failed".to_string()));
            return Err(error.into());
        }

        self.config
            .published
            .lock()
            .unwrap()
            .push(post.caption.clone());

        Ok(PublishOutcome {
            post_id: format!("{}-mock-{}", self.config.platform, call_index),
            message: "published".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_success() {
        let publisher = MockPublisher::success(Platform::Facebook);
        let post = GeneratedPost::new(Platform::Facebook, "hello");

        let outcome = publisher
            .publish("tok", &post, &PublishContext::default())
            .await
            .unwrap();

        assert_eq!(outcome.post_id, "facebook-mock-1");
        assert_eq!(publisher.publish_calls(), 1);
        assert_eq!(publisher.published(), vec!["hello"]);
        assert_eq!(
            publisher.config().seen_tokens.lock().unwrap().as_slice(),
            &["tok".to_string()]
        );
    }

    #[tokio::test]
    async fn test_mock_permanent_failure() {
        let publisher = MockPublisher::failing(
            Platform::Linkedin,
            PlatformError::Publishing("upstream rejected".to_string()),
        );
        let post = GeneratedPost::new(Platform::Linkedin, "hello");

        for _ in 0..3 {
            let err = publisher
                .publish("tok", &post, &PublishContext::default())
                .await
                .unwrap_err();
            assert!(format!("{}", err).contains("upstream rejected"));
        }
        assert_eq!(publisher.publish_calls(), 3);
        assert!(publisher.published().is_empty());
    }

    #[tokio::test]
    async fn test_mock_flaky_recovers() {
        let publisher = MockPublisher::flaky(
            Platform::Youtube,
            1,
            PlatformError::Network("connection reset".to_string()),
        );
        let post = GeneratedPost::new(Platform::Youtube, "video");

        assert!(publisher
            .publish("tok", &post, &PublishContext::default())
            .await
            .is_err());
        assert!(publisher
            .publish("tok", &post, &PublishContext::default())
            .await
            .is_ok());
        assert_eq!(publisher.publish_calls(), 2);
    }

    #[tokio::test]
    async fn test_mock_delay() {
        let publisher = MockPublisher::with_delay(Platform::Tiktok, Duration::from_millis(30));
        let mut post = GeneratedPost::new(Platform::Tiktok, "clip");
        post.media_url = Some("https://cdn.example.com/c.mp4".to_string());

        let start = std::time::Instant::now();
        publisher
            .publish("tok", &post, &PublishContext::default())
            .await
            .unwrap();
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn test_mock_validate_empty_post() {
        let publisher = MockPublisher::success(Platform::Facebook);
        let post = GeneratedPost::new(Platform::Facebook, "");
        assert!(publisher.validate(&post).is_err());
    }
}
