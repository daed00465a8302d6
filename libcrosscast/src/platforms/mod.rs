//! Platform publisher adapters
//!
//! Each adapter maps a generic [`GeneratedPost`] to one platform's publish
//! call on the backend. Adapters are stateless beyond the shared API client;
//! the OAuth access token for the platform is resolved by the orchestrator
//! and passed into every call.
//!
//! Instagram and Twitter are deliberate stubs: the backend does not publish
//! to them yet, and the adapters fail fast with a clear message instead of
//! pretending otherwise.

use async_trait::async_trait;
use std::sync::Arc;

use crate::api::ApiClient;
use crate::error::{ApiError, CrosscastError, PlatformError, Result};
use crate::types::{GeneratedPost, Platform, PublishContext, PublishOutcome};

pub mod facebook;
pub mod instagram;
pub mod linkedin;
pub mod tiktok;
pub mod twitter;
pub mod youtube;

// Mock publisher is available for all builds so integration tests can use it
pub mod mock;

/// One platform's publish adapter.
#[async_trait]
pub trait PlatformPublisher: Send + Sync {
    /// The platform this adapter publishes to.
    fn platform(&self) -> Platform;

    /// Check platform preconditions that need no network call.
    fn validate(&self, post: &GeneratedPost) -> Result<()>;

    /// Publish one post with a resolved OAuth access token.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Validation` for precondition failures,
    /// `PlatformError::Authentication` when the platform rejects the token,
    /// `PlatformError::Network`/`RateLimit` for transport-level failures,
    /// and `PlatformError::Publishing` for everything else the backend
    /// reports.
    async fn publish(
        &self,
        access_token: &str,
        post: &GeneratedPost,
        ctx: &PublishContext,
    ) -> Result<PublishOutcome>;
}

/// Build the full adapter set over a shared backend client.
pub fn create_publishers(api: Arc<ApiClient>) -> Vec<Box<dyn PlatformPublisher>> {
    vec![
        Box::new(facebook::FacebookPublisher::new(api.clone())),
        Box::new(linkedin::LinkedinPublisher::new(api.clone())),
        Box::new(youtube::YoutubePublisher::new(api.clone())),
        Box::new(tiktok::TiktokPublisher::new(api)),
        Box::new(instagram::InstagramPublisher::new()),
        Box::new(twitter::TwitterPublisher::new()),
    ]
}

/// Interpret a backend API failure as a platform-level error.
///
/// 401/403 means the platform (or the backend) rejected the credentials,
/// 429 is platform rate limiting surfaced by the backend, transport errors
/// are network failures, and any other status is a publish failure carrying
/// the response body.
pub(crate) fn map_api_error(
    error: CrosscastError,
    platform: Platform,
    operation: &str,
) -> PlatformError {
    match error {
        CrosscastError::Api(ApiError::Status { status, body }) => {
            let detail = format!("{} {} returned {}: {}", platform, operation, status, body);
            match status {
                401 | 403 => PlatformError::Authentication(detail),
                429 => PlatformError::RateLimit(detail),
                _ => PlatformError::Publishing(detail),
            }
        }
        CrosscastError::Api(ApiError::Transport(e)) => {
            PlatformError::Network(format!("{} {} failed: {}", platform, operation, e))
        }
        CrosscastError::Platform(e) => e,
        other => PlatformError::Publishing(format!(
            "{} {} failed: {}",
            platform, operation, other
        )),
    }
}
