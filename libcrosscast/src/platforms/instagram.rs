//! Instagram publishing — not yet supported
//!
//! The backend has no Instagram container-publishing flow yet. The adapter
//! exists so a batch targeting Instagram reports an explicit, non-retryable
//! failure instead of dropping the platform silently.

use async_trait::async_trait;

use crate::error::{PlatformError, Result};
use crate::platforms::PlatformPublisher;
use crate::types::{GeneratedPost, Platform, PublishContext, PublishOutcome};

const UNSUPPORTED: &str =
    "Instagram publishing is not yet supported; the backend does not expose an Instagram endpoint";

#[derive(Default)]
pub struct InstagramPublisher;

impl InstagramPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PlatformPublisher for InstagramPublisher {
    fn platform(&self) -> Platform {
        Platform::Instagram
    }

    fn validate(&self, _post: &GeneratedPost) -> Result<()> {
        Err(PlatformError::NotImplemented(UNSUPPORTED.to_string()).into())
    }

    async fn publish(
        &self,
        _access_token: &str,
        _post: &GeneratedPost,
        _ctx: &PublishContext,
    ) -> Result<PublishOutcome> {
        Err(PlatformError::NotImplemented(UNSUPPORTED.to_string()).into())
    }
}
