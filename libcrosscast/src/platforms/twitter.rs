//! Twitter publishing — not yet supported
//!
//! Same standing as Instagram: no backend endpoint exists, so the adapter
//! fails fast with a clear, non-retryable message.

use async_trait::async_trait;

use crate::error::{PlatformError, Result};
use crate::platforms::PlatformPublisher;
use crate::types::{GeneratedPost, Platform, PublishContext, PublishOutcome};

const UNSUPPORTED: &str =
    "Twitter publishing is not yet supported; the backend does not expose a Twitter endpoint";

#[derive(Default)]
pub struct TwitterPublisher;

impl TwitterPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PlatformPublisher for TwitterPublisher {
    fn platform(&self) -> Platform {
        Platform::Twitter
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
