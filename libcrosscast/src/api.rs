//! Backend REST client
//!
//! Every platform interaction in this product is delegated to a backend
//! service: token storage for connected accounts, the per-platform publish
//! endpoints, post generation, and publish history. This module is the one
//! typed client for that API. Requests carry the user's session token as a
//! bearer header; responses are JSON.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ApiConfig;
use crate::error::{ApiError, PlatformError, Result};
use crate::history::{HistoryStore, PublishedRecord};
use crate::session::Session;
use crate::types::{GeneratedPost, Platform, PublishOutcome, TokenStatus};

/// Resolves stored OAuth credentials per platform.
///
/// Implemented by [`ApiClient`] against the backend token store; tests
/// substitute in-memory implementations.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn platform_token(&self, platform: Platform) -> Result<TokenStatus>;
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    session: Session,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: Session) -> Result<Self> {
        // A trailing slash keeps Url::join from eating the last path segment.
        let raw = if config.base_url.ends_with('/') {
            config.base_url.clone()
        } else {
            format!("{}/", config.base_url)
        };
        let base_url = Url::parse(&raw)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        let http = Client::builder()
            .user_agent(concat!("crosscast/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ApiError::Transport)?;

        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", path, e)).into())
    }

    async fn execute<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request
            .header(AUTHORIZATION, self.session.bearer_header()?)
            .send()
            .await
            .map_err(ApiError::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(ApiError::Transport)?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e).into())
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        self.execute(self.http.get(url)).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        self.execute(self.http.post(url).json(body)).await
    }

    /// POST to a platform publish endpoint.
    pub async fn publish(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<PublishResponse> {
        self.post_json(path, body).await
    }

    /// Ask the backend to generate platform-targeted posts from a prompt.
    pub async fn generate_posts(&self, request: &GenerateRequest) -> Result<Vec<GeneratedPost>> {
        let response: GenerateResponse = self.post_json("generate/posts", request).await?;
        Ok(response.posts)
    }

    /// Recent publish history, newest first.
    pub async fn recent_history(&self, limit: usize) -> Result<Vec<PublishedRecord>> {
        self.get_json(&format!("post-history/recent?limit={}", limit))
            .await
    }
}

#[async_trait]
impl TokenStore for ApiClient {
    async fn platform_token(&self, platform: Platform) -> Result<TokenStatus> {
        self.get_json(&format!("connections/{}/token", platform))
            .await
    }
}

#[async_trait]
impl HistoryStore for ApiClient {
    async fn save_published(&self, record: &PublishedRecord) -> Result<()> {
        let _: serde_json::Value = self
            .post_json("post-history/save-published-urls", record)
            .await?;
        Ok(())
    }
}

/// Success payload of the backend publish endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct PublishResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, alias = "id", alias = "postId")]
    pub post_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl PublishResponse {
    /// Turn a decoded response into an adapter outcome, treating an explicit
    /// `success: false` the same as a failed request.
    pub fn into_outcome(
        self,
        platform: Platform,
    ) -> std::result::Result<PublishOutcome, PlatformError> {
        if !self.success {
            let detail = self
                .error
                .or(self.message)
                .unwrap_or_else(|| "backend reported failure".to_string());
            return Err(PlatformError::Publishing(format!(
                "{} publish failed: {}",
                platform, detail
            )));
        }

        let post_id = self.post_id.ok_or_else(|| {
            PlatformError::Publishing(format!("{} publish response carried no post id", platform))
        })?;

        Ok(PublishOutcome {
            post_id,
            message: self.message.unwrap_or_else(|| "published".to_string()),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub prompt: String,
    pub platforms: Vec<Platform>,
}

#[derive(Debug, Clone, Deserialize)]
struct GenerateResponse {
    posts: Vec<GeneratedPost>,
}
