//! Core types for Crosscast

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Social platforms a generated post can target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Facebook,
    Instagram,
    Linkedin,
    Twitter,
    Tiktok,
    Youtube,
}

impl Platform {
    /// All supported platforms, in display order.
    pub fn all() -> [Platform; 6] {
        [
            Platform::Facebook,
            Platform::Instagram,
            Platform::Linkedin,
            Platform::Twitter,
            Platform::Tiktok,
            Platform::Youtube,
        ]
    }

    /// Lowercase identifier used on the wire and in the CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Facebook => "facebook",
            Platform::Instagram => "instagram",
            Platform::Linkedin => "linkedin",
            Platform::Twitter => "twitter",
            Platform::Tiktok => "tiktok",
            Platform::Youtube => "youtube",
        }
    }

    /// Whether this platform's publish flow requires a video resource.
    pub fn requires_video(&self) -> bool {
        matches!(self, Platform::Tiktok | Platform::Youtube)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "facebook" => Ok(Platform::Facebook),
            "instagram" => Ok(Platform::Instagram),
            "linkedin" => Ok(Platform::Linkedin),
            "twitter" => Ok(Platform::Twitter),
            "tiktok" => Ok(Platform::Tiktok),
            "youtube" => Ok(Platform::Youtube),
            _ => Err(format!(
                "Unknown platform: '{}'. Valid options: facebook, instagram, linkedin, twitter, tiktok, youtube",
                s
            )),
        }
    }
}

/// One platform-targeted content unit produced by the generation step.
///
/// The JSON shape is the backend's camelCase wire format: generated posts
/// arrive from the generation endpoint and round-trip through files the CLI
/// reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPost {
    pub platform: Platform,
    pub caption: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    /// Video resource reference, when the post carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub is_video_content: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_aspect_ratio: Option<f64>,
    /// Prompt used to produce this post, kept so it can be regenerated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_prompt: Option<String>,
    /// Facebook page preselected during generation. A page id in the publish
    /// context takes precedence over this.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
}

impl GeneratedPost {
    pub fn new(platform: Platform, caption: impl Into<String>) -> Self {
        Self {
            platform,
            caption: caption.into(),
            hashtags: Vec::new(),
            media_url: None,
            image_url: None,
            thumbnail_url: None,
            is_video_content: false,
            video_aspect_ratio: None,
            generation_prompt: None,
            page_id: None,
        }
    }

    /// Caption with hashtags appended, each tag normalized to a single
    /// leading `#`.
    pub fn composed_caption(&self) -> String {
        let tags: Vec<String> = self
            .hashtags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(|t| {
                if let Some(stripped) = t.strip_prefix('#') {
                    format!("#{}", stripped)
                } else {
                    format!("#{}", t)
                }
            })
            .collect();

        if tags.is_empty() {
            self.caption.clone()
        } else if self.caption.trim().is_empty() {
            tags.join(" ")
        } else {
            format!("{}\n\n{}", self.caption, tags.join(" "))
        }
    }

    /// The video URL this post publishes, if any.
    pub fn video_url(&self) -> Option<&str> {
        self.media_url.as_deref()
    }
}

/// Routing hints for a publish batch.
#[derive(Debug, Clone, Default)]
pub struct PublishContext {
    /// Target Facebook page; overrides the page embedded in the post.
    pub facebook_page_id: Option<String>,
    /// Target YouTube channel for video uploads.
    pub youtube_channel_id: Option<String>,
    /// Thumbnail override for video posts; overrides the post's own.
    pub thumbnail_url: Option<String>,
}

/// Connection state of a platform account in the backend token store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenStatus {
    pub connected: bool,
    #[serde(default)]
    pub expired: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<PlatformToken>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformToken {
    pub access_token: String,
}

impl TokenStatus {
    /// A connected, current status carrying an access token.
    pub fn active(access_token: impl Into<String>) -> Self {
        Self {
            connected: true,
            expired: false,
            token: Some(PlatformToken {
                access_token: access_token.into(),
            }),
        }
    }

    /// Status for an account that was never connected.
    pub fn disconnected() -> Self {
        Self {
            connected: false,
            expired: false,
            token: None,
        }
    }

    /// Status for a connected account whose token has lapsed.
    pub fn lapsed() -> Self {
        Self {
            connected: true,
            expired: true,
            token: None,
        }
    }

    /// The access token, but only when it is actually usable for publishing.
    pub fn usable_token(&self) -> Option<&str> {
        if !self.connected || self.expired {
            return None;
        }
        self.token.as_ref().map(|t| t.access_token.as_str())
    }
}

/// What a platform adapter hands back on success.
#[derive(Debug, Clone)]
pub struct PublishOutcome {
    /// Opaque platform post identifier.
    pub post_id: String,
    /// Human-readable note about the publish (thumbnail caveats land here).
    pub message: String,
}

/// Per-platform outcome of one publish attempt. Created once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishResult {
    pub platform: Platform,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Whether retrying the same batch entry could plausibly succeed.
    pub retryable: bool,
}

impl PublishResult {
    pub fn succeeded(platform: Platform, post_id: String, message: String) -> Self {
        Self {
            platform,
            success: true,
            post_id: Some(post_id),
            message: Some(message),
            error: None,
            retryable: false,
        }
    }

    pub fn failed(platform: Platform, error: impl Into<String>, retryable: bool) -> Self {
        Self {
            platform,
            success: false,
            post_id: None,
            message: None,
            error: Some(error.into()),
            retryable,
        }
    }
}

/// Aggregated counts for a publish batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub succeeded_platforms: Vec<String>,
    pub failed_platforms: Vec<String>,
}

impl PublishSummary {
    pub fn from_results(results: &[PublishResult]) -> Self {
        let mut succeeded_platforms = Vec::new();
        let mut failed_platforms = Vec::new();

        for result in results {
            if result.success {
                succeeded_platforms.push(result.platform.to_string());
            } else {
                failed_platforms.push(result.platform.to_string());
            }
        }

        Self {
            total: results.len(),
            successful: succeeded_platforms.len(),
            failed: failed_platforms.len(),
            succeeded_platforms,
            failed_platforms,
        }
    }
}

/// Full outcome of a publish batch: per-platform results in input order,
/// plus the summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishReport {
    pub results: Vec<PublishResult>,
    pub summary: PublishSummary,
}

impl PublishReport {
    pub fn result_for(&self, platform: Platform) -> Option<&PublishResult> {
        self.results.iter().find(|r| r.platform == platform)
    }

    pub fn all_succeeded(&self) -> bool {
        self.summary.failed == 0
    }

    /// Platforms worth offering a retry for.
    pub fn retryable_platforms(&self) -> Vec<Platform> {
        self.results
            .iter()
            .filter(|r| !r.success && r.retryable)
            .map(|r| r.platform)
            .collect()
    }
}
