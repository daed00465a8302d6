//! Crosscast - client engine for multi-platform social publishing
//!
//! This library drives the publish side of an AI content-creation product:
//! platform-targeted posts are generated by a backend, then published to
//! OAuth-connected accounts (Facebook, Instagram, LinkedIn, Twitter, TikTok,
//! YouTube) one platform at a time, with per-platform failure isolation,
//! progress events, and aggregated reporting.

pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod history;
pub mod logging;
pub mod platforms;
pub mod publisher;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use api::{ApiClient, GenerateRequest, TokenStore};
pub use config::Config;
pub use error::{CrosscastError, Result};
pub use events::{Event, EventBus, ProgressStatus};
pub use history::{HistoryRecorder, HistoryStore, PublishedRecord};
pub use publisher::BatchPublisher;
pub use session::Session;
pub use types::{
    GeneratedPost, Platform, PublishContext, PublishReport, PublishResult, PublishSummary,
    TokenStatus,
};
