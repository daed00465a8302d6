//! Multi-platform publish orchestration
//!
//! Posts are published sequentially, one platform at a time and in input
//! order, with a short pause between them to stay clear of platform-side
//! rate limits. Failures are isolated per platform: a failed publish is
//! converted into a result entry and the batch moves on. The orchestrator
//! itself fails only on its preconditions (no session token, duplicate
//! platforms in the batch).

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::TokenStore;
use crate::error::{CrosscastError, PlatformError, Result};
use crate::events::{Event, EventBus, ProgressStatus};
use crate::history::HistoryRecorder;
use crate::platforms::PlatformPublisher;
use crate::session::Session;
use crate::types::{
    GeneratedPost, Platform, PublishContext, PublishOutcome, PublishReport, PublishResult,
    PublishSummary,
};

const MAX_ATTEMPTS: u32 = 3;
const DEFAULT_INTER_POST_DELAY: Duration = Duration::from_secs(1);

/// Transient errors are worth an automatic retry within the batch step;
/// everything else is permanent for this attempt.
fn is_transient(error: &PlatformError) -> bool {
    matches!(
        error,
        PlatformError::Network(_) | PlatformError::RateLimit(_)
    )
}

/// Heuristic for opaque failure text: credential-shaped messages mean a
/// retry without reconnecting the account is pointless.
fn message_suggests_reconnect(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("authentication") || lower.contains("connect") || lower.contains("expired")
}

fn classify_retryable(error: &PlatformError) -> bool {
    match error {
        PlatformError::Authentication(_)
        | PlatformError::Validation(_)
        | PlatformError::NotImplemented(_) => false,
        PlatformError::Network(_) | PlatformError::RateLimit(_) => true,
        PlatformError::Publishing(message) => !message_suggests_reconnect(message),
    }
}

fn failure_from_error(platform: Platform, error: &CrosscastError) -> PublishResult {
    let retryable = match error {
        CrosscastError::Platform(platform_error) => classify_retryable(platform_error),
        other => !message_suggests_reconnect(&other.to_string()),
    };
    PublishResult::failed(platform, error.to_string(), retryable)
}

/// Publish one post through an adapter, retrying transient failures with
/// exponential backoff (1s, 2s).
async fn publish_with_retry(
    publisher: &dyn PlatformPublisher,
    access_token: &str,
    post: &GeneratedPost,
    ctx: &PublishContext,
) -> Result<PublishOutcome> {
    let platform = publisher.platform();

    for attempt in 1..=MAX_ATTEMPTS {
        match publisher.publish(access_token, post, ctx).await {
            Ok(outcome) => {
                if attempt > 1 {
                    info!("published to {} on attempt {}", platform, attempt);
                }
                return Ok(outcome);
            }
            Err(e) => {
                let transient =
                    matches!(&e, CrosscastError::Platform(p) if is_transient(p));
                if transient && attempt < MAX_ATTEMPTS {
                    let delay = Duration::from_secs(1 << (attempt - 1));
                    warn!(
                        "transient error publishing to {} (attempt {}/{}): {}; retrying in {:?}",
                        platform, attempt, MAX_ATTEMPTS, e, delay
                    );
                    sleep(delay).await;
                } else {
                    return Err(e);
                }
            }
        }
    }

    Err(PlatformError::Publishing(format!(
        "failed to publish to {} after {} attempts",
        platform, MAX_ATTEMPTS
    ))
    .into())
}

/// Sequential multi-platform publisher.
///
/// Every collaborator is injected: the adapter set, the platform token
/// store, the history recorder, the progress event bus, and the user's
/// session. Nothing here is process-global.
pub struct BatchPublisher {
    publishers: Vec<Box<dyn PlatformPublisher>>,
    tokens: Arc<dyn TokenStore>,
    history: HistoryRecorder,
    events: EventBus,
    session: Session,
    inter_post_delay: Duration,
}

impl BatchPublisher {
    pub fn new(
        publishers: Vec<Box<dyn PlatformPublisher>>,
        tokens: Arc<dyn TokenStore>,
        history: HistoryRecorder,
        events: EventBus,
        session: Session,
    ) -> Self {
        Self {
            publishers,
            tokens,
            history,
            events,
            session,
            inter_post_delay: DEFAULT_INTER_POST_DELAY,
        }
    }

    /// Override the pause between posts (the default is one second).
    pub fn with_inter_post_delay(mut self, delay: Duration) -> Self {
        self.inter_post_delay = delay;
        self
    }

    fn publisher_for(&self, platform: Platform) -> Option<&dyn PlatformPublisher> {
        self.publishers
            .iter()
            .find(|p| p.platform() == platform)
            .map(|p| p.as_ref())
    }

    /// Publish each post to its target platform, in order.
    ///
    /// Fails up front when no session token is present or when the batch
    /// targets the same platform twice; after that, per-platform failures
    /// are captured in the report and never propagate.
    ///
    /// There is no rollback: a partially failed batch leaves the successes
    /// published. Retry failed platforms by re-invoking with a filtered
    /// post list.
    pub async fn publish_batch(
        &self,
        posts: &[GeneratedPost],
        ctx: &PublishContext,
    ) -> Result<PublishReport> {
        self.session.require_token()?;

        let mut seen = HashSet::new();
        for post in posts {
            if !seen.insert(post.platform) {
                return Err(CrosscastError::InvalidInput(format!(
                    "duplicate platform in batch: {}",
                    post.platform
                )));
            }
        }

        let batch_id = Uuid::new_v4().to_string();
        self.events.emit(Event::BatchStarted {
            batch_id: batch_id.clone(),
            platforms: posts.iter().map(|p| p.platform.to_string()).collect(),
        });

        let mut results = Vec::with_capacity(posts.len());
        for (index, post) in posts.iter().enumerate() {
            self.events.emit(Event::PublishProgress {
                batch_id: batch_id.clone(),
                platform: post.platform.to_string(),
                status: ProgressStatus::Pending,
            });

            let result = self.publish_one(post, ctx).await;

            let status = if result.success {
                ProgressStatus::Success
            } else {
                ProgressStatus::Error
            };
            self.events.emit(Event::PublishProgress {
                batch_id: batch_id.clone(),
                platform: post.platform.to_string(),
                status,
            });
            results.push(result);

            if index + 1 < posts.len() && !self.inter_post_delay.is_zero() {
                sleep(self.inter_post_delay).await;
            }
        }

        let summary = PublishSummary::from_results(&results);
        self.events.emit(Event::BatchCompleted {
            batch_id,
            summary: summary.clone(),
        });

        Ok(PublishReport { results, summary })
    }

    async fn publish_one(&self, post: &GeneratedPost, ctx: &PublishContext) -> PublishResult {
        let platform = post.platform;

        let Some(publisher) = self.publisher_for(platform) else {
            return PublishResult::failed(
                platform,
                format!("no publisher available for {}", platform),
                false,
            );
        };

        let status = match self.tokens.platform_token(platform).await {
            Ok(status) => status,
            Err(e) => {
                warn!("token lookup for {} failed: {}", platform, e);
                return failure_from_error(platform, &e);
            }
        };

        let Some(access_token) = status.usable_token() else {
            let message = if !status.connected {
                format!(
                    "{} account is not connected; connect it before publishing",
                    platform
                )
            } else if status.expired {
                format!("{} access token has expired; reconnect the account", platform)
            } else {
                format!("{} token store returned no access token", platform)
            };
            warn!("{}", message);
            return PublishResult::failed(platform, message, false);
        };

        match publish_with_retry(publisher, access_token, post, ctx).await {
            Ok(outcome) => {
                info!("published to {}: {}", platform, outcome.post_id);
                self.history.record(post, &outcome.post_id).await;
                PublishResult::succeeded(platform, outcome.post_id, outcome.message)
            }
            Err(e) => {
                warn!("failed to publish to {}: {}", platform, e);
                failure_from_error(platform, &e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{HistoryStore, PublishedRecord};
    use crate::platforms::mock::MockPublisher;
    use crate::types::TokenStatus;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct StaticTokens {
        statuses: HashMap<Platform, TokenStatus>,
    }

    impl StaticTokens {
        fn all_active() -> Arc<Self> {
            let statuses = Platform::all()
                .into_iter()
                .map(|p| (p, TokenStatus::active(format!("{}-token", p))))
                .collect();
            Arc::new(Self { statuses })
        }

        fn with(statuses: Vec<(Platform, TokenStatus)>) -> Arc<Self> {
            Arc::new(Self {
                statuses: statuses.into_iter().collect(),
            })
        }
    }

    #[async_trait]
    impl TokenStore for StaticTokens {
        async fn platform_token(&self, platform: Platform) -> Result<TokenStatus> {
            Ok(self
                .statuses
                .get(&platform)
                .cloned()
                .unwrap_or_else(TokenStatus::disconnected))
        }
    }

    struct RecordingHistory {
        records: Mutex<Vec<PublishedRecord>>,
        fail: bool,
    }

    impl RecordingHistory {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                records: Mutex::new(Vec::new()),
                fail: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                records: Mutex::new(Vec::new()),
                fail: true,
            })
        }

        fn recorded_post_ids(&self) -> Vec<String> {
            self.records
                .lock()
                .unwrap()
                .iter()
                .map(|r| r.post_id.clone())
                .collect()
        }
    }

    #[async_trait]
    impl HistoryStore for RecordingHistory {
        async fn save_published(&self, record: &PublishedRecord) -> Result<()> {
            if self.fail {
                return Err(
                    PlatformError::Network("history store unreachable".to_string()).into(),
                );
            }
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    fn publisher_with(
        publishers: Vec<Box<dyn PlatformPublisher>>,
        tokens: Arc<dyn TokenStore>,
        history: Arc<dyn HistoryStore>,
        events: EventBus,
    ) -> BatchPublisher {
        BatchPublisher::new(
            publishers,
            tokens,
            HistoryRecorder::new(history),
            events,
            Session::with_token("session-token"),
        )
        .with_inter_post_delay(Duration::ZERO)
    }

    fn post(platform: Platform) -> GeneratedPost {
        GeneratedPost::new(platform, format!("caption for {}", platform))
    }

    #[tokio::test]
    async fn test_all_platforms_succeed() {
        let history = RecordingHistory::new();
        let publisher = publisher_with(
            vec![
                Box::new(MockPublisher::success(Platform::Facebook)),
                Box::new(MockPublisher::success(Platform::Linkedin)),
                Box::new(MockPublisher::success(Platform::Youtube)),
            ],
            StaticTokens::all_active(),
            history.clone(),
            EventBus::new(64),
        );

        let posts = vec![
            post(Platform::Facebook),
            post(Platform::Linkedin),
            post(Platform::Youtube),
        ];
        let report = publisher
            .publish_batch(&posts, &PublishContext::default())
            .await
            .unwrap();

        assert_eq!(report.summary.total, 3);
        assert_eq!(report.summary.successful, 3);
        assert_eq!(report.summary.failed, 0);
        assert!(report.all_succeeded());
        assert_eq!(history.recorded_post_ids().len(), 3);
    }

    #[tokio::test]
    async fn test_missing_session_token_aborts_before_any_attempt() {
        let mock = MockPublisher::success(Platform::Facebook);
        let calls = mock.config().publish_calls;

        let publisher = BatchPublisher::new(
            vec![Box::new(mock)],
            StaticTokens::all_active(),
            HistoryRecorder::new(RecordingHistory::new()),
            EventBus::new(64),
            Session::anonymous(),
        )
        .with_inter_post_delay(Duration::ZERO);

        let err = publisher
            .publish_batch(&[post(Platform::Facebook)], &PublishContext::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CrosscastError::Platform(PlatformError::Authentication(_))
        ));
        assert_eq!(*calls.lock().unwrap(), 0, "no adapter may be invoked");
    }

    #[tokio::test]
    async fn test_duplicate_platform_rejected() {
        let publisher = publisher_with(
            vec![Box::new(MockPublisher::success(Platform::Facebook))],
            StaticTokens::all_active(),
            RecordingHistory::new(),
            EventBus::new(64),
        );

        let posts = vec![post(Platform::Facebook), post(Platform::Facebook)];
        let err = publisher
            .publish_batch(&posts, &PublishContext::default())
            .await
            .unwrap_err();

        assert!(matches!(err, CrosscastError::InvalidInput(_)));
        assert!(format!("{}", err).contains("duplicate platform"));
    }

    #[tokio::test]
    async fn test_disconnected_platform_fails_without_adapter_call() {
        let mock = MockPublisher::success(Platform::Tiktok);
        let calls = mock.config().publish_calls;

        let publisher = publisher_with(
            vec![Box::new(mock)],
            StaticTokens::with(vec![(Platform::Tiktok, TokenStatus::disconnected())]),
            RecordingHistory::new(),
            EventBus::new(64),
        );

        let mut tiktok = post(Platform::Tiktok);
        tiktok.media_url = Some("https://cdn.example.com/c.mp4".to_string());
        let report = publisher
            .publish_batch(&[tiktok], &PublishContext::default())
            .await
            .unwrap();

        let result = report.result_for(Platform::Tiktok).unwrap();
        assert!(!result.success);
        assert!(!result.retryable);
        assert!(result.error.as_ref().unwrap().contains("not connected"));
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_expired_token_fails_that_platform_only() {
        let publisher = publisher_with(
            vec![
                Box::new(MockPublisher::success(Platform::Facebook)),
                Box::new(MockPublisher::success(Platform::Linkedin)),
            ],
            StaticTokens::with(vec![
                (Platform::Facebook, TokenStatus::active("fb-tok")),
                (Platform::Linkedin, TokenStatus::lapsed()),
            ]),
            RecordingHistory::new(),
            EventBus::new(64),
        );

        let posts = vec![post(Platform::Facebook), post(Platform::Linkedin)];
        let report = publisher
            .publish_batch(&posts, &PublishContext::default())
            .await
            .unwrap();

        assert!(report.result_for(Platform::Facebook).unwrap().success);
        let linkedin = report.result_for(Platform::Linkedin).unwrap();
        assert!(!linkedin.success);
        assert!(!linkedin.retryable);
        assert!(linkedin.error.as_ref().unwrap().contains("expired"));
        assert_eq!(report.summary.successful, 1);
        assert_eq!(report.summary.failed, 1);
    }

    #[tokio::test]
    async fn test_adapter_failure_is_isolated_and_message_preserved() {
        let publisher = publisher_with(
            vec![
                Box::new(MockPublisher::success(Platform::Facebook)),
                Box::new(MockPublisher::failing(
                    Platform::Youtube,
                    PlatformError::Publishing("quota exceeded for upload".to_string()),
                )),
                Box::new(MockPublisher::success(Platform::Linkedin)),
            ],
            StaticTokens::all_active(),
            RecordingHistory::new(),
            EventBus::new(64),
        );

        let posts = vec![
            post(Platform::Facebook),
            post(Platform::Youtube),
            post(Platform::Linkedin),
        ];
        let report = publisher
            .publish_batch(&posts, &PublishContext::default())
            .await
            .unwrap();

        assert_eq!(report.summary.total, 3);
        assert_eq!(report.summary.successful, 2);
        assert_eq!(report.summary.failed, 1);

        let youtube = report.result_for(Platform::Youtube).unwrap();
        assert!(!youtube.success);
        assert!(youtube
            .error
            .as_ref()
            .unwrap()
            .contains("quota exceeded for upload"));
        assert!(youtube.retryable, "generic publish failures are retryable");
    }

    #[tokio::test]
    async fn test_auth_shaped_failure_is_not_retryable() {
        let publisher = publisher_with(
            vec![Box::new(MockPublisher::failing(
                Platform::Facebook,
                PlatformError::Publishing("please reconnect your account".to_string()),
            ))],
            StaticTokens::all_active(),
            RecordingHistory::new(),
            EventBus::new(64),
        );

        let report = publisher
            .publish_batch(&[post(Platform::Facebook)], &PublishContext::default())
            .await
            .unwrap();

        assert!(!report.result_for(Platform::Facebook).unwrap().retryable);
    }

    #[tokio::test]
    async fn test_not_implemented_platform_reports_gap() {
        let publisher = publisher_with(
            vec![Box::new(crate::platforms::instagram::InstagramPublisher::new())],
            StaticTokens::all_active(),
            RecordingHistory::new(),
            EventBus::new(64),
        );

        let report = publisher
            .publish_batch(&[post(Platform::Instagram)], &PublishContext::default())
            .await
            .unwrap();

        let result = report.result_for(Platform::Instagram).unwrap();
        assert!(!result.success);
        assert!(!result.retryable);
        assert!(result.error.as_ref().unwrap().contains("not yet supported"));
    }

    #[tokio::test]
    async fn test_progress_events_pending_then_terminal_in_order() {
        let events = EventBus::new(64);
        let mut receiver = events.subscribe();

        let publisher = publisher_with(
            vec![
                Box::new(MockPublisher::success(Platform::Facebook)),
                Box::new(MockPublisher::failing(
                    Platform::Linkedin,
                    PlatformError::Publishing("rejected".to_string()),
                )),
            ],
            StaticTokens::all_active(),
            RecordingHistory::new(),
            events,
        );

        let posts = vec![post(Platform::Facebook), post(Platform::Linkedin)];
        publisher
            .publish_batch(&posts, &PublishContext::default())
            .await
            .unwrap();

        let mut progress = Vec::new();
        while let Ok(event) = receiver.try_recv() {
            if let Event::PublishProgress {
                platform, status, ..
            } = event
            {
                progress.push((platform, status));
            }
        }

        assert_eq!(
            progress,
            vec![
                ("facebook".to_string(), ProgressStatus::Pending),
                ("facebook".to_string(), ProgressStatus::Success),
                ("linkedin".to_string(), ProgressStatus::Pending),
                ("linkedin".to_string(), ProgressStatus::Error),
            ]
        );
    }

    #[tokio::test]
    async fn test_batch_lifecycle_events() {
        let events = EventBus::new(64);
        let mut receiver = events.subscribe();

        let publisher = publisher_with(
            vec![Box::new(MockPublisher::success(Platform::Facebook))],
            StaticTokens::all_active(),
            RecordingHistory::new(),
            events,
        );

        publisher
            .publish_batch(&[post(Platform::Facebook)], &PublishContext::default())
            .await
            .unwrap();

        match receiver.try_recv().unwrap() {
            Event::BatchStarted { platforms, .. } => {
                assert_eq!(platforms, vec!["facebook"]);
            }
            other => panic!("expected BatchStarted, got {:?}", other),
        }

        let mut completed = None;
        while let Ok(event) = receiver.try_recv() {
            if let Event::BatchCompleted { summary, .. } = event {
                completed = Some(summary);
            }
        }
        let summary = completed.expect("BatchCompleted not emitted");
        assert_eq!(summary.total, 1);
        assert_eq!(summary.successful, 1);
    }

    #[tokio::test]
    async fn test_history_recorded_with_platform_post_id() {
        let history = RecordingHistory::new();
        let publisher = publisher_with(
            vec![Box::new(MockPublisher::success(Platform::Facebook))],
            StaticTokens::all_active(),
            history.clone(),
            EventBus::new(64),
        );

        publisher
            .publish_batch(&[post(Platform::Facebook)], &PublishContext::default())
            .await
            .unwrap();

        assert_eq!(history.recorded_post_ids(), vec!["facebook-mock-1"]);
    }

    #[tokio::test]
    async fn test_history_failure_does_not_flip_success() {
        let publisher = publisher_with(
            vec![Box::new(MockPublisher::success(Platform::Facebook))],
            StaticTokens::all_active(),
            RecordingHistory::failing(),
            EventBus::new(64),
        );

        let report = publisher
            .publish_batch(&[post(Platform::Facebook)], &PublishContext::default())
            .await
            .unwrap();

        let result = report.result_for(Platform::Facebook).unwrap();
        assert!(result.success);
        assert_eq!(result.post_id.as_deref(), Some("facebook-mock-1"));
    }

    #[tokio::test]
    async fn test_failed_batch_does_not_record_history() {
        let history = RecordingHistory::new();
        let publisher = publisher_with(
            vec![Box::new(MockPublisher::failing(
                Platform::Facebook,
                PlatformError::Publishing("rejected".to_string()),
            ))],
            StaticTokens::all_active(),
            history.clone(),
            EventBus::new(64),
        );

        publisher
            .publish_batch(&[post(Platform::Facebook)], &PublishContext::default())
            .await
            .unwrap();

        assert!(history.recorded_post_ids().is_empty());
    }

    #[tokio::test]
    async fn test_adapter_token_comes_from_token_store() {
        let mock = MockPublisher::success(Platform::Linkedin);
        let seen = mock.config().seen_tokens;

        let publisher = publisher_with(
            vec![Box::new(mock)],
            StaticTokens::with(vec![(Platform::Linkedin, TokenStatus::active("li-secret"))]),
            RecordingHistory::new(),
            EventBus::new(64),
        );

        publisher
            .publish_batch(&[post(Platform::Linkedin)], &PublishContext::default())
            .await
            .unwrap();

        assert_eq!(seen.lock().unwrap().as_slice(), &["li-secret".to_string()]);
    }

    #[tokio::test]
    async fn test_transient_failure_retried_within_step() {
        let mock = MockPublisher::flaky(
            Platform::Youtube,
            1,
            PlatformError::Network("connection reset".to_string()),
        );
        let calls = mock.config().publish_calls;

        let publisher = publisher_with(
            vec![Box::new(mock)],
            StaticTokens::all_active(),
            RecordingHistory::new(),
            EventBus::new(64),
        );

        let report = publisher
            .publish_batch(&[post(Platform::Youtube)], &PublishContext::default())
            .await
            .unwrap();

        assert!(report.result_for(Platform::Youtube).unwrap().success);
        assert_eq!(*calls.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_permanent_failure_not_retried() {
        let mock = MockPublisher::failing(
            Platform::Facebook,
            PlatformError::Validation("caption too long".to_string()),
        );
        let calls = mock.config().publish_calls;

        let publisher = publisher_with(
            vec![Box::new(mock)],
            StaticTokens::all_active(),
            RecordingHistory::new(),
            EventBus::new(64),
        );

        let report = publisher
            .publish_batch(&[post(Platform::Facebook)], &PublishContext::default())
            .await
            .unwrap();

        let result = report.result_for(Platform::Facebook).unwrap();
        assert!(!result.success);
        assert!(!result.retryable);
        assert_eq!(*calls.lock().unwrap(), 1, "validation errors never retry");
    }

    #[tokio::test]
    async fn test_missing_adapter_reports_failure() {
        let publisher = publisher_with(
            vec![],
            StaticTokens::all_active(),
            RecordingHistory::new(),
            EventBus::new(64),
        );

        let report = publisher
            .publish_batch(&[post(Platform::Twitter)], &PublishContext::default())
            .await
            .unwrap();

        let result = report.result_for(Platform::Twitter).unwrap();
        assert!(!result.success);
        assert!(result
            .error
            .as_ref()
            .unwrap()
            .contains("no publisher available"));
    }

    #[tokio::test]
    async fn test_empty_batch_yields_empty_report() {
        let publisher = publisher_with(
            vec![],
            StaticTokens::all_active(),
            RecordingHistory::new(),
            EventBus::new(64),
        );

        let report = publisher
            .publish_batch(&[], &PublishContext::default())
            .await
            .unwrap();

        assert_eq!(report.summary.total, 0);
        assert!(report.all_succeeded());
    }

    #[test]
    fn test_message_suggests_reconnect() {
        assert!(message_suggests_reconnect("Authentication failed"));
        assert!(message_suggests_reconnect("please connect your account"));
        assert!(message_suggests_reconnect("token EXPIRED"));
        assert!(!message_suggests_reconnect("upload quota exceeded"));
    }

    #[test]
    fn test_classify_retryable() {
        assert!(!classify_retryable(&PlatformError::Authentication(
            "bad token".to_string()
        )));
        assert!(!classify_retryable(&PlatformError::Validation(
            "no video".to_string()
        )));
        assert!(!classify_retryable(&PlatformError::NotImplemented(
            "instagram".to_string()
        )));
        assert!(classify_retryable(&PlatformError::Network(
            "timeout".to_string()
        )));
        assert!(classify_retryable(&PlatformError::RateLimit(
            "slow down".to_string()
        )));
        assert!(classify_retryable(&PlatformError::Publishing(
            "server hiccup".to_string()
        )));
        assert!(!classify_retryable(&PlatformError::Publishing(
            "token expired upstream".to_string()
        )));
    }

    #[test]
    fn test_is_transient() {
        assert!(is_transient(&PlatformError::Network("x".to_string())));
        assert!(is_transient(&PlatformError::RateLimit("x".to_string())));
        assert!(!is_transient(&PlatformError::Publishing("x".to_string())));
        assert!(!is_transient(&PlatformError::Authentication("x".to_string())));
    }
}
