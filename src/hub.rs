//! PortalHub - Unified Client Entry Point
//!
//! Owns the API client, the push-channel client, and one live feed per
//! content type. Events for the embedding layer (logs, connection state,
//! submission outcomes) are multiplexed into a single channel.

use std::sync::Arc;

use chrono::{DateTime, Local};
use crossbeam_channel::{Receiver, Sender};

use crate::api::resources::{AboutUs, Events, Faq, Services, SyncedResource};
use crate::api::{ApiClient, TokenStore};
use crate::channel::{ChannelClient, RedisChannel};
use crate::config::AppConfig;
use crate::domain::record::RecordId;
use crate::domain::{AboutUsSection, EventRecord, FaqEntry, ServiceOffer};
use crate::error::{Error, Result};
use crate::forms::{submit_associate, submit_volunteer, AssociateForm, VolunteerForm};
use crate::sync::{FeedOptions, RecordFeed};

/// Log severity for embedder-facing log events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Which application pipeline produced an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionKind {
    Associate,
    Volunteer,
}

/// Events surfaced to the embedding layer
#[derive(Debug, Clone)]
pub enum PortalEvent {
    /// Log message
    Log {
        level: LogLevel,
        message: String,
        timestamp: DateTime<Local>,
    },

    /// Push-channel connection status changed
    ConnectionChanged {
        service: Arc<str>,
        connected: bool,
        detail: String,
    },

    /// An application was submitted, documents included
    SubmissionCompleted {
        kind: SubmissionKind,
        record_id: String,
    },

    /// Submission failed; `partial` means the record exists without documents
    SubmissionFailed {
        kind: SubmissionKind,
        message: String,
        partial: bool,
    },
}

impl PortalEvent {
    /// Create a log event with current timestamp
    pub fn log(level: LogLevel, message: impl Into<String>) -> Self {
        Self::Log {
            level,
            message: message.into(),
            timestamp: Local::now(),
        }
    }

    /// Create an info log event
    pub fn info(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Info, message)
    }

    /// Create a warning log event
    pub fn warn(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Warn, message)
    }

    /// Create an error log event
    pub fn error(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Error, message)
    }
}

/// Central hub for the portal data layer
pub struct PortalHub {
    api: ApiClient,
    channel: Arc<dyn ChannelClient>,
    about_us: RecordFeed<AboutUsSection>,
    events: RecordFeed<EventRecord>,
    services: RecordFeed<ServiceOffer>,
    faq: RecordFeed<FaqEntry>,
    tx: Sender<PortalEvent>,
    rx: Receiver<PortalEvent>,
}

impl PortalHub {
    /// Connect to the backend and the Redis push channel.
    ///
    /// Must run inside a tokio runtime; the channel driver and the feed
    /// tasks are spawned on it.
    pub fn connect(config: &AppConfig) -> Result<Self> {
        let (tx, rx) = crossbeam_channel::unbounded();
        let channel: Arc<dyn ChannelClient> =
            Arc::new(RedisChannel::connect(&config.channel, tx.clone()));
        Self::with_channel(config, channel, tx, rx)
    }

    /// Build a hub over an injected channel client (tests, embedders)
    pub fn with_channel(
        config: &AppConfig,
        channel: Arc<dyn ChannelClient>,
        tx: Sender<PortalEvent>,
        rx: Receiver<PortalEvent>,
    ) -> Result<Self> {
        let api = ApiClient::new(&config.api)?;

        // Bearer token from local storage; a missing token just means
        // anonymous reads until the embedder sets one.
        match TokenStore::open().and_then(|store| store.load()) {
            Ok(token) => api.set_token(token),
            Err(err) => {
                tracing::warn!("Token load failed: {err}");
            }
        }

        let about_us = Self::feed::<AboutUs>(&api, channel.as_ref());
        let events = Self::feed::<Events>(&api, channel.as_ref());
        let services = Self::feed::<Services>(&api, channel.as_ref());
        let faq = Self::feed::<Faq>(&api, channel.as_ref());

        let _ = tx.send(PortalEvent::info("PortalHub initialized"));

        Ok(Self {
            api,
            channel,
            about_us,
            events,
            services,
            faq,
            tx,
            rx,
        })
    }

    fn feed<R: SyncedResource>(
        api: &ApiClient,
        channel: &dyn ChannelClient,
    ) -> RecordFeed<R::Item> {
        let api = api.clone();
        RecordFeed::spawn(
            async move { api.get_list(R::PATH).await },
            channel.subscribe(R::EVENT),
            FeedOptions::default(),
        )
    }

    /// Receiver for embedder-facing events
    pub fn notifications(&self) -> Receiver<PortalEvent> {
        self.rx.clone()
    }

    /// Tear the hub down: feeds abort, subscriptions release, and the
    /// push-channel driver exits once its handle is gone
    pub fn stop(self) {
        let _ = self.tx.send(PortalEvent::info("PortalHub stopped"));
    }

    /// Emit a log event to the embedding layer
    pub fn log(&self, event: PortalEvent) {
        let _ = self.tx.send(event);
    }

    /// The shared API client
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// The shared push-channel client
    pub fn channel(&self) -> &Arc<dyn ChannelClient> {
        &self.channel
    }

    // ==================== Content Feeds ====================

    pub fn about_us(&self) -> &RecordFeed<AboutUsSection> {
        &self.about_us
    }

    pub fn events(&self) -> &RecordFeed<EventRecord> {
        &self.events
    }

    pub fn services(&self) -> &RecordFeed<ServiceOffer> {
        &self.services
    }

    pub fn faq(&self) -> &RecordFeed<FaqEntry> {
        &self.faq
    }

    // ==================== Applications ====================

    /// Submit an associate application, surfacing the outcome as an event
    pub async fn submit_associate(&self, form: &AssociateForm) -> Result<RecordId> {
        self.report(SubmissionKind::Associate, submit_associate(&self.api, form).await)
    }

    /// Submit a volunteer application, surfacing the outcome as an event
    pub async fn submit_volunteer(&self, form: &VolunteerForm) -> Result<RecordId> {
        self.report(SubmissionKind::Volunteer, submit_volunteer(&self.api, form).await)
    }

    fn report(&self, kind: SubmissionKind, result: Result<RecordId>) -> Result<RecordId> {
        match &result {
            Ok(record_id) => {
                let _ = self.tx.send(PortalEvent::SubmissionCompleted {
                    kind,
                    record_id: record_id.to_string(),
                });
            }
            Err(err) => {
                let _ = self.tx.send(PortalEvent::SubmissionFailed {
                    kind,
                    message: err.to_string(),
                    partial: matches!(err, Error::PartialSubmission { .. }),
                });
            }
        }
        result
    }
}

impl std::fmt::Debug for PortalHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortalHub").field("api", &self.api).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::LocalChannel;

    #[tokio::test]
    async fn test_hub_over_local_channel() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut config = AppConfig::default();
        // nothing listens here, so the initial fetches fail without
        // leaving the machine
        config.api.base_url = "http://127.0.0.1:9".to_string();
        let hub = PortalHub::with_channel(&config, Arc::new(LocalChannel::new()), tx, rx)
            .expect("hub");

        // init log event is queued for the embedder
        let first = hub.notifications().recv().expect("event");
        assert!(matches!(first, PortalEvent::Log { .. }));

        // feeds settle into Failed and keep their (empty) records
        hub.faq().settled().await;
        let snap = hub.faq().store().snapshot();
        assert!(matches!(snap.phase, crate::sync::LoadPhase::Failed(_)));
        assert!(snap.records.is_empty());
    }
}
