//! RecordFeed - Fetch + Subscribe Lifecycle
//!
//! Wires one initial fetch and one event subscription to a shared store.
//! The fetch and the subscription run concurrently: events can arrive before
//! the fetch resolves. By default those early events are buffered and
//! replayed once the fetch result lands, so a `created` announced during the
//! fetch window is not lost when server state replaces the cache. The legacy
//! apply-then-overwrite behavior stays available behind `FeedOptions` for
//! embedders that want the old semantics.
//!
//! Dropping the feed aborts its task, which drops the subscription and
//! removes the channel listener.

use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::channel::Subscription;
use crate::constants::EARLY_EVENT_BUFFER_CAPACITY;
use crate::domain::record::Record;
use crate::error::Result;
use crate::sync::event::RecordEvent;
use crate::sync::store::RecordStore;
use crate::utils::bounded::BoundedDeque;

/// Feed behavior knobs
#[derive(Clone, Copy, Debug)]
pub struct FeedOptions {
    replay_early_events: bool,
}

impl FeedOptions {
    /// Whether events received before the initial fetch resolves are
    /// replayed after it (default: true)
    pub fn replay_early_events(mut self, replay: bool) -> Self {
        self.replay_early_events = replay;
        self
    }
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            replay_early_events: true,
        }
    }
}

/// A live feed for one record type
pub struct RecordFeed<T: Record> {
    store: Arc<RecordStore<T>>,
    task: JoinHandle<()>,
}

impl<T: Record> RecordFeed<T> {
    /// Start a feed from a fetch future and an event subscription
    pub fn spawn<F>(fetch: F, subscription: Subscription, options: FeedOptions) -> Self
    where
        F: Future<Output = Result<Vec<T>>> + Send + 'static,
    {
        let store = Arc::new(RecordStore::new());
        let task = tokio::spawn(run(Arc::clone(&store), fetch, subscription, options));
        Self { store, task }
    }

    /// The reactive store this feed maintains
    pub fn store(&self) -> &Arc<RecordStore<T>> {
        &self.store
    }

    /// Wait until the initial fetch has resolved (Ready or Failed)
    pub async fn settled(&self) {
        let mut rx = self.store.watch();
        loop {
            if self.store.snapshot().phase != crate::sync::store::LoadPhase::Loading {
                return;
            }
            if rx.changed().await.is_err() {
                return;
            }
        }
    }
}

impl<T: Record> Drop for RecordFeed<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run<T, F>(
    store: Arc<RecordStore<T>>,
    fetch: F,
    mut subscription: Subscription,
    options: FeedOptions,
) where
    T: Record,
    F: Future<Output = Result<Vec<T>>> + Send + 'static,
{
    let event_name = subscription.event().to_string();
    let mut early: BoundedDeque<RecordEvent<T>> = BoundedDeque::new(EARLY_EVENT_BUFFER_CAPACITY);
    let mut fetch_done = false;

    store.mark_loading();
    tokio::pin!(fetch);

    loop {
        tokio::select! {
            result = &mut fetch, if !fetch_done => {
                fetch_done = true;
                match result {
                    Ok(records) => {
                        tracing::debug!("'{event_name}': fetched {} records", records.len());
                        store.replace_all(records);
                        for event in early.drain() {
                            store.apply(&event);
                        }
                    }
                    Err(err) => {
                        tracing::warn!("'{event_name}': fetch failed: {err}");
                        store.mark_failed(err.to_string());
                    }
                }
            }
            msg = subscription.recv() => {
                let Some(msg) = msg else {
                    tracing::debug!("'{event_name}': channel closed, feed stopping");
                    return;
                };
                let Some(event) = RecordEvent::<T>::decode(&msg.payload) else {
                    continue;
                };
                // An event during the fetch window applies to whatever the
                // cache holds right now; the buffered copy is replayed after
                // the fetch result replaces it.
                store.apply(&event);
                if !fetch_done && options.replay_early_events {
                    early.push(event);
                }
            }
        }
    }
}
