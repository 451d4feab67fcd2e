//! Push-Channel Client Abstraction
//!
//! One process-wide channel connection multiplexes named events for every
//! feature. The client is an injected dependency with an explicit
//! subscribe/unsubscribe lifecycle: a `Subscription` removes its listener when
//! dropped, so a recreated view never double-handles events.

use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::{broadcast, mpsc};

use crate::constants::CHANNEL_FANOUT_CAPACITY;

/// One message delivered on a named event
#[derive(Debug, Clone)]
pub struct ChannelMessage {
    /// Event name (one per resource type)
    pub event: Arc<str>,
    /// Raw JSON payload, `{action, data?, id?}`
    pub payload: Value,
}

/// A push-channel client able to hand out per-event subscriptions
pub trait ChannelClient: Send + Sync {
    /// Register a listener for one event name
    fn subscribe(&self, event: &str) -> Subscription;
}

/// Commands from the fan-out registry to the transport driver
#[derive(Debug)]
pub(crate) enum TransportCommand {
    /// First listener appeared for this event
    Subscribe(String),
    /// Last listener went away
    Unsubscribe(String),
}

struct Topic {
    tx: broadcast::Sender<ChannelMessage>,
    listeners: usize,
}

/// Per-event fan-out shared by every channel implementation.
///
/// Holds the transport sender only weakly: the channel owner keeps the one
/// strong sender, so dropping the channel closes the command stream and the
/// driver task can observe shutdown.
pub(crate) struct FanoutRegistry {
    topics: Mutex<AHashMap<String, Topic>>,
    transport_tx: Mutex<Option<mpsc::WeakUnboundedSender<TransportCommand>>>,
}

impl FanoutRegistry {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            topics: Mutex::new(AHashMap::new()),
            transport_tx: Mutex::new(None),
        })
    }

    /// Attach a transport command sink (Redis driver); local channels skip this
    pub(crate) fn set_transport(&self, tx: mpsc::WeakUnboundedSender<TransportCommand>) {
        *self.transport_tx.lock() = Some(tx);
    }

    pub(crate) fn subscribe(self: &Arc<Self>, event: &str) -> Subscription {
        let rx = {
            let mut topics = self.topics.lock();
            match topics.get_mut(event) {
                Some(topic) => {
                    topic.listeners += 1;
                    topic.tx.subscribe()
                }
                None => {
                    let (tx, rx) = broadcast::channel(CHANNEL_FANOUT_CAPACITY);
                    topics.insert(
                        event.to_string(),
                        Topic { tx, listeners: 1 },
                    );
                    self.notify_transport(TransportCommand::Subscribe(event.to_string()));
                    rx
                }
            }
        };
        Subscription {
            event: Arc::from(event),
            rx,
            _guard: SubscriptionGuard {
                registry: Arc::clone(self),
                event: event.to_string(),
            },
        }
    }

    /// Deliver a message to current listeners, returns how many received it
    pub(crate) fn publish(&self, event: &str, payload: Value) -> usize {
        let topics = self.topics.lock();
        match topics.get(event) {
            Some(topic) => topic
                .tx
                .send(ChannelMessage {
                    event: Arc::from(event),
                    payload,
                })
                .unwrap_or(0),
            None => 0,
        }
    }

    fn release(&self, event: &str) {
        let mut topics = self.topics.lock();
        if let Some(topic) = topics.get_mut(event) {
            topic.listeners -= 1;
            if topic.listeners == 0 {
                topics.remove(event);
                self.notify_transport(TransportCommand::Unsubscribe(event.to_string()));
            }
        }
    }

    /// Event names with at least one live listener
    pub(crate) fn active_events(&self) -> Vec<String> {
        self.topics.lock().keys().cloned().collect()
    }

    fn notify_transport(&self, cmd: TransportCommand) {
        let tx = self.transport_tx.lock().as_ref().and_then(|weak| weak.upgrade());
        if let Some(tx) = tx {
            let _ = tx.send(cmd);
        }
    }
}

/// Live registration for one event name; dropping it removes the listener
pub struct Subscription {
    event: Arc<str>,
    rx: broadcast::Receiver<ChannelMessage>,
    _guard: SubscriptionGuard,
}

impl Subscription {
    /// Event name this subscription listens on
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Next message, `None` once the channel is gone.
    ///
    /// A lagged receiver skips to the oldest retained message; content pushes
    /// are low-volume so this only fires under pathological backlog.
    pub async fn recv(&mut self) -> Option<ChannelMessage> {
        loop {
            match self.rx.recv().await {
                Ok(msg) => return Some(msg),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!("Subscription '{}' lagged, skipped {skipped}", self.event);
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

struct SubscriptionGuard {
    registry: Arc<FanoutRegistry>,
    event: String,
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        self.registry.release(&self.event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let registry = FanoutRegistry::new();
        let mut sub = registry.subscribe("faq");
        assert_eq!(registry.publish("faq", json!({"action": "deleted", "id": 1})), 1);
        let msg = sub.recv().await.expect("message");
        assert_eq!(msg.event.as_ref(), "faq");
    }

    #[tokio::test]
    async fn test_drop_unsubscribes() {
        let registry = FanoutRegistry::new();
        let sub = registry.subscribe("faq");
        assert_eq!(registry.active_events(), vec!["faq".to_string()]);
        drop(sub);
        assert!(registry.active_events().is_empty());
        assert_eq!(registry.publish("faq", json!({})), 0);
    }

    #[tokio::test]
    async fn test_events_are_isolated_per_name() {
        let registry = FanoutRegistry::new();
        let mut faq = registry.subscribe("faq");
        let _eventos = registry.subscribe("eventos");
        registry.publish("eventos", json!({"action": "deleted", "id": 9}));
        registry.publish("faq", json!({"action": "deleted", "id": 1}));
        let msg = faq.recv().await.expect("message");
        assert_eq!(msg.payload["id"], 1);
    }
}
