//! LocalChannel - In-Process Push Channel
//!
//! Same fan-out semantics as the Redis transport with no network behind it.
//! Used by tests and by embedders that feed events from elsewhere.

use std::sync::Arc;

use serde_json::Value;

use crate::channel::client::{ChannelClient, FanoutRegistry, Subscription};

/// In-process channel implementation
#[derive(Clone)]
pub struct LocalChannel {
    registry: Arc<FanoutRegistry>,
}

impl LocalChannel {
    /// Create an empty local channel
    pub fn new() -> Self {
        Self {
            registry: FanoutRegistry::new(),
        }
    }

    /// Inject a message as if it arrived from the server
    pub fn publish(&self, event: &str, payload: Value) -> usize {
        self.registry.publish(event, payload)
    }
}

impl Default for LocalChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelClient for LocalChannel {
    fn subscribe(&self, event: &str) -> Subscription {
        self.registry.subscribe(event)
    }
}
