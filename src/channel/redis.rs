//! RedisChannel - Redis Pub/Sub Transport
//!
//! Concrete push channel over Redis pub/sub. Every resource event name maps to
//! one Redis channel (`<namespace>:<event>`); payloads are the JSON wire shape
//! `{action, data?, id?}`. The driver task owns the Redis client, subscribes
//! and unsubscribes as listeners come and go, and re-subscribes every active
//! event after a reconnect.

use std::sync::Arc;

use crossbeam_channel::Sender;
use fred::prelude::{Builder, ClientLike, Config, EventInterface, PubsubInterface};
use tokio::sync::mpsc;

use crate::channel::client::{ChannelClient, FanoutRegistry, Subscription, TransportCommand};
use crate::channel::supervisor::{RetryConfig, Supervisor};
use crate::config::ChannelConfig;
use crate::error::{Error, Result};
use crate::hub::PortalEvent;

/// Redis-backed push channel.
///
/// Owns the only strong command sender; the registry and the driver task hold
/// it weakly, so dropping the channel closes the command stream and the driver
/// shuts down instead of reconnecting forever.
pub struct RedisChannel {
    registry: Arc<FanoutRegistry>,
    supervisor: Arc<Supervisor>,
    _cmd_tx: mpsc::UnboundedSender<TransportCommand>,
}

impl RedisChannel {
    /// Create the channel and spawn its driver task on the current runtime
    pub fn connect(config: &ChannelConfig, events: Sender<PortalEvent>) -> Self {
        let registry = FanoutRegistry::new();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        registry.set_transport(cmd_tx.downgrade());

        let supervisor = Arc::new(Supervisor::new(
            "push-channel",
            RetryConfig::default(),
            events,
        ));

        tokio::spawn(drive(
            Arc::clone(&registry),
            Arc::clone(&supervisor),
            config.clone(),
            cmd_rx,
        ));

        Self {
            registry,
            supervisor,
            _cmd_tx: cmd_tx,
        }
    }

    /// Connection supervisor (state inspection)
    pub fn supervisor(&self) -> &Supervisor {
        &self.supervisor
    }
}

impl ChannelClient for RedisChannel {
    fn subscribe(&self, event: &str) -> Subscription {
        self.registry.subscribe(event)
    }
}

fn channel_name(namespace: &str, event: &str) -> String {
    format!("{namespace}:{event}")
}

fn event_name<'a>(namespace: &str, channel: &'a str) -> Option<&'a str> {
    channel
        .strip_prefix(namespace)
        .and_then(|rest| rest.strip_prefix(':'))
}

/// Connection loop: run one session, back off, retry. Returns once the
/// channel handle is dropped, in a session or while backing off.
async fn drive(
    registry: Arc<FanoutRegistry>,
    supervisor: Arc<Supervisor>,
    config: ChannelConfig,
    mut cmd_rx: mpsc::UnboundedReceiver<TransportCommand>,
) {
    loop {
        supervisor.on_connecting();
        match run_session(&registry, &supervisor, &config, &mut cmd_rx).await {
            Ok(()) => {
                // command side dropped, the channel is shutting down
                supervisor.on_disconnected("Channel closed");
                return;
            }
            Err(err) => {
                supervisor.on_disconnected(&err.to_string());
                let Some(delay) = supervisor.next_retry_delay() else {
                    return;
                };
                let wait = tokio::time::sleep(delay);
                tokio::pin!(wait);
                loop {
                    tokio::select! {
                        _ = &mut wait => break,
                        cmd = cmd_rx.recv() => match cmd {
                            // subscriptions queued while down are covered by
                            // the active-events re-subscribe on reconnect
                            Some(_) => continue,
                            None => return,
                        },
                    }
                }
            }
        }
    }
}

/// One connected session; returns Ok only on orderly shutdown
async fn run_session(
    registry: &Arc<FanoutRegistry>,
    supervisor: &Supervisor,
    config: &ChannelConfig,
    cmd_rx: &mut mpsc::UnboundedReceiver<TransportCommand>,
) -> Result<()> {
    let url = format!("redis://{}:{}", config.host, config.port);
    let mut redis_config = Config::from_url(&url).map_err(|e| Error::Connection {
        message: format!("Bad channel URL {url}: {e}"),
    })?;
    redis_config.password = config.password.clone();

    let client = Builder::from_config(redis_config)
        .build()
        .map_err(|e| Error::Connection {
            message: format!("Channel client build failed: {e}"),
        })?;

    client.init().await.map_err(|e| Error::Connection {
        message: format!("Channel connect failed: {e}"),
    })?;
    supervisor.on_connected();

    // Re-subscribe everything that already has listeners (reconnect path)
    for event in registry.active_events() {
        client
            .subscribe(channel_name(&config.namespace, &event))
            .await
            .map_err(|e| Error::Connection {
                message: format!("Subscribe '{event}' failed: {e}"),
            })?;
    }

    let mut messages = client.message_rx();

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => match cmd {
                Some(TransportCommand::Subscribe(event)) => {
                    client
                        .subscribe(channel_name(&config.namespace, &event))
                        .await
                        .map_err(|e| Error::Connection {
                            message: format!("Subscribe '{event}' failed: {e}"),
                        })?;
                    tracing::debug!("Subscribed to '{event}'");
                }
                Some(TransportCommand::Unsubscribe(event)) => {
                    client
                        .unsubscribe(channel_name(&config.namespace, &event))
                        .await
                        .map_err(|e| Error::Connection {
                            message: format!("Unsubscribe '{event}' failed: {e}"),
                        })?;
                    tracing::debug!("Unsubscribed from '{event}'");
                }
                None => {
                    let _ = client.quit().await;
                    return Ok(());
                }
            },
            msg = messages.recv() => match msg {
                Ok(msg) => {
                    let channel = msg.channel.to_string();
                    let Some(event) = event_name(&config.namespace, &channel) else {
                        tracing::debug!("Ignoring message on foreign channel '{channel}'");
                        continue;
                    };
                    let Some(text) = msg.value.as_str() else {
                        tracing::warn!("Non-text payload on '{channel}'");
                        continue;
                    };
                    match serde_json::from_str(&text) {
                        Ok(payload) => {
                            registry.publish(event, payload);
                        }
                        Err(err) => {
                            tracing::warn!("Bad JSON on '{channel}': {err}");
                        }
                    }
                }
                Err(err) => {
                    return Err(Error::Connection {
                        message: format!("Message stream ended: {err}"),
                    });
                }
            },
        }
    }
}
