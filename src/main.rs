//! Portal Sync Runner - Main Entry Point
//!
//! Headless runner: connects the hub, mirrors embedder events into the log,
//! and reports content counts as the feeds settle.

use ganaderos_portal::config::AppConfig;
use ganaderos_portal::hub::{LogLevel, PortalEvent, PortalHub};
use ganaderos_portal::utils::config_store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let file_appender = tracing_appender::rolling::daily(
        config_store::app_data_dir()?.join("logs"),
        "portal.log",
    );
    let (file_writer, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(file_writer)
        .with_ansi(false)
        .init();

    tracing::info!("Starting portal sync runner...");

    let config: AppConfig = config_store::load_config("config.toml")?;
    let hub = PortalHub::connect(&config)?;

    let notifications = hub.notifications();
    std::thread::spawn(move || {
        for event in notifications.iter() {
            match event {
                PortalEvent::Log { level, message, .. } => match level {
                    LogLevel::Debug => tracing::debug!("{message}"),
                    LogLevel::Info => tracing::info!("{message}"),
                    LogLevel::Warn => tracing::warn!("{message}"),
                    LogLevel::Error => tracing::error!("{message}"),
                },
                PortalEvent::ConnectionChanged {
                    service,
                    connected,
                    detail,
                } => {
                    tracing::info!("{service}: connected={connected} ({detail})");
                }
                PortalEvent::SubmissionCompleted { kind, record_id } => {
                    tracing::info!("{kind:?} application {record_id} submitted");
                }
                PortalEvent::SubmissionFailed {
                    kind,
                    message,
                    partial,
                } => {
                    tracing::error!("{kind:?} submission failed (partial={partial}): {message}");
                }
            }
        }
    });

    hub.about_us().settled().await;
    hub.events().settled().await;
    hub.services().settled().await;
    hub.faq().settled().await;

    tracing::info!(
        "Content synced: {} about-us, {} events, {} services, {} faq",
        hub.about_us().store().snapshot().records.len(),
        hub.events().store().snapshot().records.len(),
        hub.services().store().snapshot().records.len(),
        hub.faq().store().snapshot().records.len(),
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");
    hub.stop();
    Ok(())
}
