//! # wifitriggersd — wifitriggers daemon
//!
//! Composition root that wires all adapters together and runs the polling
//! driver.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialize logging
//! - Construct the station backend and notification adapters
//! - Build the switches and the binding engine
//! - Run the driver until SIGTERM/SIGINT
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use wifitriggers_adapter_hostapd::HostapdClient;
use wifitriggers_adapter_notify::{IftttTrigger, SlackWebhook};
use wifitriggers_app::aggregator::StationAggregator;
use wifitriggers_app::driver::Driver;
use wifitriggers_app::engine::EngineBuilder;
use wifitriggers_app::presence::{presence_rules, subset_rules};
use wifitriggers_app::switch::Switch;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Access point
    let backend = HostapdClient::new(&config.access_point)?;
    let reader = StationAggregator::new(backend);

    // Rules
    let engine = rules(&config)?.build();

    // Driver
    let driver = Driver::new(reader, engine, config.interval())?;
    tracing::info!(
        access_point = %config.access_point.url,
        tracked = config.presence.tracked.len(),
        watched = config.watch.devices.len(),
        "wifitriggersd starting"
    );

    let cancel = CancellationToken::new();
    tokio::spawn(shutdown_on_signal(cancel.clone()));

    match driver.run(&cancel).await {
        Err(err) if err.is_canceled() => {
            tracing::info!("wifitriggersd stopped");
            Ok(())
        }
        Err(err) => Err(err.into()),
        Ok(()) => Ok(()),
    }
}

fn rules(config: &Config) -> Result<EngineBuilder, Box<dyn std::error::Error>> {
    let home = Arc::new(Switch::new(
        "home",
        IftttTrigger::new(&config.ifttt)?,
        config.presence.home_command.clone(),
        config.presence.away_command.clone(),
    ));
    let mut rules = presence_rules(config.presence.tracked.iter().copied(), &home);

    if !config.watch.devices.is_empty() {
        let cameras = Arc::new(Switch::new(
            "cameras",
            SlackWebhook::new(&config.slack)?,
            config.watch.connected_message.clone(),
            config.watch.disconnected_message.clone(),
        ));
        rules = rules.extend(subset_rules(config.watch.devices.iter().copied(), &cameras));
    }

    Ok(rules)
}

/// Cancel `cancel` on Ctrl-C or SIGTERM.
async fn shutdown_on_signal(cancel: CancellationToken) {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(%err, "unable to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::warn!(%err, "unable to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("shutdown signal received");
    cancel.cancel();
}
