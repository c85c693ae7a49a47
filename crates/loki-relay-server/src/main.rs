#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::todo))]

use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use loki_relay::api::{self, ApiState};
use loki_relay::config::Config;
use loki_relay::logs::LogDispatcher;
use loki_relay::loki::LokiClient;

#[tokio::main]
pub async fn main() {
    let config = match Config::from_env() {
        Ok(c) => Arc::new(c),
        Err(e) => {
            eprintln!("Error creating config on relay startup: {e}");
            return;
        }
    };

    // Local subscriber: this is where the fallback sink lands when Loki
    // is unreachable.
    let env_filter = format!("hyper=off,h2=off,rustls=off,{}", config.log_level);

    #[allow(clippy::expect_used)]
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_new(env_filter).expect("could not parse log level in configuration"),
        )
        .with_level(true)
        .with_target(true)
        .without_time()
        .finish();

    #[allow(clippy::expect_used)]
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    debug!("Logging subsystem enabled");

    let client = Arc::new(LokiClient::new(&config.loki_url));
    let logger = Arc::new(LogDispatcher::new(
        Arc::clone(&client),
        &config.default_label,
    ));

    logger.info("Loki relay backend started successfully", None);
    logger.info(format!("Loki URL configured: {}", config.loki_url), None);
    logger.info(format!("Default label: {}", config.default_label), None);

    let shutdown_token = CancellationToken::new();
    let signal_token = shutdown_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received ctrl-c, shutting down");
            signal_token.cancel();
        }
    });

    let state = ApiState { client, logger };
    if let Err(e) = api::serve(&config, state, shutdown_token).await {
        error!("Error when running the relay API server: {e}");
    }
}
