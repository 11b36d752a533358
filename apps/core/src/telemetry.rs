//! Telemetry setup.
//!
//! Builds the bunyan-formatted JSON subscriber the service logs through.
//! Intended to be called exactly once by the embedding process.

use tracing::subscriber::set_global_default;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

use crate::error::EngineError;

/// Installs the global tracing subscriber.
///
/// `default_filter` applies when `RUST_LOG` is unset (e.g. `"info"`).
pub fn init_telemetry(name: &str, default_filter: &str) -> Result<(), EngineError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let formatting_layer = BunyanFormattingLayer::new(name.to_string(), std::io::stdout);
    let subscriber = Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer);

    set_global_default(subscriber)
        .map_err(|e| EngineError::Config(format!("failed to install subscriber: {}", e)))
}
