//! Tracing subscriber initialization.
//!
//! `RUST_LOG` takes precedence over the configured `server.log_level`.
//! Output is human-readable by default, or one JSON object per line when
//! `server.log_format = json`.

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, ServerConfig};

/// Errors raised while installing the global subscriber.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    InvalidFilter(#[from] ParseError),

    #[error("Failed to install tracing subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Builds the log filter from `RUST_LOG`, falling back to `default_directives`.
pub fn env_filter(default_directives: &str) -> Result<EnvFilter, ParseError> {
    EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_directives))
}

/// Initialize the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the filter directives are invalid or a global
/// subscriber has already been set.
pub fn init_tracing(server: &ServerConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(&server.log_level)?;

    match server.log_format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()?,
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_target(true),
            )
            .try_init()?,
    }

    Ok(())
}
