//! Logging bootstrap.
//!
//! Installs a global `tracing` subscriber in either human-readable or JSON
//! form. `RUST_LOG` overrides the configured filter when it is set.

use anyhow::Context;
use bookfinder_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing pipeline. Fails if a global subscriber already exists.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = env_filter(&settings.filter)?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = match settings.log_format {
        LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().flatten_event(true))
            .try_init(),
    };
    result.with_context(|| "failed to install tracing subscriber")?;

    tracing::debug!(
        target: "bookfinder-telemetry",
        format = ?settings.log_format,
        "telemetry initialized"
    );
    Ok(())
}

fn env_filter(fallback: &str) -> anyhow::Result<EnvFilter> {
    let from_env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    select_filter(from_env.as_deref(), fallback)
}

/// A usable `RUST_LOG` value wins; otherwise the configured directive must parse.
fn select_filter(from_env: Option<&str>, fallback: &str) -> anyhow::Result<EnvFilter> {
    if let Some(filter) = from_env.and_then(|directives| EnvFilter::try_new(directives).ok()) {
        return Ok(filter);
    }
    EnvFilter::try_new(fallback).with_context(|| format!("invalid log filter '{}'", fallback))
}
