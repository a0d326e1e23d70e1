//! Opt-in diagnostic tracing on stderr.
//!
//! Nothing is installed unless `DOCKER_SETUP_LOG` is set (an `EnvFilter`
//! directive) or the caller asks for verbose output. Stdout stays reserved
//! for the prefixed status lines.

use std::env;

use once_cell::sync::OnceCell;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

static INIT: OnceCell<()> = OnceCell::new();

/// Filter directive to use, if tracing should be enabled at all.
pub fn tracing_filter(verbose: bool) -> Option<String> {
    let from_env = env::var("DOCKER_SETUP_LOG")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    match from_env {
        Some(f) => Some(f),
        None if verbose => Some("debug".to_string()),
        None => None,
    }
}

/// Install the stderr fmt subscriber. Returns true when this call installed it.
pub fn telemetry_init(verbose: bool) -> anyhow::Result<bool> {
    if INIT.get().is_some() {
        return Ok(false);
    }
    let Some(filter) = tracing_filter(verbose) else {
        return Ok(false);
    };

    let env_filter = EnvFilter::try_new(&filter)
        .map_err(|e| anyhow::anyhow!("invalid DOCKER_SETUP_LOG filter {filter:?}: {e}"))?;
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing subscriber already set: {e}"))?;

    let _ = INIT.set(());
    Ok(true)
}
