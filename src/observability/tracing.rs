// Global subscriber setup

use crate::config::ObservabilityConfig;
use crate::errors::{IdmError, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a global tracing subscriber for an embedding application
///
/// The library never calls this itself; [`ClientLogger`](super::ClientLogger)
/// events only become visible once some subscriber is installed.
pub fn init_tracing(config: &ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.log_format.as_str() {
        "json" => registry
            .with(fmt::layer().json().flatten_event(true))
            .try_init(),
        _ => registry.with(fmt::layer().pretty()).try_init(),
    };
    installed.map_err(|e| IdmError::Configuration(e.to_string()))?;

    tracing::debug!(
        "Tracing initialized (level: {}, format: {})",
        config.log_level,
        config.log_format
    );

    Ok(())
}
