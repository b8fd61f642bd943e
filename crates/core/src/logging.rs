//! Native tracing subscriber setup
//!
//! Browser builds log through `tracing-web` instead; see the frontend crate.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing with the given default level.
///
/// `RUST_LOG` takes precedence over `log_level`; an unparsable filter
/// falls back to `info`.
///
/// Native hosts load their settings first and pass the configured level:
///
/// ```no_run
/// use tutordesk_core::ConsoleConfig;
/// use tutordesk_core::logging::init_tracing;
///
/// # fn main() -> anyhow::Result<()> {
/// let config = ConsoleConfig::from_env()?;
/// init_tracing(&config.log_level)?;
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init_tracing(log_level: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()?;

    Ok(())
}
