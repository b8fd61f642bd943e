//! Browser console logging

use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt};
use tracing_web::MakeWebConsoleWriter;

/// Route `tracing` output to the browser console.
///
/// An unparsable `log_level` falls back to `info`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init_browser_tracing(log_level: &str) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    // No ANSI colours or wall clock in the browser console
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new());

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()
}
