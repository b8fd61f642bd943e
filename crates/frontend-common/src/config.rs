//! Browser build configuration
//!
//! The wasm bundle cannot read files or the environment at runtime, so the
//! values are fixed at compile time from `TUTORDESK_*` variables.

use tutordesk_core::{ConsoleConfig, CoreResult, SessionConfig};

pub struct BuildConfig;

impl BuildConfig {
    /// Backend base URL
    pub const API_BASE_URL: Option<&'static str> = option_env!("TUTORDESK_API_BASE_URL");

    /// Pre-shared secret the session cookie is sealed with
    pub const SESSION_SECRET: Option<&'static str> = option_env!("TUTORDESK_SESSION_SECRET");

    /// Log level for the browser console
    pub const LOG_LEVEL: Option<&'static str> = option_env!("TUTORDESK_LOG_LEVEL");

    /// Console configuration with build-time overrides applied.
    ///
    /// Fails when the bundle was built without `TUTORDESK_SESSION_SECRET`.
    pub fn console() -> CoreResult<ConsoleConfig> {
        Self::with_overrides(Self::API_BASE_URL, Self::SESSION_SECRET, Self::LOG_LEVEL)
    }

    fn with_overrides(
        api_base_url: Option<&str>,
        secret: Option<&str>,
        log_level: Option<&str>,
    ) -> CoreResult<ConsoleConfig> {
        let defaults = ConsoleConfig::default();
        let config = ConsoleConfig {
            api_base_url: api_base_url.map_or(defaults.api_base_url, str::to_string),
            session: SessionConfig {
                secret: secret.unwrap_or_default().to_string(),
                ..defaults.session
            },
            log_level: log_level.map_or(defaults.log_level, str::to_string),
            ..defaults
        };
        config.validate()?;
        Ok(config)
    }
}
