//! Console configuration
//!
//! Values come from built-in defaults, an optional file, and `TUTORDESK_*`
//! environment variables, in that order of precedence (lowest first).
//! Nested keys use a double underscore, e.g. `TUTORDESK_SESSION__SECRET`.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "TUTORDESK";

/// Cookie key under which the encrypted token is stored
pub const DEFAULT_COOKIE_NAME: &str = "z7x9v2m5p8q1r4t3";

/// One day, the lifetime of the session cookie
pub const DEFAULT_SESSION_MAX_AGE_SECS: i64 = 24 * 60 * 60;

/// 400 days, the longest cookie lifetime browsers honour
pub const MAX_SESSION_MAX_AGE_SECS: i64 = 400 * 24 * 60 * 60;

/// Top-level console configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Base URL of the REST backend, e.g. `https://api.example.com/api/`
    pub api_base_url: String,
    pub session: SessionConfig,
    pub routes: RouteConfig,
    /// Log level filter (e.g., "info", "debug", "trace")
    pub log_level: String,
}

/// Session cookie settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub cookie_name: String,
    /// Pre-shared secret the token is encrypted with
    pub secret: String,
    pub max_age_secs: i64,
    pub cookie_path: String,
}

/// Where denied navigations are sent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    pub login_path: String,
    pub home_path: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000/api/".to_string(),
            session: SessionConfig::default(),
            routes: RouteConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            secret: String::new(),
            max_age_secs: DEFAULT_SESSION_MAX_AGE_SECS,
            cookie_path: "/".to_string(),
        }
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
            home_path: "/Dashboard".to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from a file, with environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// resulting configuration does not validate
    pub fn from_file(path: impl AsRef<Path>) -> CoreResult<Self> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(config::File::from(path.as_ref()))
            .add_source(env_source(None))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with defaults and environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables cannot be parsed or the
    /// resulting configuration does not validate
    pub fn from_env() -> CoreResult<Self> {
        Self::from_env_vars(None)
    }

    fn from_env_vars(vars: Option<config::Map<String, String>>) -> CoreResult<Self> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(env_source(vars))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants the session layer relies on
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidConfig` describing the first violation
    pub fn validate(&self) -> CoreResult<()> {
        if self.session.secret.is_empty() {
            return Err(CoreError::invalid_config("session.secret must not be empty"));
        }
        if self.session.cookie_name.is_empty() {
            return Err(CoreError::invalid_config("session.cookie_name must not be empty"));
        }
        if !(1..=MAX_SESSION_MAX_AGE_SECS).contains(&self.session.max_age_secs) {
            return Err(CoreError::invalid_config(format!(
                "session.max_age_secs must be between 1 and {MAX_SESSION_MAX_AGE_SECS}, got {}",
                self.session.max_age_secs
            )));
        }
        for (key, path) in [
            ("session.cookie_path", &self.session.cookie_path),
            ("routes.login_path", &self.routes.login_path),
            ("routes.home_path", &self.routes.home_path),
        ] {
            if !path.starts_with('/') {
                return Err(CoreError::invalid_config(format!(
                    "{key} must start with '/', got '{path}'"
                )));
            }
        }
        Ok(())
    }
}

fn env_source(vars: Option<config::Map<String, String>>) -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .source(vars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ConsoleConfig::default();
        assert_eq!(config.session.cookie_name, DEFAULT_COOKIE_NAME);
        assert_eq!(config.session.max_age_secs, 86_400);
        assert_eq!(config.session.cookie_path, "/");
        assert_eq!(config.routes.login_path, "/login");
        assert_eq!(config.routes.home_path, "/Dashboard");
    }

    #[test]
    fn test_default_secret_does_not_validate() {
        let err = ConsoleConfig::default().validate().unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig { .. }));
    }

    #[test]
    fn test_validate_rejects_relative_paths() {
        let mut config = ConsoleConfig::default();
        config.session.secret = "s3cret".to_string();
        config.routes.home_path = "Dashboard".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("routes.home_path"));
    }

    #[test]
    fn test_validate_bounds_max_age() {
        let mut config = ConsoleConfig::default();
        config.session.secret = "s3cret".to_string();

        config.session.max_age_secs = MAX_SESSION_MAX_AGE_SECS;
        assert!(config.validate().is_ok());

        for max_age_secs in [0, -1, MAX_SESSION_MAX_AGE_SECS + 1, i64::MAX] {
            config.session.max_age_secs = max_age_secs;
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("session.max_age_secs"));
        }
    }

    #[test]
    fn test_from_file_with_partial_overrides() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
api_base_url = "https://api.tutordesk.test/api/"

[session]
secret = "from-file"
max_age_secs = 3600
"#
        )
        .unwrap();

        let config = ConsoleConfig::from_file(file.path()).unwrap();
        assert_eq!(config.api_base_url, "https://api.tutordesk.test/api/");
        assert_eq!(config.session.secret, "from-file");
        assert_eq!(config.session.max_age_secs, 3600);
        assert_eq!(config.session.cookie_name, DEFAULT_COOKIE_NAME);
        assert_eq!(config.routes.home_path, "/Dashboard");
    }

    #[test]
    fn test_env_overrides() {
        let vars = [
            ("TUTORDESK_SESSION__SECRET", "from-env"),
            ("TUTORDESK_ROUTES__HOME_PATH", "/Lessons"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = ConsoleConfig::from_env_vars(Some(vars)).unwrap();
        assert_eq!(config.session.secret, "from-env");
        assert_eq!(config.routes.home_path, "/Lessons");
        assert_eq!(config.routes.login_path, "/login");
    }
}
