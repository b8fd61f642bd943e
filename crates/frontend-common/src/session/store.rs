//! Encrypted cookie persistence of the session token

use super::cipher::TokenCipher;
use super::cookie::{CookieJar, CookieOptions};
use crate::error::SessionResult;
use std::rc::Rc;
use tutordesk_core::SessionConfig;

/// Holds at most one token, sealed in a single cookie
pub struct TokenStore {
    jar: Rc<dyn CookieJar>,
    cipher: TokenCipher,
    cookie_name: String,
    options: CookieOptions,
}

impl TokenStore {
    pub fn new(jar: Rc<dyn CookieJar>, settings: &SessionConfig) -> Self {
        Self {
            jar,
            cipher: TokenCipher::new(&settings.secret),
            cookie_name: settings.cookie_name.clone(),
            options: CookieOptions::session(settings),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Encrypt `token` and overwrite the session cookie with it
    ///
    /// # Errors
    ///
    /// Returns an error if encryption fails or the cookie cannot be written
    pub fn save_token(&self, token: &str) -> SessionResult<()> {
        let sealed = self.cipher.encrypt(token)?;
        self.jar.set(&self.cookie_name, &sealed, &self.options)?;
        tracing::debug!(cookie = %self.cookie_name, "Session token saved");
        Ok(())
    }

    /// The stored token, or `None` when there is no cookie, it does not
    /// decrypt, or it holds an empty token. A cookie that does not decrypt is
    /// removed.
    pub fn token(&self) -> Option<String> {
        let sealed = self.jar.get(&self.cookie_name)?;
        match self.cipher.decrypt(&sealed) {
            Ok(token) if token.is_empty() => None,
            Ok(token) => Some(token),
            Err(err) => {
                tracing::warn!(cookie = %self.cookie_name, error = %err, "Discarding unreadable session cookie");
                if let Err(err) = self.jar.remove(&self.cookie_name, &self.options) {
                    tracing::warn!(error = %err, "Failed to remove session cookie");
                }
                None
            }
        }
    }

    /// Delete the session cookie. Safe to call without a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the cookie cannot be written
    pub fn clear_token(&self) -> SessionResult<()> {
        self.jar.remove(&self.cookie_name, &self.options)?;
        tracing::debug!(cookie = %self.cookie_name, "Session token cleared");
        Ok(())
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("cookie_name", &self.cookie_name)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::cookie::MemoryCookieJar;
    use chrono::{Duration, Utc};

    fn settings() -> SessionConfig {
        SessionConfig {
            secret: "test-secret".to_string(),
            ..SessionConfig::default()
        }
    }

    #[test]
    fn test_save_then_read() {
        let jar = Rc::new(MemoryCookieJar::new());
        let store = TokenStore::new(jar.clone(), &settings());

        store.save_token("a.b.c").unwrap();
        assert_eq!(store.token().as_deref(), Some("a.b.c"));

        let raw = jar.get(store.cookie_name()).unwrap();
        assert_ne!(raw, "a.b.c");
    }

    #[test]
    fn test_save_overwrites() {
        let store = TokenStore::new(Rc::new(MemoryCookieJar::new()), &settings());
        store.save_token("first.token.x").unwrap();
        store.save_token("second.token.y").unwrap();
        assert_eq!(store.token().as_deref(), Some("second.token.y"));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let store = TokenStore::new(Rc::new(MemoryCookieJar::new()), &settings());
        store.clear_token().unwrap();
        store.save_token("a.b.c").unwrap();
        store.clear_token().unwrap();
        store.clear_token().unwrap();
        assert_eq!(store.token(), None);
    }

    #[test]
    fn test_undecryptable_cookie_is_removed() {
        let jar = Rc::new(MemoryCookieJar::new());
        let store = TokenStore::new(jar.clone(), &settings());
        jar.insert_raw(store.cookie_name(), "garbage", Utc::now() + Duration::hours(1));

        assert_eq!(store.token(), None);
        assert!(jar.is_empty());
    }

    #[test]
    fn test_empty_token_reads_as_no_session() {
        let store = TokenStore::new(Rc::new(MemoryCookieJar::new()), &settings());
        store.save_token("").unwrap();
        assert_eq!(store.token(), None);
    }

    #[test]
    fn test_other_secret_cannot_read() {
        let jar = Rc::new(MemoryCookieJar::new());
        TokenStore::new(jar.clone(), &settings()).save_token("a.b.c").unwrap();

        let other = SessionConfig {
            secret: "rotated".to_string(),
            ..SessionConfig::default()
        };
        assert_eq!(TokenStore::new(jar, &other).token(), None);
    }
}
