//! Cookie storage behind the token store

use crate::error::SessionResult;
use chrono::{DateTime, Duration, Utc};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use tutordesk_core::SessionConfig;
use tutordesk_core::config::MAX_SESSION_MAX_AGE_SECS;

/// `SameSite` cookie attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Strict => "Strict",
            Self::Lax => "Lax",
            Self::None => "None",
        })
    }
}

/// Attributes written alongside a cookie value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieOptions {
    pub max_age: Duration,
    pub path: String,
    pub secure: bool,
    pub same_site: SameSite,
}

impl CookieOptions {
    /// Options for the session cookie: `Secure`, `SameSite=Strict`.
    /// The lifetime is clamped to what browsers accept.
    pub fn session(settings: &SessionConfig) -> Self {
        Self {
            max_age: Duration::seconds(settings.max_age_secs.clamp(0, MAX_SESSION_MAX_AGE_SECS)),
            path: settings.cookie_path.clone(),
            secure: true,
            same_site: SameSite::Strict,
        }
    }

    /// The same attributes with a zero lifetime, which deletes the cookie
    pub fn expired(&self) -> Self {
        Self {
            max_age: Duration::zero(),
            ..self.clone()
        }
    }
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self::session(&SessionConfig::default())
    }
}

/// Render a `document.cookie` assignment / `Set-Cookie` value
pub fn render_cookie(name: &str, value: &str, options: &CookieOptions) -> String {
    let mut cookie = format!(
        "{name}={value}; Max-Age={}; Path={}",
        options.max_age.num_seconds().max(0),
        options.path
    );
    if options.secure {
        cookie.push_str("; Secure");
    }
    cookie.push_str("; SameSite=");
    cookie.push_str(&options.same_site.to_string());
    cookie
}

/// Find `name` in a `Cookie` header style string (`a=1; b=2`)
pub fn find_cookie(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

/// Where the encrypted token lives between page loads
pub trait CookieJar {
    fn get(&self, name: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns an error if the backing storage rejects the write
    fn set(&self, name: &str, value: &str, options: &CookieOptions) -> SessionResult<()>;

    /// Delete `name`. Removing a missing cookie is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage rejects the write
    fn remove(&self, name: &str, options: &CookieOptions) -> SessionResult<()>;
}

#[derive(Debug, Clone)]
struct StoredCookie {
    value: String,
    expires_at: DateTime<Utc>,
}

/// In-process jar that honours `Max-Age`. Used off the browser and in tests.
#[derive(Debug, Default)]
pub struct MemoryCookieJar {
    cookies: RefCell<HashMap<String, StoredCookie>>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live cookies
    pub fn len(&self) -> usize {
        let now = Utc::now();
        self.cookies
            .borrow()
            .values()
            .filter(|cookie| cookie.expires_at > now)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Store a raw value with an explicit expiry, bypassing encryption
    pub fn insert_raw(&self, name: &str, value: &str, expires_at: DateTime<Utc>) {
        self.cookies.borrow_mut().insert(
            name.to_string(),
            StoredCookie {
                value: value.to_string(),
                expires_at,
            },
        );
    }
}

impl CookieJar for MemoryCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        let mut cookies = self.cookies.borrow_mut();
        match cookies.get(name) {
            Some(cookie) if cookie.expires_at > Utc::now() => Some(cookie.value.clone()),
            Some(_) => {
                cookies.remove(name);
                None
            }
            None => None,
        }
    }

    fn set(&self, name: &str, value: &str, options: &CookieOptions) -> SessionResult<()> {
        if options.max_age <= Duration::zero() {
            return self.remove(name, options);
        }
        let expires_at = Utc::now()
            .checked_add_signed(options.max_age)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.insert_raw(name, value, expires_at);
        Ok(())
    }

    fn remove(&self, name: &str, _options: &CookieOptions) -> SessionResult<()> {
        self.cookies.borrow_mut().remove(name);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserCookieJar;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{CookieJar, CookieOptions, find_cookie, render_cookie};
    use crate::error::{SessionError, SessionResult};
    use wasm_bindgen::JsCast;
    use web_sys::HtmlDocument;

    /// Jar over `document.cookie`
    #[derive(Debug, Default, Clone, Copy)]
    pub struct BrowserCookieJar;

    impl BrowserCookieJar {
        pub const fn new() -> Self {
            Self
        }

        fn document() -> SessionResult<HtmlDocument> {
            web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.dyn_into::<HtmlDocument>().ok())
                .ok_or_else(|| SessionError::storage("no HTML document"))
        }
    }

    impl CookieJar for BrowserCookieJar {
        fn get(&self, name: &str) -> Option<String> {
            let header = Self::document().ok()?.cookie().ok()?;
            find_cookie(&header, name)
        }

        fn set(&self, name: &str, value: &str, options: &CookieOptions) -> SessionResult<()> {
            Self::document()?
                .set_cookie(&render_cookie(name, value, options))
                .map_err(|err| SessionError::storage(format!("{err:?}")))
        }

        fn remove(&self, name: &str, options: &CookieOptions) -> SessionResult<()> {
            self.set(name, "", &options.expired())
        }
    }
}
