//! TutorDesk console frontend: session store, route guard and console client

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod guard;
#[cfg(target_arch = "wasm32")]
pub mod logging;
pub mod router;
pub mod session;

pub use client::ConsoleClient;
pub use config::BuildConfig;
pub use error::{ConsoleError, SessionError, SessionResult};
pub use guard::{LogNotifier, Navigator, Notifier, RouteGuard};
pub use router::{AppRoute, RouteAccess};
pub use session::{CookieJar, MemoryCookieJar, SessionContext, SessionProvider, TokenStore, use_session};
