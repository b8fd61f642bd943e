//! Session token storage and the identity derived from it

pub mod cipher;
pub mod context;
pub mod cookie;
pub mod provider;
pub mod store;

#[cfg(target_arch = "wasm32")]
pub use cookie::BrowserCookieJar;
pub use cipher::TokenCipher;
pub use context::SessionContext;
pub use cookie::{CookieJar, CookieOptions, MemoryCookieJar, SameSite};
pub use provider::{SessionProvider, use_session};
pub use store::TokenStore;
