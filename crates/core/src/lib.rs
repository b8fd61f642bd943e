//! TutorDesk console core: roles, token claims and page access policy

pub mod access;
pub mod claims;
pub mod config;
pub mod error;
#[cfg(all(feature = "subscriber", not(target_arch = "wasm32")))]
pub mod logging;
pub mod role;
#[cfg(any(test, feature = "tests"))]
pub mod testing;

pub use access::{AccessDecision, Page, PageId, PermissionDenied, PermissionTable, RedirectTarget, RouteAccessPolicy};
pub use claims::TokenClaims;
pub use config::{ConsoleConfig, RouteConfig, SessionConfig};
pub use error::{CoreError, CoreResult};
pub use role::{ClaimedRole, Role, UNKNOWN_ROLE_LABEL};
