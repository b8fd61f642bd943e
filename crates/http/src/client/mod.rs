//! TutorDesk backend client

pub mod activity;
pub mod auth;
pub mod error;
pub mod typed;

pub use activity::{ActivityGuard, ActivityTracker, SKIP_INTERCEPTOR_HEADER};
pub use error::ClientError;
pub use typed::{AuthenticatedClient, PublicClient, TypedClientBuilder};
