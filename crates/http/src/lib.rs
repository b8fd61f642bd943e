//! Typed REST client for the TutorDesk backend
//!
//! Public and authenticated clients are distinct types, so endpoints that
//! need a session token cannot be called without one.

pub mod client;
pub mod types;

pub use client::{ActivityTracker, AuthenticatedClient, ClientError, PublicClient, TypedClientBuilder};
pub use types::{ApiResponse, LoginData, LoginRequest};
