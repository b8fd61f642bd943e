//! Session error types

use thiserror::Error;
use tutordesk_core::CoreError;

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    /// Sealing or opening the token failed
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The cookie could not be written or removed
    #[error("Cookie storage unavailable: {0}")]
    Storage(String),
}

impl SessionError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }
}

/// Failures of console operations that touch both the backend and the session
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Client(#[from] tutordesk_http::ClientError),

    #[error(transparent)]
    Session(#[from] SessionError),

    /// The backend answered but refused the credentials
    #[error("Login rejected: {0}")]
    LoginRejected(String),
}
