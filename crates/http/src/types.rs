//! Wire types shared with the TutorDesk backend

use serde::{Deserialize, Serialize};

/// Envelope every backend endpoint responds with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status_code: u16,
    #[serde(default)]
    pub is_success: bool,
}

impl<T> ApiResponse<T> {
    /// Payload of a successful response
    pub fn into_data(self) -> Option<T> {
        if self.is_success { self.data } else { None }
    }
}

/// Credentials posted to `Auth/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Payload of a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    /// Bearer token for the new session
    #[serde(alias = "accessToken")]
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<String>,
}
