//! Authentication endpoints

use super::{ClientError, PublicClient};
use crate::types::{ApiResponse, LoginData, LoginRequest};

/// Path of the login endpoint, relative to the API base URL
pub const LOGIN_PATH: &str = "Auth/login";

impl PublicClient {
    /// Exchange credentials for a session token
    pub async fn login(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<ApiResponse<LoginData>, ClientError> {
        let body = LoginRequest {
            email: email.into(),
            password: password.into(),
        };
        let request = self.request(reqwest::Method::POST, LOGIN_PATH).json(&body);
        self.execute(request).await
    }
}
