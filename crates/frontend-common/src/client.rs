//! Console client: the backend client bound to the session

use crate::auth::error_handler::trigger_auth_error;
use crate::error::{ConsoleError, SessionResult};
use crate::session::SessionContext;
use reqwest::{Method, RequestBuilder};
use tutordesk_core::{ConsoleConfig, Role};
use tutordesk_http::client::{ActivityTracker, ClientError, PublicClient, TypedClientBuilder};

/// Sends requests with the session's current token attached.
///
/// The token is read from the session for every request, so signing in or
/// out takes effect without rebuilding the client.
#[derive(Clone)]
pub struct ConsoleClient {
    inner: PublicClient,
    session: SessionContext,
}

impl ConsoleClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(
        config: &ConsoleConfig,
        session: SessionContext,
        activity: ActivityTracker,
    ) -> Result<Self, ClientError> {
        let inner = TypedClientBuilder::new()
            .base_url(&config.api_base_url)
            .activity_tracker(activity)
            .build_public()?;
        Ok(Self::from_client(inner, session))
    }

    pub const fn from_client(inner: PublicClient, session: SessionContext) -> Self {
        Self { inner, session }
    }

    pub const fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Request builder carrying `Authorization: Bearer <token>` when a token
    /// is stored
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.inner.request(method, path);
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request. A rejected session fires the global auth error
    /// callback; the request is not retried.
    ///
    /// # Errors
    ///
    /// Returns the client error unchanged
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        match self.inner.execute(request).await {
            Ok(result) => Ok(result),
            Err(error) => {
                if error.is_auth_expired() {
                    tracing::warn!(status = ?error.status(), "Backend rejected the session");
                    trigger_auth_error();
                }
                Err(error)
            }
        }
    }

    /// Log in and store the issued token
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the backend refuses the
    /// credentials, or the token cannot be stored
    pub async fn sign_in(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Option<Role>, ConsoleError> {
        let response = self.inner.login(email, password).await?;
        let message = response.message.clone();
        let Some(data) = response.into_data() else {
            return Err(ConsoleError::LoginRejected(message));
        };

        self.session.save_token(&data.token)?;
        let role = self.session.user_role();
        tracing::info!(role = ?role, "Signed in");
        Ok(role)
    }

    /// # Errors
    ///
    /// Returns an error if the session cookie cannot be removed
    pub fn sign_out(&self) -> SessionResult<()> {
        self.session.clear_token()
    }
}
