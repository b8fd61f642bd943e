//! Type-safe API clients that enforce authentication requirements at compile time

use super::ClientError;
use super::activity::{ActivityTracker, SKIP_INTERCEPTOR_HEADER};
use reqwest::{Client, ClientBuilder, RequestBuilder, header};
use std::time::Duration;

const USER_AGENT: &str = concat!("tutordesk-console/", env!("CARGO_PKG_VERSION"));

/// Client for public endpoints that don't require authentication
#[derive(Clone)]
pub struct PublicClient {
    client: Client,
    base_url: String,
    activity: Option<ActivityTracker>,
}

/// Client for endpoints that require the session's bearer token
#[derive(Clone)]
pub struct AuthenticatedClient {
    client: Client,
    base_url: String,
    token: String,
    activity: Option<ActivityTracker>,
}

fn build_http_client(timeout: Option<Duration>) -> Result<Client, ClientError> {
    #[cfg(not(target_arch = "wasm32"))]
    let client = {
        let mut builder = ClientBuilder::new().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()?
    };

    #[cfg(target_arch = "wasm32")]
    let client = {
        let _ = timeout; // Timeouts not supported on WASM
        ClientBuilder::new().user_agent(USER_AGENT).build()?
    };

    Ok(client)
}

fn join_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url, path.trim_start_matches('/'))
}

/// Send a request, counting it unless it carries the skip header, and
/// decode a JSON body on success.
async fn send_json<T: serde::de::DeserializeOwned>(
    client: &Client,
    request: RequestBuilder,
    activity: Option<&ActivityTracker>,
) -> Result<T, ClientError> {
    let mut request = request.build()?;
    let skip_activity = request
        .headers_mut()
        .remove(SKIP_INTERCEPTOR_HEADER)
        .is_some();
    let _activity = if skip_activity {
        None
    } else {
        activity.map(ActivityTracker::begin)
    };

    let method = request.method().clone();
    let url = request.url().clone();
    let response = client.execute(request).await?;
    let status = response.status();

    if status.is_success() {
        Ok(response.json().await?)
    } else {
        let message = response.text().await.unwrap_or_else(|_| status.to_string());
        tracing::debug!(%method, %url, status = status.as_u16(), "Request rejected");
        Err(ClientError::from_status(status, message))
    }
}

impl PublicClient {
    /// Create a new public client
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        TypedClientBuilder::new().base_url(base_url).build_public()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a request builder without authentication
    pub fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.client.request(method, join_url(&self.base_url, path))
    }

    /// Execute a request and handle common errors
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        send_json(&self.client, request, self.activity.as_ref()).await
    }

    /// Attach a bearer token to get an authenticated client
    pub fn authenticate(self, token: impl Into<String>) -> AuthenticatedClient {
        AuthenticatedClient {
            client: self.client,
            base_url: self.base_url,
            token: token.into(),
            activity: self.activity,
        }
    }
}

impl AuthenticatedClient {
    /// Create a new authenticated client
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self, ClientError> {
        TypedClientBuilder::new()
            .base_url(base_url)
            .build_authenticated(token)
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a request builder carrying the bearer token
    pub fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, join_url(&self.base_url, path))
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
    }

    /// Execute a request and handle common errors
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        send_json(&self.client, request, self.activity.as_ref()).await
    }

    /// Create a public client (useful for calling public endpoints)
    pub fn to_public(&self) -> PublicClient {
        PublicClient {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            activity: self.activity.clone(),
        }
    }
}

/// Type-safe builder that creates the appropriate client type
#[derive(Default)]
pub struct TypedClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    activity: Option<ActivityTracker>,
}

impl TypedClientBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    #[cfg(not(target_arch = "wasm32"))]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Count requests made through the built client
    pub fn activity_tracker(mut self, tracker: ActivityTracker) -> Self {
        self.activity = Some(tracker);
        self
    }

    fn take_base_url(&mut self) -> Result<String, ClientError> {
        let base_url = self
            .base_url
            .take()
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;
        Ok(base_url.trim_end_matches('/').to_string())
    }

    /// Build a public client
    pub fn build_public(mut self) -> Result<PublicClient, ClientError> {
        let base_url = self.take_base_url()?;
        Ok(PublicClient {
            client: build_http_client(self.timeout)?,
            base_url,
            activity: self.activity,
        })
    }

    /// Build an authenticated client
    pub fn build_authenticated(
        self,
        token: impl Into<String>,
    ) -> Result<AuthenticatedClient, ClientError> {
        Ok(self.build_public()?.authenticate(token))
    }
}
