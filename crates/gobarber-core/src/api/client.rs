//! HTTP client for the GoBarber REST API.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use super::credentials::CredentialProvider;
use super::error::{ApiError, ApiResult};
use super::types::{
    Credentials, ForgotPasswordRequest, ProfileUpdate, ResetPasswordRequest, SessionResponse,
};
use crate::config::ApiConfig;
use crate::models::UserRecord;

/// Creates sessions (signs in) against the backend.
///
/// The session manager depends on this trait rather than on [`ApiClient`]
/// so it can be driven by a stub in tests.
#[async_trait]
pub trait SessionsApi: Send + Sync {
    /// Exchanges credentials for a bearer token and the user record.
    async fn create_session(&self, credentials: &Credentials) -> ApiResult<SessionResponse>;
}

/// GoBarber API client.
///
/// Every request carries `Authorization: Bearer <token>` when the attached
/// [`CredentialProvider`] yields a token at the time the request is built.
#[derive(Clone)]
pub struct ApiClient {
    /// Base URL, always ending in `/`.
    base_url: Url,
    /// HTTP client for making requests.
    client: Client,
    /// Source of the bearer token.
    credentials: Option<Arc<dyn CredentialProvider>>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("has_credentials", &self.credentials.is_some())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates a client without credentials.
    ///
    /// # Errors
    /// Returns `ApiError::InvalidUrl` if the base URL does not parse and
    /// `ApiError::Client` if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let mut raw = config.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url =
            Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))?;

        let client = Client::builder().timeout(config.timeout()).build().map_err(ApiError::Client)?;

        Ok(Self { base_url, client, credentials: None })
    }

    /// Attaches the provider consulted for the bearer token on each request.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the `Authorization` header value the next request will carry.
    pub fn authorization_header(&self) -> Option<String> {
        self.bearer_token().map(|token| format!("Bearer {}", token))
    }

    fn bearer_token(&self) -> Option<String> {
        self.credentials.as_ref().and_then(|c| c.bearer_token())
    }

    /// Resolves an API path against the base URL.
    fn url(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", path, e)))
    }

    /// Starts a request, attaching the bearer token if one is available.
    fn request(&self, method: Method, path: &str) -> ApiResult<RequestBuilder> {
        let url = self.url(path)?;
        let mut request = self.client.request(method, url);
        if let Some(token) = self.bearer_token() {
            request = request.bearer_auth(token);
        }
        Ok(request)
    }

    /// Sends a request and checks the status, returning the raw response.
    async fn execute(&self, request: RequestBuilder, operation: &str) -> ApiResult<reqwest::Response> {
        let response = request.send().await.map_err(|e| {
            error!(operation, error = %e, "Failed to send request to GoBarber API");
            ApiError::Request { operation: operation.to_string(), source: e }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            error!(operation, status = %status, "GoBarber API returned error status");
            return Err(ApiError::Status { operation: operation.to_string(), status, body });
        }

        debug!(operation, status = %status, "GoBarber API request succeeded");
        Ok(response)
    }

    /// Sends a request and decodes a JSON body.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &str,
    ) -> ApiResult<T> {
        let response = self.execute(request, operation).await?;
        response.json::<T>().await.map_err(|e| {
            error!(operation, error = %e, "Failed to parse GoBarber API response");
            ApiError::Decode { operation: operation.to_string(), reason: e.to_string() }
        })
    }

    /// Sends a request whose response body is ignored.
    async fn send_empty(&self, request: RequestBuilder, operation: &str) -> ApiResult<()> {
        self.execute(request, operation).await.map(|_| ())
    }

    /// `PUT /profile`: updates name, e-mail and optionally the password.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> ApiResult<UserRecord> {
        let request = self.request(Method::PUT, "profile")?.json(update);
        self.send_json(request, "update profile").await
    }

    /// `PATCH /users/avatar`: uploads a new avatar as multipart field `avatar`.
    pub async fn update_avatar(&self, file_name: &str, contents: Vec<u8>) -> ApiResult<UserRecord> {
        let part = Part::bytes(contents).file_name(file_name.to_string());
        let form = Form::new().part("avatar", part);
        let request = self.request(Method::PATCH, "users/avatar")?.multipart(form);
        self.send_json(request, "update avatar").await
    }

    /// `POST /password/forgot`: asks the backend to e-mail a recovery link.
    pub async fn forgot_password(&self, email: &str) -> ApiResult<()> {
        let body = ForgotPasswordRequest { email: email.to_string() };
        let request = self.request(Method::POST, "password/forgot")?.json(&body);
        self.send_empty(request, "forgot password").await
    }

    /// `POST /password/reset`: sets a new password using a recovery token.
    pub async fn reset_password(&self, body: &ResetPasswordRequest) -> ApiResult<()> {
        let request = self.request(Method::POST, "password/reset")?.json(body);
        self.send_empty(request, "reset password").await
    }
}

#[async_trait]
impl SessionsApi for ApiClient {
    async fn create_session(&self, credentials: &Credentials) -> ApiResult<SessionResponse> {
        debug!(email = %credentials.email, "Creating session");
        let request = self.request(Method::POST, "sessions")?.json(credentials);
        self.send_json(request, "create session").await
    }
}
