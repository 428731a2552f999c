//! GoBarber REST API access.
//!
//! [`ApiClient`] issues every call the client makes. Instead of a mutable
//! default-header map, it reads the bearer token from a [`CredentialProvider`]
//! when each request is built; the session state is such a provider, so the
//! `Authorization` header always reflects whoever is signed in right now.

mod client;
mod credentials;
mod error;
mod types;

pub use client::{ApiClient, SessionsApi};
pub use credentials::CredentialProvider;
pub use error::{ApiError, ApiResult};
pub use types::{
    Credentials, ForgotPasswordRequest, PasswordChange, ProfileUpdate, ResetPasswordRequest,
    SessionResponse,
};
