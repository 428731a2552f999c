//! GoBarber Core - session, API and form logic for the GoBarber booking
//! client.
//!
//! This crate provides:
//! - Session lifecycle (sign-in, restoration, sign-out, user updates)
//! - A persistent key-value store for the session
//! - An HTTP client that sends the current bearer token
//! - Form validation and the form flows built on it
//! - Toast notifications and route guarding
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use gobarber_core::forms::{SignInData, SignInForm, SubmitOutcome};
//! use gobarber_core::{AppContext, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> gobarber_core::Result<()> {
//!     let context = Arc::new(AppContext::with_file_store(ClientConfig::discover_and_load())?);
//!     let form = SignInForm::new(context.clone());
//!
//!     if let SubmitOutcome::Redirect(route) = form.submit(&SignInData::new("ana@example.com", "secret")).await {
//!         println!("Signed in, going to {}", route);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod context;
pub mod error;
pub mod forms;
pub mod models;
pub mod routes;
pub mod storage;
pub mod toast;
pub mod validation;

pub use api::{ApiClient, ApiError, CredentialProvider, SessionsApi};
pub use auth::{AuthError, AuthState, SessionManager, SessionState};
pub use config::{ClientConfig, ConfigError};
pub use context::AppContext;
pub use error::{GoBarberError, Result};
pub use forms::{FormError, SubmitOutcome};
pub use models::{User, UserRecord};
pub use routes::{guard, Route, RouteDecision};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError, TOKEN_KEY, USER_KEY};
pub use toast::{NewToast, ToastKind, ToastManager, ToastMessage};
pub use validation::{FieldErrors, FieldRules, FormData, Schema, ValidationErrors};
