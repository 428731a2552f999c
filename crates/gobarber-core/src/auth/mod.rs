//! Client-side session and authentication lifecycle.
//!
//! [`SessionManager`] acquires a bearer token from the backend, persists it
//! with the user record, restores both at start-up and clears them on
//! sign-out. The current state lives in a [`SessionState`], which the API
//! client consults for the bearer token of each request.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use gobarber_core::api::ApiClient;
//! use gobarber_core::auth::{SessionManager, SessionState};
//! use gobarber_core::config::ApiConfig;
//! use gobarber_core::storage::MemoryStore;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let state = SessionState::new();
//! let api = Arc::new(ApiClient::new(&ApiConfig::default())?.with_credentials(Arc::new(state.clone())));
//! let session = SessionManager::initialize(Arc::new(MemoryStore::new()), api, state);
//!
//! session.sign_in("ana@example.com", "secret").await?;
//! assert!(session.is_authenticated());
//! # Ok(())
//! # }
//! ```

mod error;
mod manager;
mod state;

pub use error::{AuthError, AuthResult};
pub use manager::SessionManager;
pub use state::{AuthSession, AuthState, SessionState};
