//! Session manager: sign-in, sign-out and profile updates with write-through
//! persistence.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use super::error::{AuthError, AuthResult};
use super::state::{AuthSession, AuthState, SessionState};
use crate::api::{Credentials, SessionResponse, SessionsApi};
use crate::models::{User, UserRecord};
use crate::storage::{KeyValueStore, TOKEN_KEY, USER_KEY};

/// Single source of truth for who is signed in.
///
/// The manager owns the in-memory session and keeps the key-value store in
/// step with it on every mutation. The durable copy is written before the new
/// state is published, so observers never see a state the store does not
/// hold.
pub struct SessionManager {
    /// Durable storage for the token and user.
    store: Arc<dyn KeyValueStore>,
    /// Backend used to create sessions.
    api: Arc<dyn SessionsApi>,
    /// Published in-memory state.
    state: SessionState,
}

impl SessionManager {
    /// Creates the manager and restores any persisted session.
    ///
    /// Reads the token and user from `store`. When both are present and the
    /// user parses, the session is published into `state`, which makes the
    /// bearer token available to every API client reading credentials from
    /// it. Otherwise the session starts empty. No network call is made.
    ///
    /// # Arguments
    /// * `store` - Durable storage
    /// * `api` - Backend used by [`sign_in`](Self::sign_in)
    /// * `state` - Shared state to publish into
    pub fn initialize(
        store: Arc<dyn KeyValueStore>,
        api: Arc<dyn SessionsApi>,
        state: SessionState,
    ) -> Self {
        let restored = match restore_session(store.as_ref()) {
            Some(session) => {
                info!(user_id = %session.user.id, "Restored persisted session");
                AuthState::signed_in(session.token, session.user)
            }
            None => AuthState::signed_out(),
        };
        state.publish(restored);

        Self { store, api, state }
    }

    /// Signs in with e-mail and password.
    ///
    /// Issues one `POST /sessions`. On success the token and the user record,
    /// exactly as the backend sent it, are written to the store and published. On failure nothing observable
    /// changes: store, state and outbound credentials keep their previous
    /// values.
    ///
    /// Input is not validated here; that is the caller's job.
    ///
    /// # Errors
    /// Returns `AuthError::Authentication` for any HTTP failure and
    /// `AuthError::Storage` if the session could not be persisted.
    pub async fn sign_in(&self, email: &str, password: &str) -> AuthResult<User> {
        let credentials = Credentials::new(email, password);

        let SessionResponse { token, user: record } =
            self.api.create_session(&credentials).await.map_err(|e| {
                warn!(error = %e, "Sign-in failed");
                AuthError::Authentication(e)
            })?;

        self.persist_session(&token, &record)?;
        let user = record.into_user();
        self.state.publish(AuthState::signed_in(token, user.clone()));

        info!(user_id = %user.id, "Signed in");
        Ok(user)
    }

    /// Writes token then user, restoring the previous token if the user write
    /// fails.
    fn persist_session(&self, token: &str, record: &UserRecord) -> AuthResult<()> {
        let user_json = record.to_json();
        let previous_token = self.store.get(TOKEN_KEY)?;

        self.store.set(TOKEN_KEY, token)?;

        if let Err(e) = self.store.set(USER_KEY, &user_json) {
            let rollback = match previous_token {
                Some(previous) => self.store.set(TOKEN_KEY, &previous),
                None => self.store.remove(TOKEN_KEY),
            };
            if let Err(rollback_err) = rollback {
                error!(error = %rollback_err, "Failed to roll back persisted token");
            }
            return Err(e.into());
        }

        Ok(())
    }

    /// Signs out.
    ///
    /// Removes both persisted values and clears the in-memory session, which
    /// also stops the bearer token from being sent. The in-memory session is
    /// cleared even if a removal fails; the first storage error is returned.
    pub fn sign_out(&self) -> AuthResult<()> {
        let token_removed = self.store.remove(TOKEN_KEY);
        let user_removed = self.store.remove(USER_KEY);

        self.state.publish(AuthState::signed_out());
        info!("Signed out");

        token_removed?;
        user_removed?;
        Ok(())
    }

    /// Replaces the signed-in user, keeping the token.
    ///
    /// The whole record is replaced; fields are not merged.
    ///
    /// # Errors
    /// Returns `AuthError::NotAuthenticated` if nobody is signed in, in which
    /// case nothing is written.
    pub fn update_user(&self, user: User) -> AuthResult<()> {
        self.update_user_record(UserRecord::from_user(user)?)
    }

    /// Replaces the signed-in user with a record returned by the backend,
    /// persisting it as received.
    ///
    /// # Errors
    /// Same as [`update_user`](Self::update_user).
    pub fn update_user_record(&self, record: UserRecord) -> AuthResult<()> {
        if !self.state.is_authenticated() {
            return Err(AuthError::NotAuthenticated);
        }

        self.store.set(USER_KEY, &record.to_json())?;
        let user = record.into_user();

        let user_id = user.id.clone();
        if !self.state.replace_user(user) {
            // Signed out between the check and the write
            self.store.remove(USER_KEY)?;
            return Err(AuthError::NotAuthenticated);
        }

        debug!(user_id = %user_id, "Updated user");
        Ok(())
    }

    /// Returns the signed-in user, or `None` when unauthenticated.
    pub fn current_user(&self) -> Option<User> {
        self.state.current_user()
    }

    /// Returns `true` if a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    /// Subscribes to session changes.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Returns a handle to the shared session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }
}

/// Reads a persisted session, treating anything incomplete or unreadable as
/// signed out.
fn restore_session(store: &dyn KeyValueStore) -> Option<AuthSession> {
    let read = |key: &str| match store.get(key) {
        Ok(value) => value.filter(|v| !v.is_empty()),
        Err(e) => {
            warn!(key, error = %e, "Failed to read persisted session");
            None
        }
    };

    let (Some(token), Some(raw_user)) = (read(TOKEN_KEY), read(USER_KEY)) else {
        debug!("No persisted session");
        return None;
    };

    match serde_json::from_str::<User>(&raw_user) {
        Ok(user) => Some(AuthSession { token, user }),
        Err(e) => {
            warn!(error = %e, "Persisted user is malformed; starting signed out");
            None
        }
    }
}
