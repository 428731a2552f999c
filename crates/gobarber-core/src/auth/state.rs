//! Session state definitions.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

use crate::api::CredentialProvider;
use crate::models::User;

/// A signed-in session: the bearer token together with its user.
#[derive(Clone, PartialEq)]
pub struct AuthSession {
    /// Bearer token.
    pub token: String,
    /// The signed-in user.
    pub user: User,
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

/// Who is signed in, if anyone.
///
/// Token and user live in one `Option`, so a token without a user (or the
/// reverse) cannot be represented.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    session: Option<AuthSession>,
}

impl AuthState {
    /// The unauthenticated state.
    #[must_use]
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// A signed-in state.
    pub fn signed_in(token: impl Into<String>, user: User) -> Self {
        Self { session: Some(AuthSession { token: token.into(), user }) }
    }

    /// Returns the session, if signed in.
    pub fn session(&self) -> Option<&AuthSession> {
        self.session.as_ref()
    }

    /// Returns the signed-in user.
    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    /// Returns the bearer token.
    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    /// Returns `true` if a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}

/// Shared, observable holder of the current [`AuthState`].
///
/// Cloning yields another handle to the same state. The session manager
/// publishes into it; the API client reads the bearer token from it through
/// [`CredentialProvider`]; screens subscribe to it.
#[derive(Clone)]
pub struct SessionState {
    sender: Arc<watch::Sender<AuthState>>,
}

impl Default for SessionState {
    fn default() -> Self {
        let (sender, _receiver) = watch::channel(AuthState::default());
        Self { sender: Arc::new(sender) }
    }
}

impl fmt::Debug for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionState").field("state", &*self.sender.borrow()).finish()
    }
}

impl SessionState {
    /// Creates an unauthenticated state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> AuthState {
        self.sender.borrow().clone()
    }

    /// Returns the current user.
    pub fn current_user(&self) -> Option<User> {
        self.sender.borrow().user().cloned()
    }

    /// Returns `true` if a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.sender.borrow().is_authenticated()
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.sender.subscribe()
    }

    /// Replaces the state and notifies subscribers.
    pub(crate) fn publish(&self, state: AuthState) {
        self.sender.send_replace(state);
    }

    /// Replaces the user of the current session, keeping its token.
    ///
    /// Returns `false` (and notifies nobody) if no session is active.
    pub(crate) fn replace_user(&self, user: User) -> bool {
        self.sender.send_if_modified(|state| match state.session.as_mut() {
            Some(session) => {
                session.user = user;
                true
            }
            None => false,
        })
    }
}

impl CredentialProvider for SessionState {
    fn bearer_token(&self) -> Option<String> {
        self.sender.borrow().token().map(str::to_string)
    }
}
