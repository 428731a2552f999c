//! Application context: the one place the session, API client and toast
//! queue are wired together.

use std::sync::Arc;

use tracing::debug;

use crate::api::{ApiClient, ApiResult};
use crate::auth::{SessionManager, SessionState};
use crate::config::ClientConfig;
use crate::routes::{self, Route, RouteDecision};
use crate::storage::{FileStore, KeyValueStore};
use crate::toast::ToastManager;

/// Everything a screen or command needs, created once at start-up and passed
/// down explicitly.
///
/// The API client reads its bearer token from the same [`SessionState`] the
/// session manager publishes into, so signing in or out changes the
/// `Authorization` header of every later request without further wiring.
pub struct AppContext {
    config: ClientConfig,
    api: Arc<ApiClient>,
    session: SessionManager,
    toasts: Arc<ToastManager>,
}

impl AppContext {
    /// Builds a context over the given store and restores any persisted
    /// session from it.
    pub fn new(config: ClientConfig, store: Arc<dyn KeyValueStore>) -> ApiResult<Self> {
        let state = SessionState::new();
        let api = Arc::new(ApiClient::new(&config.api)?.with_credentials(Arc::new(state.clone())));
        let session = SessionManager::initialize(store, api.clone(), state);
        let toasts = Arc::new(ToastManager::with_duration(config.toast.duration()));

        debug!(base_url = %api.base_url(), authenticated = session.is_authenticated(), "Context ready");

        Ok(Self { config, api, session, toasts })
    }

    /// Builds a context persisting the session to the configured session file.
    pub fn with_file_store(config: ClientConfig) -> ApiResult<Self> {
        let store = Arc::new(FileStore::with_path(config.storage.session_file_or_default()));
        Self::new(config, store)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the API client.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Returns the session manager.
    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Returns the toast queue.
    pub fn toasts(&self) -> &Arc<ToastManager> {
        &self.toasts
    }

    /// Decides whether `route` may be shown to the current user.
    pub fn guard(&self, route: Route) -> RouteDecision {
        routes::guard(route, self.session.is_authenticated())
    }
}
