//! Shared test utilities for GoBarber Core integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use gobarber_core::config::{ApiConfig, ClientConfig};
use gobarber_core::storage::{KeyValueStore, MemoryStore, TOKEN_KEY, USER_KEY};
use gobarber_core::{AppContext, User};
use mockito::Server;
use serde_json::{json, Value};

/// The user the mock backend signs in.
pub fn test_user() -> User {
    User::new("user-123", "johndoe@example.com")
        .with_name("John Doe")
        .with_avatar_url("https://api.gobarber.app/files/avatar.png")
}

/// A user record written the way the backend writes it: its own key order,
/// a `null` field and a field the client does not model.
pub const BACKEND_USER: &str = r#"{"name":"Ana","id":"u1","email":"a@b.com","avatarUrl":null,"created_at":"2020-06-01T12:00:00.000Z"}"#;

/// JSON body of a successful `POST /sessions`.
pub fn session_body(token: &str, user: &User) -> String {
    json!({ "token": token, "user": user }).to_string()
}

/// JSON of a user as the backend returns it.
pub fn user_body(user: &User) -> String {
    serde_json::to_string(user).unwrap()
}

/// Parses a persisted value back into JSON for comparisons.
pub fn parse(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap()
}

/// A store already holding a session.
pub fn persisted_store(token: &str, user: &User) -> Arc<MemoryStore> {
    Arc::new(MemoryStore::with_entries([
        (TOKEN_KEY, token.to_string()),
        (USER_KEY, serde_json::to_string(user).unwrap()),
    ]))
}

/// Client configuration pointing at the mock server.
pub fn config_for(server: &Server) -> ClientConfig {
    ClientConfig { api: ApiConfig::with_base_url(server.url()), ..ClientConfig::default() }
}

/// A context talking to the mock server, over the given store.
pub fn context_for(server: &Server, store: Arc<dyn KeyValueStore>) -> Arc<AppContext> {
    Arc::new(AppContext::new(config_for(server), store).unwrap())
}
