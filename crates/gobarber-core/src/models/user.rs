//! User record as returned by the GoBarber API.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A GoBarber user.
///
/// Only `id` and `email` are relied upon by the client. Any other fields the
/// backend sends (timestamps and the like) are kept in `extra` so that a
/// record read from the API serializes back with the same fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// E-mail address.
    #[serde(default)]
    pub email: String,
    /// Public URL of the user's avatar image.
    #[serde(rename = "avatarUrl", default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Creates a user with only an id and e-mail.
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self { id: id.into(), name: None, email: email.into(), avatar_url: None, extra: Map::new() }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the avatar URL.
    #[must_use]
    pub fn with_avatar_url(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }

    /// Returns the name to show for this user, falling back to the e-mail.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().filter(|n| !n.is_empty()).unwrap_or(&self.email)
    }
}

/// A user record exactly as the backend sent it, alongside its typed view.
///
/// The persisted copy of the signed-in user is this raw JSON, so fields the
/// backend sends as `null`, fields it omits and its key order all survive.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    raw: Value,
    user: User,
}

impl UserRecord {
    /// Wraps a backend record, reading the typed view out of it.
    ///
    /// # Errors
    /// Returns an error if the record lacks the fields [`User`] needs.
    pub fn from_value(raw: Value) -> serde_json::Result<Self> {
        let user = User::deserialize(&raw)?;
        Ok(Self { raw, user })
    }

    /// Builds a record from a typed user.
    ///
    /// # Errors
    /// Returns an error if the user cannot be serialized.
    pub fn from_user(user: User) -> serde_json::Result<Self> {
        let raw = serde_json::to_value(&user)?;
        Ok(Self { raw, user })
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn into_user(self) -> User {
        self.user
    }

    /// Returns the record as received.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Compact JSON text of the record, in the backend's key order.
    pub fn to_json(&self) -> String {
        self.raw.to_string()
    }
}

impl<'de> Deserialize<'de> for UserRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Self::from_value(raw).map_err(D::Error::custom)
    }
}
