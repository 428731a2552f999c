//! Request and response bodies of the GoBarber API.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::UserRecord;

/// Body of `POST /sessions`.
#[derive(Clone, Serialize)]
pub struct Credentials {
    /// Account e-mail.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl Credentials {
    /// Creates a credentials pair.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful response of `POST /sessions`.
///
/// Older backend builds name the user field `userWithoutPassword`.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionResponse {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// The signed-in user, as sent.
    #[serde(alias = "userWithoutPassword")]
    pub user: UserRecord,
}

/// Password change sent along with a profile update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PasswordChange {
    /// Current password.
    #[serde(rename = "oldPassword")]
    pub old_password: String,
    /// New password.
    pub password: String,
    /// New password, repeated.
    #[serde(rename = "passwordConfirmation")]
    pub password_confirmation: String,
}

/// Body of `PUT /profile`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileUpdate {
    /// New display name.
    pub name: String,
    /// New e-mail.
    pub email: String,
    /// Password change; omitted entirely when `None`.
    #[serde(flatten)]
    pub password: Option<PasswordChange>,
}

/// Body of `POST /password/forgot`.
#[derive(Debug, Clone, Serialize)]
pub struct ForgotPasswordRequest {
    /// E-mail to send the recovery link to.
    pub email: String,
}

/// Body of `POST /password/reset`.
#[derive(Debug, Clone, Serialize)]
pub struct ResetPasswordRequest {
    /// New password.
    pub password: String,
    /// New password, repeated.
    #[serde(rename = "passwordConfirmation")]
    pub password_confirmation: String,
    /// Recovery token from the e-mailed link.
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new("a@b.com", "hunter2");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("a@b.com"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_session_response_accepts_legacy_user_key() {
        let body = json!({
            "token": "T1",
            "userWithoutPassword": {"id": "u1", "email": "a@b.com"}
        });
        let response: SessionResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.token, "T1");
        assert_eq!(response.user.user().email, "a@b.com");
    }

    #[test]
    fn test_profile_update_without_password() {
        let update = ProfileUpdate {
            name: "Ana".to_string(),
            email: "a@b.com".to_string(),
            password: None,
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({"name": "Ana", "email": "a@b.com"}));
    }

    #[test]
    fn test_profile_update_with_password() {
        let update = ProfileUpdate {
            name: "Ana".to_string(),
            email: "a@b.com".to_string(),
            password: Some(PasswordChange {
                old_password: "old".to_string(),
                password: "new-secret".to_string(),
                password_confirmation: "new-secret".to_string(),
            }),
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({
                "name": "Ana",
                "email": "a@b.com",
                "oldPassword": "old",
                "password": "new-secret",
                "passwordConfirmation": "new-secret"
            })
        );
    }

    #[test]
    fn test_reset_password_field_names() {
        let body = ResetPasswordRequest {
            password: "p".to_string(),
            password_confirmation: "p".to_string(),
            token: "t".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"password": "p", "passwordConfirmation": "p", "token": "t"})
        );
    }
}
