use std::fmt;
use std::sync::Arc;

use reqwest::Url;

use super::{form_data, submit, FormError, LoadingFlag, SubmitOutcome};
use crate::api::ResetPasswordRequest;
use crate::context::AppContext;
use crate::routes::Route;
use crate::toast::NewToast;
use crate::validation::{FieldRules, Schema};

/// Extracts the `token` query parameter from a reset link.
///
/// Accepts a full URL, a path with a query string, or a bare query string
/// with or without the leading `?`. Empty tokens count as missing.
pub fn token_from_query(link: &str) -> Option<String> {
    let link = link.trim();
    let query = if link.starts_with('?') || link.contains("://") || link.starts_with('/') {
        link.to_string()
    } else {
        format!("?{}", link)
    };

    let base = Url::parse("http://localhost/").ok()?;
    let url = base.join(&query).ok()?;
    url.query_pairs().find(|(key, _)| key == "token").map(|(_, value)| value.into_owned()).filter(|t| !t.is_empty())
}

/// Password reset form input.
#[derive(Clone, Default)]
pub struct ResetPasswordData {
    pub password: String,
    pub password_confirmation: String,
}

impl fmt::Debug for ResetPasswordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResetPasswordData").finish_non_exhaustive()
    }
}

/// Password reset screen logic. The token comes from the link the user
/// opened, not from the form.
pub struct ResetPasswordForm {
    context: Arc<AppContext>,
    loading: LoadingFlag,
    token: Option<String>,
}

impl ResetPasswordForm {
    /// Creates the form for the link the user opened.
    pub fn new(context: Arc<AppContext>, link: &str) -> Self {
        Self { context, loading: LoadingFlag::default(), token: token_from_query(link) }
    }

    pub fn schema() -> Schema {
        Schema::new().field("password", FieldRules::new().required("Senha obrigatória")).field(
            "passwordConfirmation",
            FieldRules::new().equals_field("password", "Confirmação da nova senha não confere com a nova senha."),
        )
    }

    /// Returns the token found in the link.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    /// Sets the new password and redirects to sign-in.
    pub async fn submit(&self, data: &ResetPasswordData) -> SubmitOutcome {
        let fields = form_data([
            ("password", data.password.as_str()),
            ("passwordConfirmation", data.password_confirmation.as_str()),
        ]);
        let failure = NewToast::error("Erro ao resetar senha.")
            .with_description("Ocorreu um erro no reset da sua senha. Tente mais tarde.");

        submit("reset-password", &self.loading, &Self::schema(), &fields, self.context.toasts(), failure, || async move {
            let token = self.token.clone().ok_or(FormError::MissingToken)?;
            let body = ResetPasswordRequest {
                password: data.password.clone(),
                password_confirmation: data.password_confirmation.clone(),
                token,
            };
            self.context.api().reset_password(&body).await?;
            Ok::<_, FormError>(SubmitOutcome::Redirect(Route::SignIn))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_from_query() {
        assert_eq!(token_from_query("?token=abc-123"), Some("abc-123".to_string()));
        assert_eq!(token_from_query("token=abc"), Some("abc".to_string()));
        assert_eq!(token_from_query("/reset-password?token=abc"), Some("abc".to_string()));
        assert_eq!(
            token_from_query("http://localhost:3000/reset-password?token=abc&x=1"),
            Some("abc".to_string())
        );
        assert_eq!(token_from_query("?token="), None);
        assert_eq!(token_from_query(""), None);
        assert_eq!(token_from_query("/reset-password"), None);
    }

    #[test]
    fn test_schema() {
        let schema = ResetPasswordForm::schema();
        let data = form_data([("password", "123456"), ("passwordConfirmation", "654321")]);
        let errors = schema.validate(&data).unwrap_err().field_errors();
        assert_eq!(errors["passwordConfirmation"], "Confirmação da nova senha não confere com a nova senha.");
        assert!(!errors.contains_key("password"));
    }
}
