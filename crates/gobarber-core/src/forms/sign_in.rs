use std::fmt;
use std::sync::Arc;

use super::{form_data, submit, FormError, LoadingFlag, SubmitOutcome};
use crate::context::AppContext;
use crate::routes::Route;
use crate::toast::NewToast;
use crate::validation::{FieldRules, Schema};

/// Sign-in form input.
#[derive(Clone, Default)]
pub struct SignInData {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for SignInData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInData").field("email", &self.email).field("password", &"<redacted>").finish()
    }
}

impl SignInData {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }
}

/// Sign-in screen logic.
pub struct SignInForm {
    context: Arc<AppContext>,
    loading: LoadingFlag,
}

impl SignInForm {
    pub fn new(context: Arc<AppContext>) -> Self {
        Self { context, loading: LoadingFlag::default() }
    }

    pub fn schema() -> Schema {
        Schema::new()
            .field("email", FieldRules::new().required("E-mail obrigatório").email("Digite um e-mail válido"))
            .field("password", FieldRules::new().required("Senha obrigatória"))
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    /// Signs in and redirects to the dashboard.
    pub async fn submit(&self, data: &SignInData) -> SubmitOutcome {
        let fields = form_data([("email", data.email.as_str()), ("password", data.password.as_str())]);
        let failure = NewToast::error("Erro na autenticação")
            .with_description("Ocorreu um erro ao fazer login, cheque as credenciais.");

        submit("sign-in", &self.loading, &Self::schema(), &fields, self.context.toasts(), failure, || async move {
            self.context.session().sign_in(&data.email, &data.password).await?;
            Ok::<_, FormError>(SubmitOutcome::Redirect(Route::Dashboard))
        })
        .await
    }
}
