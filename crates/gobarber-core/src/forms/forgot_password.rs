use std::sync::Arc;

use super::{form_data, submit, FormError, LoadingFlag, SubmitOutcome};
use crate::context::AppContext;
use crate::routes::Route;
use crate::toast::NewToast;
use crate::validation::{FieldRules, Schema};

/// Password recovery form input.
#[derive(Debug, Clone, Default)]
pub struct ForgotPasswordData {
    pub email: String,
}

/// Password recovery screen logic.
pub struct ForgotPasswordForm {
    context: Arc<AppContext>,
    loading: LoadingFlag,
}

impl ForgotPasswordForm {
    pub fn new(context: Arc<AppContext>) -> Self {
        Self { context, loading: LoadingFlag::default() }
    }

    pub fn schema() -> Schema {
        Schema::new().field("email", FieldRules::new().required("E-mail obrigatório").email("Informe um e-mail válido"))
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    /// Requests a recovery e-mail.
    pub async fn submit(&self, data: &ForgotPasswordData) -> SubmitOutcome {
        let fields = form_data([("email", data.email.as_str())]);
        let failure = NewToast::error("Erro na recuperação de senha")
            .with_description("Ocorreu um erro na recuperação de senha, tente novamente.");

        submit("forgot-password", &self.loading, &Self::schema(), &fields, self.context.toasts(), failure, || async move {
            self.context.api().forgot_password(&data.email).await?;
            self.context.toasts().add_toast(
                NewToast::success("Recuperação de senha")
                    .with_description("E-mail de recuperação de senha enviado com sucesso."),
            );
            Ok::<_, FormError>(SubmitOutcome::Redirect(Route::Dashboard))
        })
        .await
    }
}
