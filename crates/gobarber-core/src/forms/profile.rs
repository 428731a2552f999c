use std::fmt;
use std::sync::Arc;

use super::{form_data, submit, FormError, LoadingFlag, SubmitOutcome};
use crate::api::{PasswordChange, ProfileUpdate};
use crate::context::AppContext;
use crate::routes::Route;
use crate::toast::NewToast;
use crate::validation::{FieldRules, FormData, Schema};

const PASSWORD_MIN_LEN: usize = 6;

/// Profile form input. The password fields are optional as a group: they
/// only matter when `old_password` is filled in.
#[derive(Clone, Default)]
pub struct ProfileData {
    pub name: String,
    pub email: String,
    pub old_password: String,
    pub password: String,
    pub password_confirmation: String,
}

impl fmt::Debug for ProfileData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileData")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("changes_password", &self.changes_password())
            .finish()
    }
}

impl ProfileData {
    /// Returns `true` if the user asked to change the password.
    pub fn changes_password(&self) -> bool {
        !self.old_password.is_empty()
    }

    fn form_data(&self) -> FormData {
        form_data([
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("oldPassword", self.old_password.as_str()),
            ("password", self.password.as_str()),
            ("passwordConfirmation", self.password_confirmation.as_str()),
        ])
    }

    /// Builds the request body. The password trio is sent only when the old
    /// password is filled in.
    pub fn to_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.changes_password().then(|| PasswordChange {
                old_password: self.old_password.clone(),
                password: self.password.clone(),
                password_confirmation: self.password_confirmation.clone(),
            }),
        }
    }
}

/// Profile screen logic: details, password and avatar.
pub struct ProfileForm {
    context: Arc<AppContext>,
    loading: LoadingFlag,
    avatar_loading: LoadingFlag,
}

impl ProfileForm {
    pub fn new(context: Arc<AppContext>) -> Self {
        Self { context, loading: LoadingFlag::default(), avatar_loading: LoadingFlag::default() }
    }

    pub fn schema() -> Schema {
        let new_password = || {
            FieldRules::new()
                .required("Senha obrigatória")
                .min_len(PASSWORD_MIN_LEN, "Senha deve conter pelo menos 6 caracteres")
        };

        Schema::new()
            .field("name", FieldRules::new().required("Nome obrigatório"))
            .field("email", FieldRules::new().required("E-mail obrigatório").email("Informe um e-mail válido"))
            .field("password", FieldRules::new().when_present("oldPassword", new_password()))
            .field(
                "passwordConfirmation",
                FieldRules::new()
                    .when_present("oldPassword", new_password())
                    .equals_field("password", "Confirmação da nova senha não confere com a nova senha."),
            )
    }

    /// Prefills the form from the signed-in user.
    pub fn initial_data(&self) -> ProfileData {
        self.context
            .session()
            .current_user()
            .map(|user| ProfileData { name: user.name.unwrap_or_default(), email: user.email, ..ProfileData::default() })
            .unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading() || self.avatar_loading.is_loading()
    }

    /// Saves the profile, refreshes the session user and redirects to the
    /// dashboard.
    pub async fn submit(&self, data: &ProfileData) -> SubmitOutcome {
        let failure = NewToast::error("Erro na atualização.")
            .with_description("Ocorreu um erro na atualização, tente novamente.");

        submit("profile", &self.loading, &Self::schema(), &data.form_data(), self.context.toasts(), failure, || async move {
            let record = self.context.api().update_profile(&data.to_update()).await?;
            self.context.session().update_user_record(record)?;
            self.context.toasts().add_toast(
                NewToast::success("Perfil atualizado com sucesso!")
                    .with_description("Suas informações foram atualizadas."),
            );
            Ok::<_, FormError>(SubmitOutcome::Redirect(Route::Dashboard))
        })
        .await
    }

    /// Uploads a new avatar and refreshes the session user.
    pub async fn change_avatar(&self, file_name: &str, contents: Vec<u8>) -> SubmitOutcome {
        let failure = NewToast::error("Erro na atualização.")
            .with_description("Ocorreu um erro na atualização do avatar, tente novamente.");

        submit("avatar", &self.avatar_loading, &Schema::new(), &FormData::new(), self.context.toasts(), failure, || async move {
            let record = self.context.api().update_avatar(file_name, contents).await?;
            self.context.session().update_user_record(record)?;
            self.context.toasts().add_toast(NewToast::success("Avatar atualizado com sucesso!"));
            Ok::<_, FormError>(SubmitOutcome::Done)
        })
        .await
    }
}
