//! Form flows behind the authentication and profile screens.
//!
//! Every flow follows the same steps: validate the input, call the session
//! manager or the API, then report. Validation failures come back as
//! [`SubmitOutcome::Invalid`] with one message per field and never raise a
//! toast. Any other failure queues an error toast and yields
//! [`SubmitOutcome::Failed`]. While a submission is in flight, further
//! submissions of the same form return [`SubmitOutcome::Busy`].

mod forgot_password;
mod profile;
mod reset_password;
mod sign_in;

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tracing::warn;

use crate::api::ApiError;
use crate::auth::AuthError;
use crate::routes::Route;
use crate::toast::{NewToast, ToastManager};
use crate::validation::{FieldErrors, FormData, Schema};

pub use forgot_password::{ForgotPasswordData, ForgotPasswordForm};
pub use profile::{ProfileData, ProfileForm};
pub use reset_password::{token_from_query, ResetPasswordData, ResetPasswordForm};
pub use sign_in::{SignInData, SignInForm};

/// Result of submitting a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Success; navigate to this route.
    Redirect(Route),
    /// Success with nowhere to go.
    Done,
    /// Input rejected; show these messages next to the fields.
    Invalid(FieldErrors),
    /// The request failed and an error toast was queued.
    Failed,
    /// A previous submission is still in flight.
    Busy,
}

impl SubmitOutcome {
    /// Returns `true` for `Redirect` and `Done`.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Redirect(_) | Self::Done)
    }
}

/// Failures of a form request, after validation passed.
#[derive(Error, Debug)]
pub enum FormError {
    /// The reset link carries no token.
    #[error("Token not found")]
    MissingToken,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Result type alias for form requests.
pub type FormResult<T> = std::result::Result<T, FormError>;

/// In-flight marker for one form.
#[derive(Debug, Default)]
pub struct LoadingFlag(AtomicBool);

impl LoadingFlag {
    /// Returns `true` while a submission is running.
    pub fn is_loading(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Marks the form as loading until the guard drops, or returns `None` if it
    /// already is.
    fn begin(&self) -> Option<LoadingGuard<'_>> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| LoadingGuard(self))
    }
}

struct LoadingGuard<'a>(&'a LoadingFlag);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0 .0.store(false, Ordering::Release);
    }
}

/// Runs one submission: busy check, validation, request, report.
///
/// `failure` is the toast queued when `request` fails.
async fn submit<F, Fut>(
    form: &'static str,
    loading: &LoadingFlag,
    schema: &Schema,
    data: &FormData,
    toasts: &ToastManager,
    failure: NewToast,
    request: F,
) -> SubmitOutcome
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = FormResult<SubmitOutcome>>,
{
    let Some(_guard) = loading.begin() else {
        return SubmitOutcome::Busy;
    };

    if let Err(errors) = schema.validate(data) {
        return SubmitOutcome::Invalid(errors.field_errors());
    }

    match request().await {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!(form, error = %e, "Form submission failed");
            toasts.add_toast(failure);
            SubmitOutcome::Failed
        }
    }
}

/// Builds [`FormData`] from field name and value pairs.
fn form_data<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> FormData {
    fields.into_iter().map(|(name, value)| (name.to_string(), value.to_string())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FieldRules;

    fn schema() -> Schema {
        Schema::new().field("email", FieldRules::new().required("E-mail obrigatório"))
    }

    #[tokio::test]
    async fn test_submit_invalid_skips_request() {
        let toasts = ToastManager::new();
        let loading = LoadingFlag::default();
        let mut called = false;

        let outcome = submit("test", &loading, &schema(), &FormData::new(), &toasts, NewToast::error("x"), || {
            called = true;
            async { Ok::<_, FormError>(SubmitOutcome::Done) }
        })
        .await;

        assert!(matches!(outcome, SubmitOutcome::Invalid(ref e) if e["email"] == "E-mail obrigatório"));
        assert!(!called);
        assert!(toasts.is_empty());
        assert!(!loading.is_loading());
    }

    #[tokio::test]
    async fn test_submit_failure_queues_toast() {
        let toasts = ToastManager::new();
        let loading = LoadingFlag::default();
        let data = form_data([("email", "a@b.com")]);

        let outcome = submit("test", &loading, &schema(), &data, &toasts, NewToast::error("Falhou"), || async {
            Err::<SubmitOutcome, _>(FormError::MissingToken)
        })
        .await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(toasts.messages()[0].title, "Falhou");
        assert!(!loading.is_loading());
    }

    #[tokio::test]
    async fn test_submit_while_loading_is_busy() {
        let toasts = ToastManager::new();
        let loading = LoadingFlag::default();
        let _held = loading.begin().unwrap();

        let data = form_data([("email", "a@b.com")]);
        let outcome = submit("test", &loading, &schema(), &data, &toasts, NewToast::error("x"), || async {
            Ok::<_, FormError>(SubmitOutcome::Done)
        })
        .await;

        assert_eq!(outcome, SubmitOutcome::Busy);
        assert!(loading.is_loading());
    }

    #[test]
    fn test_form_error_display() {
        assert_eq!(format!("{}", FormError::MissingToken), "Token not found");
        let err: FormError = AuthError::NotAuthenticated.into();
        assert_eq!(format!("{}", err), "Not authenticated");
    }

    #[test]
    fn test_outcome_is_success() {
        assert!(SubmitOutcome::Redirect(Route::Dashboard).is_success());
        assert!(SubmitOutcome::Done.is_success());
        assert!(!SubmitOutcome::Failed.is_success());
        assert!(!SubmitOutcome::Busy.is_success());
    }
}
