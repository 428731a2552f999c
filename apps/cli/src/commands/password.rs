//! `gobarber forgot-password` and `gobarber reset-password`

use std::sync::Arc;

use gobarber_core::forms::{ForgotPasswordData, ForgotPasswordForm, ResetPasswordData, ResetPasswordForm};
use gobarber_core::AppContext;

use crate::output;

/// Execute the forgot-password command.
pub async fn forgot(context: &Arc<AppContext>, email: String) -> anyhow::Result<()> {
    let form = ForgotPasswordForm::new(context.clone());
    let outcome = form.submit(&ForgotPasswordData { email }).await;
    output::report(context, outcome)
}

/// Execute the reset-password command.
pub async fn reset(
    context: &Arc<AppContext>,
    link: &str,
    password: String,
    password_confirmation: String,
) -> anyhow::Result<()> {
    let form = ResetPasswordForm::new(context.clone(), link);
    let outcome = form.submit(&ResetPasswordData { password, password_confirmation }).await;
    output::report(context, outcome)
}
