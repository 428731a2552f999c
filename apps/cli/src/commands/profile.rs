//! `gobarber profile`

use std::sync::Arc;

use gobarber_core::forms::{ProfileData, ProfileForm};
use gobarber_core::{AppContext, Route};

use crate::output;

/// Flags of the profile command.
#[derive(Debug)]
pub struct ProfileArgs {
    pub name: String,
    pub email: String,
    pub old_password: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

impl From<ProfileArgs> for ProfileData {
    fn from(args: ProfileArgs) -> Self {
        Self {
            name: args.name,
            email: args.email,
            old_password: args.old_password.unwrap_or_default(),
            password: args.password.unwrap_or_default(),
            password_confirmation: args.password_confirmation.unwrap_or_default(),
        }
    }
}

/// Execute the profile command.
pub async fn execute(context: &Arc<AppContext>, args: ProfileArgs) -> anyhow::Result<()> {
    super::require(context, Route::Profile)?;

    let form = ProfileForm::new(context.clone());
    let outcome = form.submit(&args.into()).await;
    output::report(context, outcome)
}
