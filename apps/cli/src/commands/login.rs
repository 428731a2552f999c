//! `gobarber login`

use std::io::{self, Write};
use std::sync::Arc;

use colored::Colorize;
use gobarber_core::forms::{SignInData, SignInForm};
use gobarber_core::{AppContext, Route};
use rpassword::read_password;

use crate::output;

/// Execute the login command.
pub async fn execute(context: &Arc<AppContext>, email: String, password: Option<String>) -> anyhow::Result<()> {
    super::require(context, Route::SignIn)?;

    let password = match password {
        Some(password) => password,
        None => {
            print!("Senha: ");
            io::stdout().flush()?;
            read_password()?
        }
    };

    let form = SignInForm::new(context.clone());
    let outcome = form.submit(&SignInData { email, password }).await;
    output::report(context, outcome)?;

    if let Some(user) = context.session().current_user() {
        println!("{} {}", "Signed in as".green(), user.display_name().bold());
    }
    Ok(())
}
