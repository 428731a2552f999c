//! `gobarber logout`

use colored::Colorize;
use gobarber_core::AppContext;

/// Execute the logout command. Signing out twice is not an error.
pub fn execute(context: &AppContext) -> anyhow::Result<()> {
    let was_signed_in = context.session().is_authenticated();
    context.session().sign_out()?;

    if was_signed_in {
        println!("{}", "Signed out".green());
    } else {
        println!("{}", "Not signed in".yellow());
    }
    Ok(())
}
