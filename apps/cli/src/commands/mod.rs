//! Command implementations for the GoBarber CLI.

pub mod avatar;
pub mod login;
pub mod logout;
pub mod password;
pub mod profile;
pub mod whoami;

use anyhow::bail;
use colored::Colorize;
use gobarber_core::{AppContext, Route, RouteDecision};

/// Fails unless `route` may be shown to the current user.
pub fn require(context: &AppContext, route: Route) -> anyhow::Result<()> {
    match context.guard(route) {
        RouteDecision::Render(_) => Ok(()),
        RouteDecision::Redirect(Route::SignIn) => {
            eprintln!("{}", "Not signed in. Run `gobarber login` first.".yellow());
            bail!("not signed in")
        }
        RouteDecision::Redirect(_) => {
            eprintln!("{}", "Already signed in. Run `gobarber logout` first.".yellow());
            bail!("already signed in")
        }
    }
}
