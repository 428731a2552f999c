//! `gobarber whoami`

use colored::Colorize;
use gobarber_core::AppContext;
use serde_json::json;

/// Execute the whoami command.
pub fn execute(context: &AppContext, json: bool) -> anyhow::Result<()> {
    let user = context.session().current_user();

    if json {
        let value = json!({ "authenticated": user.is_some(), "user": user });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    match user {
        Some(user) => {
            println!("{}", user.display_name().bold());
            println!("  E-mail: {}", user.email);
            println!("  Id:     {}", user.id.dimmed());
            if let Some(avatar_url) = &user.avatar_url {
                println!("  Avatar: {}", avatar_url);
            }
        }
        None => println!("{}", "Not signed in".yellow()),
    }
    Ok(())
}
